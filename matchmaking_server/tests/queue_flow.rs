mod support;

use serde_json::{Value, json};

async fn enqueue(client: &reqwest::Client, base_url: &str, body: Value) -> (u16, Value) {
    let res = client
        .post(format!("{base_url}/matchmaking/queue"))
        .json(&body)
        .send()
        .await
        .expect("request should succeed");
    let status = res.status().as_u16();
    let payload = res.json::<Value>().await.expect("json body");
    (status, payload)
}

#[tokio::test]
async fn test_health() {
    let base_url = support::ensure_server();

    let res = reqwest::get(format!("{base_url}/health"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.text().await.expect("text body"), "ok");
}

#[tokio::test]
async fn test_compatible_players_are_matched() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    // A region of its own keeps other tests' players out of this pairing.
    let region = support::unique_id("region");
    let first = support::unique_id("first");
    let second = support::unique_id("second");

    let (status, payload) = enqueue(
        &client,
        base_url,
        json!({ "player_id": first, "player_skill": 1200, "region": region }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(payload["status"], "waiting");

    let (status, payload) = enqueue(
        &client,
        base_url,
        json!({ "player_id": second, "player_skill": 1205, "region": region }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(payload["status"], "matched");
    assert_eq!(payload["opponent_id"], first.as_str());

    let res = client
        .get(format!("{base_url}/matchmaking/queue/{first}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let status_payload = res.json::<Value>().await.expect("json body");
    assert_eq!(status_payload["status"], "matched");
    assert_eq!(status_payload["match_id"], payload["match_id"]);
}

#[tokio::test]
async fn test_withdrawn_player_leaves_the_queue() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let player = support::unique_id("leaver");

    let (status, _) = enqueue(
        &client,
        base_url,
        json!({ "player_id": player, "player_skill": 10, "region": support::unique_id("region") }),
    )
    .await;
    assert_eq!(status, 200);

    let res = client
        .delete(format!("{base_url}/matchmaking/queue/{player}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let payload = res.json::<Value>().await.expect("json body");
    assert_eq!(payload["withdrawn"], true);

    let res = client
        .get(format!("{base_url}/matchmaking/queue/{player}"))
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}
