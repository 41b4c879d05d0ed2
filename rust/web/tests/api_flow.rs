use pokermind_web::{AppContext, GameStatus, ServerConfig, WebServer};
use serde_json::{json, Value};
use std::time::Duration;

fn test_routes() -> (
    AppContext,
    warp::filters::BoxedFilter<(warp::reply::Response,)>,
) {
    let context = AppContext::new(ServerConfig::for_tests());
    let routes = WebServer::routes(&context);
    (context, routes)
}

fn create_body(players: usize) -> Value {
    json!({
        "small_blind": 5,
        "big_blind": 10,
        "player_stack": 1000,
        "num_hands": 2,
        "seed": 9,
        "players": (0..players)
            .map(|i| json!({ "name": format!("p{i}") }))
            .collect::<Vec<_>>(),
    })
}

async fn body_json(response: warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("json body")
}

#[tokio::test]
async fn health_answers_ok() {
    let (_context, routes) = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn create_start_and_observe_a_game() {
    let (_context, routes) = test_routes();

    let created = warp::test::request()
        .method("POST")
        .path("/games")
        .json(&create_body(2))
        .reply(&routes)
        .await;
    assert_eq!(created.status(), 201);
    let game_id = body_json(created).await["game_id"]
        .as_str()
        .expect("game_id")
        .to_string();

    let state = warp::test::request()
        .method("GET")
        .path(&format!("/games/{game_id}"))
        .reply(&routes)
        .await;
    assert_eq!(state.status(), 200);
    let state = body_json(state).await;
    assert_eq!(state["status"], "created");
    assert_eq!(state["players"].as_array().expect("players").len(), 2);

    let started = warp::test::request()
        .method("POST")
        .path(&format!("/games/{game_id}/start"))
        .reply(&routes)
        .await;
    assert_eq!(started.status(), 200);

    // Two seeded rule-policy hands finish quickly.
    let mut status = Value::Null;
    for _ in 0..100 {
        let state = warp::test::request()
            .method("GET")
            .path(&format!("/games/{game_id}"))
            .reply(&routes)
            .await;
        status = body_json(state).await["status"].clone();
        if status == "completed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status, "completed");

    let state = warp::test::request()
        .method("GET")
        .path(&format!("/games/{game_id}"))
        .reply(&routes)
        .await;
    let state = body_json(state).await;
    let total: u64 = state["players"]
        .as_array()
        .expect("players")
        .iter()
        .map(|p| p["stack"].as_u64().expect("stack"))
        .sum();
    assert_eq!(total, 2000);
}

#[tokio::test]
async fn unknown_game_is_a_404() {
    let (_context, routes) = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/games/no-such-game")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 404);

    let started = warp::test::request()
        .method("POST")
        .path("/games/no-such-game/start")
        .reply(&routes)
        .await;
    assert_eq!(started.status(), 404);
}

#[tokio::test]
async fn single_seat_roster_is_rejected() {
    let (_context, routes) = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/games")
        .json(&create_body(1))
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn starting_twice_conflicts() {
    let (context, routes) = test_routes();
    let created = warp::test::request()
        .method("POST")
        .path("/games")
        .json(&create_body(2))
        .reply(&routes)
        .await;
    let game_id = body_json(created).await["game_id"]
        .as_str()
        .expect("game_id")
        .to_string();

    context.games().start_game(&game_id).expect("first start");
    let again = warp::test::request()
        .method("POST")
        .path(&format!("/games/{game_id}/start"))
        .reply(&routes)
        .await;
    assert_eq!(again.status(), 409);
}

#[tokio::test]
async fn deleted_game_disappears() {
    let (_context, routes) = test_routes();
    let created = warp::test::request()
        .method("POST")
        .path("/games")
        .json(&create_body(2))
        .reply(&routes)
        .await;
    let game_id = body_json(created).await["game_id"]
        .as_str()
        .expect("game_id")
        .to_string();

    let deleted = warp::test::request()
        .method("DELETE")
        .path(&format!("/games/{game_id}"))
        .reply(&routes)
        .await;
    assert_eq!(deleted.status(), 204);

    let state = warp::test::request()
        .method("GET")
        .path(&format!("/games/{game_id}"))
        .reply(&routes)
        .await;
    assert_eq!(state.status(), 404);
}
