use warp::reply::{self, Reply};

pub fn health() -> impl Reply {
    reply::json(&serde_json::json!({ "status": "ok" }))
}
