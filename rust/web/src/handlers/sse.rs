//! Server-sent event stream of one game's lifecycle events.

use crate::events::EventBus;
use crate::session::GameManager;
use pokermind_engine::events::GameEvent;
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use warp::http::{self, StatusCode};
use warp::reply::{self, Response};
use warp::sse;
use warp::Reply;

pub async fn stream_events(game_id: String, manager: GameManager, bus: EventBus) -> Response {
    if !manager.exists(&game_id) {
        return error_response(
            StatusCode::NOT_FOUND,
            "game_not_found",
            format!("game `{game_id}` was not found"),
        );
    }

    let mut subscription = bus.subscribe(game_id);
    // The receiver is moved into the stream; the subscription itself rides
    // along so its Drop still unsubscribes when the client goes away.
    let (_tx, placeholder) = tokio::sync::mpsc::channel(1);
    let receiver = std::mem::replace(&mut subscription.receiver, placeholder);

    let stream = ReceiverStream::new(receiver).map(move |event| {
        let _subscription = &subscription;
        Ok::<_, Infallible>(render_event(event))
    });
    let keep_alive = sse::keep_alive()
        .interval(Duration::from_secs(15))
        .text(":keep-alive\n");

    let reply = sse::reply(keep_alive.stream(stream));
    reply::with_header(reply, http::header::CACHE_CONTROL, "no-cache").into_response()
}

fn render_event(event: GameEvent) -> sse::Event {
    match serde_json::to_string(&event) {
        Ok(json) => sse::Event::default().event("game_event").data(json),
        Err(err) => {
            let fallback = serde_json::json!({
                "type": "error",
                "message": format!("failed to serialize game event: {err}")
            })
            .to_string();
            sse::Event::default().event("game_event").data(fallback)
        }
    }
}

fn error_response(status: StatusCode, error: &'static str, message: String) -> Response {
    #[derive(Serialize)]
    struct ErrorBody<'a> {
        error: &'a str,
        message: String,
    }

    reply::with_status(reply::json(&ErrorBody { error, message }), status).into_response()
}
