mod common;

use common::{engine_with, total_chips, Scripted};
use pokermind_engine::engine::{Engine, GameConfig, HandStatus};
use pokermind_engine::events::{GameEvent, MemorySink};
use pokermind_engine::provider::Decision;
use std::sync::Arc;

#[tokio::test]
async fn folding_to_the_big_blind_ends_the_hand_without_a_board() {
    let sink = Arc::new(MemorySink::new());
    let mut engine = engine_with(
        7,
        vec![
            ("alice", Scripted::new("alice", vec![Decision::Fold])),
            ("bob", Scripted::calls("bob")),
        ],
    )
    .with_sink(sink.clone());

    // Button moves to seat 1 for the first hand, so seat 0 posts the small
    // blind and opens the pre-flop action.
    let status = engine.play_hand().await.expect("hand");
    assert_eq!(status, HandStatus::Completed);

    assert_eq!(engine.table().players()[0].stack(), 995);
    assert_eq!(engine.table().players()[1].stack(), 1005);
    assert_eq!(total_chips(&engine), 2000);

    let events = sink.events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::CommunityCardsDealt { .. })),
        "an uncontested hand deals no board"
    );
    let complete = events
        .iter()
        .find_map(|e| match e {
            GameEvent::HandComplete {
                winners, ranked, ..
            } => Some((winners.clone(), *ranked)),
            _ => None,
        })
        .expect("hand_complete event");
    assert_eq!(complete.0, vec![1]);
    assert!(!complete.1, "no ranking for a sole contender");
}

#[tokio::test]
async fn passive_hand_runs_all_four_streets_to_showdown() {
    let sink = Arc::new(MemorySink::new());
    let mut engine = engine_with(
        11,
        vec![
            ("alice", Scripted::calls("alice")),
            ("bob", Scripted::calls("bob")),
        ],
    )
    .with_sink(sink.clone());

    let status = engine.play_hand().await.expect("hand");
    assert_eq!(status, HandStatus::Completed);
    assert_eq!(total_chips(&engine), 2000);

    let events = sink.events();
    let last_board = events
        .iter()
        .rev()
        .find_map(|e| match e {
            GameEvent::CommunityCardsDealt { board, .. } => Some(board.clone()),
            _ => None,
        })
        .expect("board dealt");
    assert_eq!(last_board.len(), 5);

    let (pot, ranked) = events
        .iter()
        .find_map(|e| match e {
            GameEvent::HandComplete { pot, ranked, .. } => Some((*pot, *ranked)),
            _ => None,
        })
        .expect("hand_complete event");
    assert_eq!(pot, 20, "both blinds in, small blind completes, no raises");
    assert!(ranked);
}

#[tokio::test]
async fn a_lone_seat_cannot_play_a_hand() {
    let mut engine = Engine::new(
        GameConfig::default(),
        vec![(
            "solo".to_string(),
            Scripted::calls("solo"),
        )],
    );
    let status = engine.play_hand().await.expect("hand");
    assert_eq!(status, HandStatus::NotEnoughPlayers);
    assert_eq!(engine.table().players()[0].stack(), 1000);
}
