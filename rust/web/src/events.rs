//! Per-game event fan-out between the engine and SSE subscribers.

use pokermind_engine::events::{EventSink, GameEvent};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

pub type GameId = String;

// Bounded buffer per subscriber; slow consumers lose events rather than
// stalling the hand.
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<GameEvent>;
pub type EventReceiver = mpsc::Receiver<GameEvent>;

pub struct EventSubscription {
    bus: EventBus,
    game_id: GameId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.game_id, self.subscriber_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<GameId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, game_id: GameId) -> EventSubscription {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        {
            let mut guard = self
                .inner
                .subscribers
                .write()
                .expect("subscriber lock poisoned");
            guard.entry(game_id.clone()).or_default().push((id, tx));
        }
        tracing::info!(game_id = %game_id, subscriber_id = id, "client subscribed to game events");
        EventSubscription {
            bus: self.clone(),
            game_id,
            subscriber_id: id,
            receiver: rx,
        }
    }

    pub fn broadcast(&self, game_id: &GameId, event: GameEvent) {
        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.get(game_id).cloned()
        };

        let Some(list) = subscribers else {
            return;
        };

        let mut stale = Vec::new();
        for (id, sender) in list {
            // try_send keeps the engine from ever blocking on a viewer.
            if let Err(err) = sender.try_send(event.clone()) {
                tracing::warn!(
                    game_id = %game_id,
                    subscriber_id = id,
                    error = ?err,
                    "dropping event for subscriber"
                );
                if matches!(err, mpsc::error::TrySendError::Closed(_)) {
                    stale.push(id);
                }
            }
        }
        if !stale.is_empty() {
            self.remove_subscribers(game_id, &stale);
        }
    }

    pub fn unsubscribe(&self, game_id: &GameId, subscriber_id: usize) {
        self.remove_subscribers(game_id, &[subscriber_id]);
    }

    pub fn drop_game(&self, game_id: &GameId) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        guard.remove(game_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self
            .inner
            .subscribers
            .read()
            .expect("subscriber lock poisoned");
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, game_id: &GameId, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        if let Some(list) = guard.get_mut(game_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(game_id);
            }
        }
    }
}

/// The engine-side sink for one game: every emitted event is broadcast to
/// that game's subscribers.
pub struct BusSink {
    bus: EventBus,
    game_id: GameId,
}

impl BusSink {
    pub fn new(bus: EventBus, game_id: GameId) -> Self {
        Self { bus, game_id }
    }
}

impl EventSink for BusSink {
    fn emit(&self, event: GameEvent) {
        self.bus.broadcast(&self.game_id, event);
    }
}
