use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::cards::Card;
use crate::game::{GameSnapshot, Street};
use crate::pot::HandResult;
use crate::rules::ValidatedAction;

pub type EventSender = mpsc::UnboundedSender<GameEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<GameEvent>;

/// Everything the dealer tells observers. Each event carries a snapshot taken
/// right after the change it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    HandStarted {
        hand_number: u32,
        small_blind_seat: usize,
        big_blind_seat: usize,
        snapshot: GameSnapshot,
    },
    AwaitingAction {
        seat: usize,
        player: String,
        to_call: u32,
        min_raise_to: u32,
        snapshot: GameSnapshot,
    },
    ActionApplied {
        player: String,
        street: Street,
        action: ValidatedAction,
        /// Chosen by the dealer because the player ran out of time
        timed_out: bool,
        snapshot: GameSnapshot,
    },
    ActionRejected {
        player: String,
        reason: String,
        snapshot: GameSnapshot,
    },
    StreetDealt {
        street: Street,
        board: Vec<Card>,
        snapshot: GameSnapshot,
    },
    HandFinished {
        result: HandResult,
        snapshot: GameSnapshot,
    },
    PlayerEliminated {
        player: String,
        cash: u32,
        snapshot: GameSnapshot,
    },
    BlindsIncreased {
        small_blind: u32,
        big_blind: u32,
        snapshot: GameSnapshot,
    },
    MatchWon {
        winner: String,
        hands_played: u32,
        snapshot: GameSnapshot,
    },
}

impl GameEvent {
    pub fn snapshot(&self) -> &GameSnapshot {
        match self {
            GameEvent::HandStarted { snapshot, .. }
            | GameEvent::AwaitingAction { snapshot, .. }
            | GameEvent::ActionApplied { snapshot, .. }
            | GameEvent::ActionRejected { snapshot, .. }
            | GameEvent::StreetDealt { snapshot, .. }
            | GameEvent::HandFinished { snapshot, .. }
            | GameEvent::PlayerEliminated { snapshot, .. }
            | GameEvent::BlindsIncreased { snapshot, .. }
            | GameEvent::MatchWon { snapshot, .. } => snapshot,
        }
    }

    /// Same event with the snapshot reduced to what `viewer` may see.
    pub fn redacted_for(&self, viewer: &str) -> GameEvent {
        let mut event = self.clone();
        let hidden = event.snapshot().redacted_for(viewer);
        match &mut event {
            GameEvent::HandStarted { snapshot, .. }
            | GameEvent::AwaitingAction { snapshot, .. }
            | GameEvent::ActionApplied { snapshot, .. }
            | GameEvent::ActionRejected { snapshot, .. }
            | GameEvent::StreetDealt { snapshot, .. }
            | GameEvent::HandFinished { snapshot, .. }
            | GameEvent::PlayerEliminated { snapshot, .. }
            | GameEvent::BlindsIncreased { snapshot, .. }
            | GameEvent::MatchWon { snapshot, .. } => *snapshot = hidden,
        }
        event
    }
}

/// Live subscription returned by [`EventBus::subscribe`]; unsubscribes on drop.
pub struct EventSubscription {
    bus: EventBus,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }

    pub async fn recv(&mut self) -> Option<GameEvent> {
        self.receiver.recv().await
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscriber_id);
    }
}

/// Fan-out of [`GameEvent`]s to any number of observers over unbounded
/// channels, so a slow observer never blocks the dealer.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<Vec<(usize, EventSender)>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw();
        EventSubscription {
            bus: self.clone(),
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        guard.push((id, tx));

        tracing::debug!(subscriber_id = id, "observer subscribed to game events");
        (id, rx)
    }

    pub fn publish(&self, event: GameEvent) {
        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.clone()
        };
        if subscribers.is_empty() {
            return;
        }

        let mut failed = Vec::new();
        for (id, sender) in subscribers {
            if sender.send(event.clone()).is_err() {
                tracing::debug!(subscriber_id = id, "dropping closed event subscriber");
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&failed);
        }
    }

    pub fn unsubscribe(&self, subscriber_id: usize) {
        self.remove_subscribers(&[subscriber_id]);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .expect("subscriber lock poisoned")
            .len()
    }

    fn remove_subscribers(&self, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        guard.retain(|(id, _)| !ids.contains(id));
    }
}
