use crossbeam_channel::{unbounded, Receiver, Sender};
/// Event bus for playback notifications
///
/// Allows the embedding application to observe what the controller did
/// without polling node state. Everything runs on the host's single update
/// step, so the bus itself needs no locking; subscribers drain their
/// channel whenever they like.
use crate::events::SoundEvent;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<SoundEvent>,
}

/// Broadcasts playback events to subscribers
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&mut self) -> (Receiver<SoundEvent>, SubscriberId) {
        let (tx, rx) = unbounded();

        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        self.subscribers.push(Subscriber { id, sender: tx });

        (rx, id)
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: SoundEvent) {
        for subscriber in &self.subscribers {
            // If send fails, the subscriber dropped its receiver - that's ok
            let _ = subscriber.sender.try_send(event.clone());
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
