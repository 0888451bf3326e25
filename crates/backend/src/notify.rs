//! Per-room change fan-out backing the SSE feeds.
//!
//! Every mutation against a room publishes a [`RoomEvent`]; each open event
//! stream holds a broadcast receiver for its room. Receivers that fall behind
//! only miss refetch hints; subscribers reload on the next event.

use dashmap::DashMap;
use shared_types::RoomEvent;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub with one channel per room.
pub struct RoomHub {
    channels: DashMap<String, broadcast::Sender<RoomEvent>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to change events for a room. Creates the channel if needed.
    pub fn subscribe(&self, room_id: &str) -> broadcast::Receiver<RoomEvent> {
        let sender = self
            .channels
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Publish an event. No-op if nobody is listening.
    pub fn publish(&self, room_id: &str, event: &RoomEvent) {
        if let Some(sender) = self.channels.get(room_id) {
            let _ = sender.send(event.clone());
        }
    }

    /// Remove a room's channel, closing its subscriber streams.
    pub fn remove(&self, room_id: &str) {
        self.channels.remove(room_id);
    }
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn added_event() -> RoomEvent {
        RoomEvent::SelectionAdded {
            name: "ana".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        }
    }

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = RoomHub::new();
        let mut rx = hub.subscribe("room1234");

        let event = added_event();
        hub.publish("room1234", &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = RoomHub::new();
        // No subscriber — should not panic
        hub.publish("room1234", &RoomEvent::RoomDeleted);
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let hub = RoomHub::new();
        let mut other = hub.subscribe("otherroom");

        hub.subscribe("room1234");
        hub.publish("room1234", &added_event());

        assert!(matches!(
            other.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn remove_closes_subscribers() {
        let hub = RoomHub::new();
        let mut rx = hub.subscribe("room1234");

        hub.remove("room1234");

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
