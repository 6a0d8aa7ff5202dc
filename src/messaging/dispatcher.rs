use crate::messaging::EventKind;
use crate::types::EventEnvelope;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type Handler = Arc<dyn Fn(&EventEnvelope) + Send + Sync + 'static>;

/// Handle returned by [`EventDispatcher::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Routes decoded server events to the handlers registered for their type.
///
/// Handlers run synchronously on the publishing task, in the order they
/// subscribed. A panicking handler is logged and skipped; the remaining
/// handlers of the same publish still run.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: AtomicU64,
    handlers: RwLock<HashMap<EventKind, Vec<(SubscriptionId, Handler)>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: impl Into<EventKind>, handler: F) -> SubscriptionId
    where
        F: Fn(&EventEnvelope) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .entry(kind.into())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if it was not subscribed to `kind`.
    pub fn unsubscribe(&self, kind: &EventKind, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let Some(list) = handlers.get_mut(kind) else {
            return false;
        };

        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(kind);
        }
        removed
    }

    /// Invokes every handler subscribed to the envelope's type.
    ///
    /// Returns the number of handlers that completed without panicking.
    pub fn publish(&self, envelope: &EventEnvelope) -> usize {
        let snapshot: Vec<Handler> = {
            let handlers = self.handlers.read();
            match handlers.get(&envelope.kind) {
                Some(list) => list.iter().map(|(_, handler)| Arc::clone(handler)).collect(),
                None => return 0,
            }
        }; // Lock released here so handlers may (un)subscribe

        let mut delivered = 0;
        for handler in snapshot {
            match catch_unwind(AssertUnwindSafe(|| handler(envelope))) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::error!("Handler for event {} panicked", envelope.kind);
                }
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, kind: &EventKind) -> usize {
        self.handlers.read().get(kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn envelope(kind: &str) -> EventEnvelope {
        EventEnvelope::new(kind, serde_json::json!({"id": "x"}))
    }

    #[test]
    fn test_publish_runs_handlers_in_subscription_order() {
        let dispatcher = EventDispatcher::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let calls = Arc::clone(&calls);
            dispatcher.subscribe(EventKind::MessageCreated, move |_| calls.lock().push(label));
        }

        assert_eq!(dispatcher.publish(&envelope("MESSAGE_CREATED")), 3);
        assert_eq!(*calls.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_publish_only_reaches_matching_type() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&hits);
        dispatcher.subscribe(EventKind::StampCreated, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(dispatcher.publish(&envelope("STAMP_DELETED")), 0);
        assert_eq!(dispatcher.publish(&envelope("STAMP_CREATED")), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let dispatcher = EventDispatcher::new();
        let id = dispatcher.subscribe("USER_ONLINE", |_| {});
        dispatcher.subscribe("USER_ONLINE", |_| {});

        assert!(dispatcher.unsubscribe(&EventKind::UserOnline, id));
        assert!(!dispatcher.unsubscribe(&EventKind::UserOnline, id));
        assert!(!dispatcher.unsubscribe(&EventKind::UserOffline, id));
        assert_eq!(dispatcher.subscriber_count(&EventKind::UserOnline), 1);
    }

    #[test]
    fn test_panicking_handler_does_not_stop_the_others() {
        let dispatcher = EventDispatcher::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let before = Arc::clone(&calls);
        dispatcher.subscribe("MESSAGE_READ", move |_| before.lock().push("before"));
        dispatcher.subscribe("MESSAGE_READ", |_| panic!("store exploded"));
        let after = Arc::clone(&calls);
        dispatcher.subscribe("MESSAGE_READ", move |_| after.lock().push("after"));

        assert_eq!(dispatcher.publish(&envelope("MESSAGE_READ")), 2);
        assert_eq!(*calls.lock(), vec!["before", "after"]);

        // Dispatcher stays usable after a panic
        assert_eq!(dispatcher.publish(&envelope("MESSAGE_READ")), 2);
    }

    #[test]
    fn test_handler_can_unsubscribe_itself() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&dispatcher);
        let own_id = Arc::clone(&slot);
        let id = dispatcher.subscribe("CHANNEL_UPDATED", move |event| {
            if let (Some(dispatcher), Some(id)) = (weak.upgrade(), *own_id.lock()) {
                dispatcher.unsubscribe(&event.kind, id);
            }
        });
        *slot.lock() = Some(id);

        assert_eq!(dispatcher.publish(&envelope("CHANNEL_UPDATED")), 1);
        assert_eq!(dispatcher.publish(&envelope("CHANNEL_UPDATED")), 0);
    }
}
