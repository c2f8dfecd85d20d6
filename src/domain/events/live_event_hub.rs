use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Opaque "something new happened" token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventSignal {
    /// Increments on every publish.
    pub sequence: u64,
    /// Namespace the event belongs to; `None` concerns every view.
    pub namespace: Option<String>,
    pub event_id: Option<String>,
}

impl LiveEventSignal {
    pub fn concerns(&self, namespace: &str) -> bool {
        self.namespace.as_deref().map_or(true, |ns| ns == namespace)
    }
}

/// Fan-out point for live event notifications.
pub struct LiveEventHub {
    tx: watch::Sender<LiveEventSignal>,
}

impl Default for LiveEventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveEventHub {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LiveEventSignal::default());
        Self { tx }
    }

    /// Returns the sequence assigned to this signal.
    pub fn publish(&self, namespace: Option<String>, event_id: Option<String>) -> u64 {
        let mut sequence = 0;
        self.tx.send_modify(|signal| {
            signal.sequence += 1;
            signal.namespace = namespace;
            signal.event_id = event_id;
            sequence = signal.sequence;
        });
        sequence
    }

    pub fn current(&self) -> LiveEventSignal {
        self.tx.borrow().clone()
    }

    /// Acquire a subscription. Dropping it releases the subscription.
    pub fn subscribe(&self) -> LiveEventSubscription {
        // Signals sent before this call count as already seen.
        LiveEventSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

pub struct LiveEventSubscription {
    rx: watch::Receiver<LiveEventSignal>,
}

impl LiveEventSubscription {
    /// Wait for the next signal published after the last one seen.
    ///
    /// Signals published in quick succession coalesce into the latest one.
    /// Returns `None` once the hub is gone.
    pub async fn next(&mut self) -> Option<LiveEventSignal> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
