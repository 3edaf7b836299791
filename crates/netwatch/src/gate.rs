//! Reference-counted gate over the expensive default-network-active stream.
//!
//! The producer only emits "default network went active" events while at
//! least one consumer has declared interest; the stream can fire often and
//! is costly to keep subscribed. The count and the enable/disable call are
//! made under one lock so a concurrent add and remove can never leave the
//! subscription disagreeing with the final count. This lock is independent
//! of the state and registry locks and is never held together with either.

use crate::adapter::ProducerAdapter;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub(crate) struct ActiveNotificationGate {
    interest: Mutex<u32>,
    adapter: Arc<dyn ProducerAdapter>,
    supported: bool,
}

impl ActiveNotificationGate {
    pub(crate) fn new(adapter: Arc<dyn ProducerAdapter>, supported: bool) -> Self {
        Self {
            interest: Mutex::new(0),
            adapter,
            supported,
        }
    }

    /// Declare interest. The 0 -> 1 transition subscribes the producer.
    pub(crate) fn add_interest(&self) {
        let mut count = self.interest.lock().unwrap();
        *count += 1;
        if *count == 1 {
            if !self.supported {
                debug!("default-network-active not supported; interest counted without subscribing");
                return;
            }
            if let Err(err) = self.adapter.enable_default_network_active_notifications() {
                warn!("failed to enable default-network-active notifications: {err}");
            }
        }
    }

    /// Withdraw interest. The 1 -> 0 transition unsubscribes the producer.
    /// Withdrawing interest that was never declared is a programming error.
    pub(crate) fn remove_interest(&self) {
        let mut count = self.interest.lock().unwrap();
        if *count == 0 {
            panic!("removing default-network-active interest that was never added");
        }
        *count -= 1;
        if *count == 0 && self.supported {
            if let Err(err) = self.adapter.disable_default_network_active_notifications() {
                warn!("failed to disable default-network-active notifications: {err}");
            }
        }
    }

    /// Whether anyone currently wants default-network-active events.
    pub(crate) fn has_interest(&self) -> bool {
        *self.interest.lock().unwrap() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeAdapter;

    #[test]
    fn test_zero_one_transitions_drive_subscription() {
        let adapter = Arc::new(FakeAdapter::new());
        let gate = ActiveNotificationGate::new(adapter.clone(), true);

        assert!(!adapter.active_notifications_enabled());
        gate.add_interest();
        assert!(adapter.active_notifications_enabled());

        // Second interest must not toggle anything.
        gate.add_interest();
        assert!(adapter.active_notifications_enabled());

        gate.remove_interest();
        assert!(adapter.active_notifications_enabled());
        assert!(gate.has_interest());

        gate.remove_interest();
        assert!(!adapter.active_notifications_enabled());
        assert!(!gate.has_interest());
    }

    #[test]
    fn test_unsupported_platform_counts_without_subscribing() {
        let adapter = Arc::new(FakeAdapter::new());
        let gate = ActiveNotificationGate::new(adapter.clone(), false);

        gate.add_interest();
        assert!(gate.has_interest());
        assert!(!adapter.active_notifications_enabled());
        gate.remove_interest();
    }

    #[test]
    fn test_adapter_failure_keeps_count_consistent() {
        let adapter = Arc::new(FakeAdapter::new().with_failing_toggle());
        let gate = ActiveNotificationGate::new(adapter.clone(), true);

        gate.add_interest();
        assert!(gate.has_interest());
        gate.remove_interest();
        assert!(!gate.has_interest());
    }

    #[test]
    #[should_panic(expected = "never added")]
    fn test_underflow_panics() {
        let gate = ActiveNotificationGate::new(Arc::new(FakeAdapter::new()), true);
        gate.remove_interest();
    }

    #[test]
    fn test_concurrent_interest_balances_out() {
        let adapter = Arc::new(FakeAdapter::new());
        let gate = Arc::new(ActiveNotificationGate::new(adapter.clone(), true));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        gate.add_interest();
                        gate.remove_interest();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!gate.has_interest());
        assert!(!adapter.active_notifications_enabled());
    }
}
