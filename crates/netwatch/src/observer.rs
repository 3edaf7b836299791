//! Single-subscriber registry and lock-free-at-dispatch fan-out.
//!
//! The registry holds a non-owning back-reference (`Weak`) to at most one
//! subscriber. Dispatch copies the slot under the registry lock, releases
//! the lock, then invokes the callback, so a subscriber may freely call back
//! into any query API from inside its handler. Calling `register` or
//! `unregister` from inside a handler is forbidden by contract: it would
//! re-enter the registry lock.

use crate::types::ConnectionType;
use std::sync::{Arc, Mutex, Weak};

/// Callbacks delivered to the single registered subscriber.
///
/// All three are invoked with no internal lock held, on whatever thread the
/// triggering ingestion entry point ran on.
pub trait NetworkObserver: Send + Sync {
    /// The visible connection type changed (including default-network loss).
    fn on_connection_type_changed(&self);

    /// A new bandwidth observation was recorded. Fired for every
    /// measurement, without dedup.
    fn on_max_bandwidth_changed(&self, max_bandwidth_mbps: f64, connection_type: ConnectionType);

    /// The default network entered its high-power mode.
    fn on_default_network_active(&self);
}

/// Holds the one observer slot.
pub(crate) struct ObserverRegistry {
    slot: Mutex<Option<Weak<dyn NetworkObserver>>>,
}

impl ObserverRegistry {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Store the subscriber. Registering while another registration is
    /// outstanding is a programming error and panics.
    pub(crate) fn register(&self, observer: &Arc<dyn NetworkObserver>) {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_some() {
            panic!("observer already registered; unregister it before registering another");
        }
        *slot = Some(Arc::downgrade(observer));
    }

    /// Clear the slot. Panics unless the slot holds exactly this observer.
    pub(crate) fn unregister(&self, observer: &Arc<dyn NetworkObserver>) {
        let mut slot = self.slot.lock().unwrap();
        let registered = match slot.as_ref() {
            Some(weak) => Weak::ptr_eq(weak, &Arc::downgrade(observer)),
            None => false,
        };
        if !registered {
            panic!("unregistering an observer that is not the registered one");
        }
        *slot = None;
    }

    /// Copy the current subscriber out from under the lock. The upgrade
    /// happens after the lock is released by the caller's `if let`.
    pub(crate) fn current(&self) -> Option<Arc<dyn NetworkObserver>> {
        let weak = self.slot.lock().unwrap().clone();
        weak.and_then(|w| w.upgrade())
    }

    pub(crate) fn is_vacant(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}
