//! The notification core: ingestion entry points, reconciliation, queries.
//!
//! One producer context feeds connectivity events in; any thread may query
//! the resulting snapshot; a single observer receives change notifications.
//! Every entry point runs its mutation atomically under the state lock,
//! decides under that lock whether anything externally observable changed,
//! releases the lock, and only then invokes the observer. Because the state
//! lock, the observer slot lock and the gate lock are never held together,
//! an observer callback may call back into any query API freely.
//!
//! Notification ordering follows call order for a single producer thread:
//! each entry point completes its locked-mutate-then-dispatch sequence
//! before returning.

use crate::adapter::ProducerAdapter;
use crate::gate::ActiveNotificationGate;
use crate::observer::{NetworkObserver, ObserverRegistry};
use crate::state::{DisconnectOutcome, StateStore};
use crate::types::{ConnectionSubtype, ConnectionType, NetworkHandle};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, info};

/// Thread-safe bridge from producer-delivered connectivity events to a
/// queryable snapshot plus single-subscriber notifications.
pub struct NetworkChangeNotifier {
    adapter: Arc<dyn ProducerAdapter>,
    state: StateStore,
    registry: ObserverRegistry,
    gate: ActiveNotificationGate,
    // Frozen at construction; see ProducerAdapter.
    register_network_callback_failed: bool,
    default_network_active_supported: bool,
    owner_thread: ThreadId,
}

impl NetworkChangeNotifier {
    /// Build a notifier bound to one producer adapter.
    ///
    /// Capability flags are probed once and frozen; the state store is
    /// seeded from the adapter's current view so the first query already
    /// returns something sensible.
    pub fn new(adapter: Arc<dyn ProducerAdapter>) -> Self {
        let register_network_callback_failed = adapter.register_network_callback_failed();
        let default_network_active_supported = adapter.supports_default_network_active();
        let initial_type = adapter.current_connection_type();
        let initial_subtype = adapter.current_connection_subtype();
        info!(
            "network change notifier starting: type={initial_type}, \
             per-network callbacks {}",
            if register_network_callback_failed {
                "unavailable"
            } else {
                "available"
            }
        );
        Self {
            state: StateStore::new(initial_type, initial_subtype.max_bandwidth_mbps(), initial_type),
            registry: ObserverRegistry::new(),
            gate: ActiveNotificationGate::new(adapter.clone(), default_network_active_supported),
            adapter,
            register_network_callback_failed,
            default_network_active_supported,
            owner_thread: thread::current().id(),
        }
    }

    // --- ingestion entry points (producer side) ---

    /// The overall connection type changed; `new_default` names the network
    /// now carrying default-route traffic (or the sentinel). Notifies only
    /// when the visible type actually differs from the stored one.
    pub fn connection_type_changed(&self, new_type: ConnectionType, new_default: NetworkHandle) {
        let changed = self.state.set_connection_type(new_type, new_default);
        debug!("connection type event: {new_type}, default {new_default}, changed={changed}");
        if changed {
            self.dispatch(|observer| observer.on_connection_type_changed());
        }
    }

    /// A new bandwidth measurement arrived. The stored pair is the estimate
    /// together with the type derived from `subtype`; observers are always
    /// notified because a measurement is not a discrete state.
    pub fn max_bandwidth_changed(&self, max_bandwidth_mbps: f64, subtype: ConnectionSubtype) {
        let connection_type = subtype.connection_type();
        self.state
            .set_max_bandwidth(max_bandwidth_mbps, connection_type);
        debug!("max bandwidth event: {max_bandwidth_mbps} Mbps on {connection_type}");
        self.dispatch(|observer| {
            observer.on_max_bandwidth_changed(max_bandwidth_mbps, connection_type)
        });
    }

    /// A network connected, or re-announced itself with a new type. Only a
    /// change to the default network's effective type is observer-visible.
    pub fn network_connected(&self, handle: NetworkHandle, connection_type: ConnectionType) {
        let default_type_changed = self.state.upsert_network(handle, connection_type);
        debug!("{handle} connected as {connection_type}");
        if default_type_changed {
            self.dispatch(|observer| observer.on_connection_type_changed());
        }
    }

    /// Advisory: the producer expects `handle` to disconnect shortly. The
    /// network stays in the map and remains usable.
    pub fn network_soon_to_disconnect(&self, handle: NetworkHandle) {
        debug!("{handle} soon to disconnect");
    }

    /// A network disconnected. Stale or duplicate disconnects are silently
    /// dropped; losing the default network always notifies.
    pub fn network_disconnected(&self, handle: NetworkHandle) {
        match self.state.remove_network(handle) {
            DisconnectOutcome::NotPresent => {
                debug!("stale disconnect for {handle}, ignored");
            }
            DisconnectOutcome::Removed => {
                debug!("{handle} disconnected");
            }
            DisconnectOutcome::RemovedDefault => {
                debug!("{handle} disconnected; was the default network");
                self.dispatch(|observer| observer.on_connection_type_changed());
            }
        }
    }

    /// Producer resynchronization: `active` is the authoritative set of
    /// connected networks. Idempotent; a purge that changes nothing does
    /// not notify.
    pub fn purge_active_network_list(&self, active: &[NetworkHandle]) {
        let changed = self.state.purge_networks(active);
        debug!("purged network list to {} entries, changed={changed}", active.len());
        if changed {
            self.dispatch(|observer| observer.on_connection_type_changed());
        }
    }

    /// The default network entered high-power mode. Instantaneous event;
    /// never deduplicated, but only delivered while someone holds interest
    /// through the gate.
    pub fn default_network_active(&self) {
        if !self.gate.has_interest() {
            debug!("default-network-active event dropped: no interest registered");
            return;
        }
        self.dispatch(|observer| observer.on_default_network_active());
    }

    // --- observer lifecycle ---

    /// Register the single observer. Registering while another observer is
    /// registered is a contract violation and panics. The observer must not
    /// call `register_observer`/`unregister_observer` from inside a
    /// callback; queries are fine.
    pub fn register_observer(&self, observer: &Arc<dyn NetworkObserver>) {
        self.registry.register(observer);
    }

    /// Unregister the observer. Must be called with the currently registered
    /// observer, before either the observer or the notifier is dropped.
    pub fn unregister_observer(&self, observer: &Arc<dyn NetworkObserver>) {
        self.registry.unregister(observer);
    }

    // --- default-network-active interest ---

    /// Declare interest in default-network-active events; the first
    /// interested party causes the producer subscription to be enabled.
    pub fn add_default_network_active_interest(&self) {
        self.gate.add_interest();
    }

    /// Withdraw interest; the last withdrawal disables the subscription.
    pub fn remove_default_network_active_interest(&self) {
        self.gate.remove_interest();
    }

    // --- queries (any thread unless noted) ---

    /// Current visible connection type.
    pub fn connection_type(&self) -> ConnectionType {
        self.state.connection_type()
    }

    /// Latest bandwidth observation: (estimate in Mbps, type at measurement
    /// time).
    pub fn max_bandwidth_and_connection_type(&self) -> (f64, ConnectionType) {
        self.state.max_bandwidth_and_type()
    }

    /// Type of one connected network; `Unknown` when the handle is not
    /// currently connected.
    pub fn network_connection_type(&self, handle: NetworkHandle) -> ConnectionType {
        self.state.network_connection_type(handle)
    }

    /// Handle of the network carrying default-route traffic, or the
    /// sentinel.
    pub fn default_network(&self) -> NetworkHandle {
        self.state.default_network()
    }

    /// Snapshot copy of all currently connected network handles.
    pub fn connected_networks(&self) -> Vec<NetworkHandle> {
        self.state.connected_networks()
    }

    /// Whether the default network is in high-power mode right now. Always
    /// false on platforms without default-network-active support.
    pub fn is_default_network_active(&self) -> bool {
        self.default_network_active_supported && self.adapter.is_default_network_active()
    }

    /// Current connection subtype. Precondition: called from the thread
    /// that constructed this notifier; the platform probe behind it is not
    /// lock-protected.
    pub fn connection_subtype(&self) -> ConnectionSubtype {
        debug_assert_eq!(
            thread::current().id(),
            self.owner_thread,
            "connection_subtype must be queried from the owning thread"
        );
        self.adapter.current_connection_subtype()
    }

    /// True when per-network callbacks could not be registered at startup;
    /// per-handle events will never arrive and callers should avoid
    /// per-network APIs.
    pub fn register_network_callback_failed(&self) -> bool {
        self.register_network_callback_failed
    }

    /// Whether the platform supports default-network-active signaling.
    pub fn supports_default_network_active(&self) -> bool {
        self.default_network_active_supported
    }

    /// Copy the observer out from under the registry lock, then invoke it
    /// with no lock held.
    fn dispatch(&self, deliver: impl FnOnce(&dyn NetworkObserver)) {
        if let Some(observer) = self.registry.current() {
            deliver(observer.as_ref());
        }
    }
}

impl Drop for NetworkChangeNotifier {
    fn drop(&mut self) {
        // Skip the check while unwinding; a second panic would abort.
        if !thread::panicking() {
            debug_assert!(
                self.registry.is_vacant(),
                "notifier dropped with an observer still registered"
            );
        }
    }
}
