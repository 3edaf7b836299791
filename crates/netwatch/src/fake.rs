//! Deterministic stand-ins for the platform producer.
//!
//! [`FakeAdapter`] answers the capability and state probes and records
//! whether the active-notification stream is currently subscribed.
//! [`FakeProducer`] simulates producer events by calling the notifier's real
//! ingestion entry points; there is no separate reconciliation path, so
//! anything exercised through the fakes exercises the production logic.

use crate::adapter::{AdapterError, ProducerAdapter};
use crate::notifier::NetworkChangeNotifier;
use crate::types::{ConnectionSubtype, ConnectionType, NetworkHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Scriptable [`ProducerAdapter`] for tests and demos.
pub struct FakeAdapter {
    callback_failed: bool,
    supports_active: bool,
    fail_toggle: bool,
    connection_type: Mutex<ConnectionType>,
    connection_subtype: Mutex<ConnectionSubtype>,
    default_active: AtomicBool,
    stream_enabled: AtomicBool,
}

impl FakeAdapter {
    pub fn new() -> Self {
        Self {
            callback_failed: false,
            supports_active: true,
            fail_toggle: false,
            connection_type: Mutex::new(ConnectionType::Unknown),
            connection_subtype: Mutex::new(ConnectionSubtype::Unknown),
            default_active: AtomicBool::new(false),
            stream_enabled: AtomicBool::new(false),
        }
    }

    /// Pretend per-network callback registration failed at startup.
    pub fn with_callback_registration_failed(mut self) -> Self {
        self.callback_failed = true;
        self
    }

    /// Pretend the platform cannot signal default-network-active at all.
    pub fn without_default_network_active_support(mut self) -> Self {
        self.supports_active = false;
        self
    }

    /// Make the enable/disable calls return an error, to exercise the
    /// soft-failure path.
    pub fn with_failing_toggle(mut self) -> Self {
        self.fail_toggle = true;
        self
    }

    /// Seed the type the adapter reports at notifier construction.
    pub fn with_connection_type(self, connection_type: ConnectionType) -> Self {
        *self.connection_type.lock().unwrap() = connection_type;
        self
    }

    /// Seed the subtype the adapter reports.
    pub fn with_connection_subtype(self, subtype: ConnectionSubtype) -> Self {
        *self.connection_subtype.lock().unwrap() = subtype;
        self
    }

    /// Flip the platform's "default network is in high-power mode" answer.
    pub fn set_default_network_active(&self, active: bool) {
        self.default_active.store(active, Ordering::SeqCst);
    }

    /// Whether the notifier currently has the active stream subscribed.
    pub fn active_notifications_enabled(&self) -> bool {
        self.stream_enabled.load(Ordering::SeqCst)
    }
}

impl Default for FakeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProducerAdapter for FakeAdapter {
    fn register_network_callback_failed(&self) -> bool {
        self.callback_failed
    }

    fn supports_default_network_active(&self) -> bool {
        self.supports_active
    }

    fn current_connection_type(&self) -> ConnectionType {
        *self.connection_type.lock().unwrap()
    }

    fn current_connection_subtype(&self) -> ConnectionSubtype {
        *self.connection_subtype.lock().unwrap()
    }

    fn is_default_network_active(&self) -> bool {
        self.default_active.load(Ordering::SeqCst)
    }

    fn enable_default_network_active_notifications(&self) -> Result<(), AdapterError> {
        if self.fail_toggle {
            return Err(AdapterError::BridgeUnavailable("fake toggle failure".into()));
        }
        self.stream_enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable_default_network_active_notifications(&self) -> Result<(), AdapterError> {
        if self.fail_toggle {
            return Err(AdapterError::BridgeUnavailable("fake toggle failure".into()));
        }
        self.stream_enabled.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Drives a notifier with simulated producer events.
pub struct FakeProducer {
    notifier: Arc<NetworkChangeNotifier>,
}

impl FakeProducer {
    pub fn new(notifier: Arc<NetworkChangeNotifier>) -> Self {
        Self { notifier }
    }

    /// Report generic connectivity without naming a default network.
    pub fn set_online(&self) {
        self.notifier
            .connection_type_changed(ConnectionType::Unknown, self.notifier.default_network());
    }

    /// Report total connectivity loss.
    pub fn set_offline(&self) {
        self.notifier
            .connection_type_changed(ConnectionType::None, NetworkHandle::INVALID);
    }

    /// A network came up.
    pub fn connect_network(&self, handle: NetworkHandle, connection_type: ConnectionType) {
        self.notifier.network_connected(handle, connection_type);
    }

    /// A network announced it is about to go away.
    pub fn soon_to_disconnect(&self, handle: NetworkHandle) {
        self.notifier.network_soon_to_disconnect(handle);
    }

    /// A network went away.
    pub fn disconnect_network(&self, handle: NetworkHandle) {
        self.notifier.network_disconnected(handle);
    }

    /// Producer resynchronization: this list is now the whole truth.
    pub fn purge_network_list(&self, active: &[NetworkHandle]) {
        self.notifier.purge_active_network_list(active);
    }

    /// Make `handle` the default network with the given type.
    pub fn make_default(&self, handle: NetworkHandle, connection_type: ConnectionType) {
        self.notifier.connection_type_changed(connection_type, handle);
    }

    /// The link subtype changed; reports the matching bandwidth ceiling.
    pub fn subtype_changed(&self, subtype: ConnectionSubtype) {
        self.notifier
            .max_bandwidth_changed(subtype.max_bandwidth_mbps(), subtype);
    }

    /// The default network entered high-power mode.
    pub fn default_network_active(&self) {
        self.notifier.default_network_active();
    }
}
