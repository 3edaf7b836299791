//! Producer adapter boundary.
//!
//! The platform-specific machinery that actually detects connectivity
//! changes (a JNI-bound service, a netlink listener, a test harness) lives
//! behind this trait. The adapter calls the notifier's ingestion entry
//! points; the notifier calls back through the trait only to probe
//! capabilities and to start/stop the expensive default-network-active
//! stream.

use crate::types::{ConnectionSubtype, ConnectionType};
use thiserror::Error;

/// Errors from the platform side of the adapter.
///
/// These are soft failures: the notifier logs them and keeps its own
/// bookkeeping consistent rather than propagating them to ingestion callers.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("platform bridge unavailable: {0}")]
    BridgeUnavailable(String),

    #[error("default-network-active signaling not supported by this platform")]
    ActiveSignalingUnsupported,
}

/// Capability and control surface of the connectivity producer.
///
/// Implementations must be callable from any thread. The enable/disable pair
/// is invoked while the notification gate's lock is held, so implementations
/// must not call back into [`crate::NetworkChangeNotifier::add_default_network_active_interest`]
/// or its remove counterpart from inside them.
pub trait ProducerAdapter: Send + Sync {
    /// True if the platform could not register per-network callbacks at
    /// startup; per-handle signals (connect/disconnect/purge) will then
    /// never arrive and callers should avoid per-network APIs.
    fn register_network_callback_failed(&self) -> bool {
        false
    }

    /// Whether the platform can report and stream default-network-active
    /// events at all.
    fn supports_default_network_active(&self) -> bool;

    /// Connection type as the platform currently sees it. Probed once at
    /// notifier construction to seed the state store.
    fn current_connection_type(&self) -> ConnectionType;

    /// Connection subtype as the platform currently sees it. Only called
    /// from the thread that owns the notifier.
    fn current_connection_subtype(&self) -> ConnectionSubtype;

    /// Whether the default network is in its high-power ("active") mode
    /// right now. Only meaningful when
    /// [`supports_default_network_active`](Self::supports_default_network_active)
    /// is true.
    fn is_default_network_active(&self) -> bool;

    /// Ask the platform to start emitting default-network-active events.
    fn enable_default_network_active_notifications(&self) -> Result<(), AdapterError>;

    /// Ask the platform to stop emitting default-network-active events.
    fn disable_default_network_active_notifications(&self) -> Result<(), AdapterError>;
}
