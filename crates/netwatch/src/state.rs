//! Authoritative connectivity snapshot, serialized behind one mutex.
//!
//! Four fields travel together: the current connection type, the latest
//! bandwidth observation (estimate + type at measurement time), the default
//! network handle, and the map of connected networks. Every getter copies
//! out under the lock; every mutator reports whether something externally
//! observable changed so the caller can decide about notifying, after the
//! lock is released.

use crate::types::{ConnectionType, NetworkHandle};
use std::collections::HashMap;
use std::sync::Mutex;

/// Outcome of removing a handle from the network map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisconnectOutcome {
    /// Handle was not in the map; stale or duplicate signal, ignore.
    NotPresent,
    /// A non-default network was removed; internal bookkeeping only.
    Removed,
    /// The default network was removed; default reset to the sentinel.
    RemovedDefault,
}

/// The guarded fields. Only [`StateStore`] touches this.
struct ConnectionState {
    connection_type: ConnectionType,
    max_bandwidth_mbps: f64,
    bandwidth_type: ConnectionType,
    default_network: NetworkHandle,
    networks: HashMap<NetworkHandle, ConnectionType>,
}

/// Thread-safe store for the connectivity snapshot.
pub(crate) struct StateStore {
    inner: Mutex<ConnectionState>,
}

impl StateStore {
    pub(crate) fn new(
        connection_type: ConnectionType,
        max_bandwidth_mbps: f64,
        bandwidth_type: ConnectionType,
    ) -> Self {
        Self {
            inner: Mutex::new(ConnectionState {
                connection_type,
                max_bandwidth_mbps,
                bandwidth_type,
                default_network: NetworkHandle::INVALID,
                networks: HashMap::new(),
            }),
        }
    }

    pub(crate) fn connection_type(&self) -> ConnectionType {
        self.inner.lock().unwrap().connection_type
    }

    pub(crate) fn max_bandwidth_and_type(&self) -> (f64, ConnectionType) {
        let state = self.inner.lock().unwrap();
        (state.max_bandwidth_mbps, state.bandwidth_type)
    }

    /// Type for one handle; `Unknown` when the handle is not connected.
    pub(crate) fn network_connection_type(&self, handle: NetworkHandle) -> ConnectionType {
        self.inner
            .lock()
            .unwrap()
            .networks
            .get(&handle)
            .copied()
            .unwrap_or(ConnectionType::Unknown)
    }

    pub(crate) fn default_network(&self) -> NetworkHandle {
        self.inner.lock().unwrap().default_network
    }

    /// Snapshot of all connected handles, sorted for deterministic output.
    pub(crate) fn connected_networks(&self) -> Vec<NetworkHandle> {
        let state = self.inner.lock().unwrap();
        let mut handles: Vec<NetworkHandle> = state.networks.keys().copied().collect();
        handles.sort_by_key(|h| h.0);
        handles
    }

    /// Apply a connection-type event. Returns true when the visible type
    /// actually changed (the dedup decision).
    ///
    /// A valid default handle that is not yet in the map is upserted with
    /// the announced type: the default network is by definition connected,
    /// and the map must contain it when the lock drops.
    pub(crate) fn set_connection_type(
        &self,
        new_type: ConnectionType,
        new_default: NetworkHandle,
    ) -> bool {
        let mut state = self.inner.lock().unwrap();
        if new_default != state.default_network {
            state.default_network = new_default;
        }
        if new_default.is_valid() {
            state.networks.entry(new_default).or_insert(new_type);
        }
        let changed = state.connection_type != new_type;
        state.connection_type = new_type;
        changed
    }

    /// Store a bandwidth observation. The pair always moves together; there
    /// is no dedup decision because bandwidth is a continuous measurement.
    pub(crate) fn set_max_bandwidth(&self, max_bandwidth_mbps: f64, bandwidth_type: ConnectionType) {
        let mut state = self.inner.lock().unwrap();
        state.max_bandwidth_mbps = max_bandwidth_mbps;
        state.bandwidth_type = bandwidth_type;
    }

    /// Insert or update one network. Returns true when the mutation changed
    /// the default network's effective type, which is the only connect-side
    /// condition that warrants a connection-type notification.
    pub(crate) fn upsert_network(&self, handle: NetworkHandle, new_type: ConnectionType) -> bool {
        let mut state = self.inner.lock().unwrap();
        let previous = state.networks.insert(handle, new_type);
        handle == state.default_network && previous != Some(new_type)
    }

    /// Remove one network if present. Clears the default inside the same
    /// locked operation when it is the one going away.
    pub(crate) fn remove_network(&self, handle: NetworkHandle) -> DisconnectOutcome {
        let mut state = self.inner.lock().unwrap();
        if state.networks.remove(&handle).is_none() {
            return DisconnectOutcome::NotPresent;
        }
        if handle == state.default_network {
            state.default_network = NetworkHandle::INVALID;
            DisconnectOutcome::RemovedDefault
        } else {
            DisconnectOutcome::Removed
        }
    }

    /// Replace the map with one rebuilt from the authoritative handle list,
    /// keeping known types and filling `Unknown` for never-seen handles.
    /// Returns true when anything observable changed; purging twice with the
    /// same list is therefore a reported no-op the second time.
    pub(crate) fn purge_networks(&self, active: &[NetworkHandle]) -> bool {
        let mut state = self.inner.lock().unwrap();
        let rebuilt: HashMap<NetworkHandle, ConnectionType> = active
            .iter()
            .map(|&handle| {
                let known = state
                    .networks
                    .get(&handle)
                    .copied()
                    .unwrap_or(ConnectionType::Unknown);
                (handle, known)
            })
            .collect();
        let mut changed = rebuilt != state.networks;
        state.networks = rebuilt;
        if state.default_network.is_valid() && !state.networks.contains_key(&state.default_network)
        {
            state.default_network = NetworkHandle::INVALID;
            changed = true;
        }
        changed
    }
}
