//! Connectivity scenarios: scripted producer-event sequences that are
//! replayed through the fake-injection surface.

use anyhow::{Context, Result};
use netwatch::{ConnectionSubtype, ConnectionType, FakeProducer, NetworkHandle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One simulated producer event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Step {
    Connect {
        handle: i64,
        connection_type: ConnectionType,
    },
    SoonToDisconnect {
        handle: i64,
    },
    Disconnect {
        handle: i64,
    },
    MakeDefault {
        handle: i64,
        connection_type: ConnectionType,
    },
    Purge {
        handles: Vec<i64>,
    },
    SubtypeChanged {
        subtype: ConnectionSubtype,
    },
    DefaultNetworkActive,
    Offline,
    Online,
}

/// A named sequence of simulated events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&raw)
            .with_context(|| format!("parsing scenario file {}", path.display()))?;
        Ok(scenario)
    }

    /// The built-in demo: wifi comes up, cellular joins, the default flips,
    /// the producer resynchronizes, and everything goes away.
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            steps: vec![
                Step::Connect {
                    handle: 1,
                    connection_type: ConnectionType::Wifi,
                },
                Step::MakeDefault {
                    handle: 1,
                    connection_type: ConnectionType::Wifi,
                },
                Step::SubtypeChanged {
                    subtype: ConnectionSubtype::WifiAc,
                },
                Step::DefaultNetworkActive,
                Step::Connect {
                    handle: 2,
                    connection_type: ConnectionType::Cellular,
                },
                Step::SoonToDisconnect { handle: 1 },
                Step::MakeDefault {
                    handle: 2,
                    connection_type: ConnectionType::Cellular,
                },
                Step::SubtypeChanged {
                    subtype: ConnectionSubtype::Lte,
                },
                Step::Disconnect { handle: 1 },
                Step::Purge { handles: vec![2] },
                Step::Offline,
            ],
        }
    }

    /// Feed every step through the fake producer in order.
    pub fn replay(&self, producer: &FakeProducer) {
        info!("replaying scenario '{}' ({} steps)", self.name, self.steps.len());
        for step in &self.steps {
            info!("-> {step:?}");
            match step {
                Step::Connect {
                    handle,
                    connection_type,
                } => producer.connect_network(NetworkHandle(*handle), *connection_type),
                Step::SoonToDisconnect { handle } => {
                    producer.soon_to_disconnect(NetworkHandle(*handle))
                }
                Step::Disconnect { handle } => {
                    producer.disconnect_network(NetworkHandle(*handle))
                }
                Step::MakeDefault {
                    handle,
                    connection_type,
                } => producer.make_default(NetworkHandle(*handle), *connection_type),
                Step::Purge { handles } => {
                    let handles: Vec<NetworkHandle> =
                        handles.iter().map(|&h| NetworkHandle(h)).collect();
                    producer.purge_network_list(&handles);
                }
                Step::SubtypeChanged { subtype } => producer.subtype_changed(*subtype),
                Step::DefaultNetworkActive => producer.default_network_active(),
                Step::Offline => producer.set_offline(),
                Step::Online => producer.set_online(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netwatch::{FakeAdapter, NetworkChangeNotifier};
    use std::sync::Arc;

    #[test]
    fn test_scenario_roundtrips_through_json() {
        let json = r#"{
            "name": "wifi-up",
            "steps": [
                { "event": "connect", "handle": 1, "connection_type": "wifi" },
                { "event": "make_default", "handle": 1, "connection_type": "wifi" },
                { "event": "subtype_changed", "subtype": "wifi_n" },
                { "event": "purge", "handles": [1] },
                { "event": "offline" }
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.name, "wifi-up");
        assert_eq!(scenario.steps.len(), 5);

        let reencoded = serde_json::to_string(&scenario).unwrap();
        let again: Scenario = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(again.steps.len(), 5);
    }

    #[test]
    fn test_builtin_scenario_ends_offline() {
        let notifier = Arc::new(NetworkChangeNotifier::new(Arc::new(FakeAdapter::new())));
        let producer = FakeProducer::new(notifier.clone());

        Scenario::builtin().replay(&producer);

        assert_eq!(notifier.connection_type(), ConnectionType::None);
        assert_eq!(notifier.default_network(), NetworkHandle::INVALID);
        assert_eq!(notifier.connected_networks(), vec![NetworkHandle(2)]);
    }
}
