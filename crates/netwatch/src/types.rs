//! Core connectivity types shared by the state store, the ingestion entry
//! points and the fake producer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a network's medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// No connectivity at all.
    None,
    Wifi,
    Cellular,
    Ethernet,
    Bluetooth,
    Vpn,
    /// Connected, but the medium could not be classified.
    Unknown,
}

impl ConnectionType {
    /// Whether this type represents any usable connectivity.
    pub fn is_online(&self) -> bool {
        !matches!(self, ConnectionType::None)
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionType::None => "none",
            ConnectionType::Wifi => "wifi",
            ConnectionType::Cellular => "cellular",
            ConnectionType::Ethernet => "ethernet",
            ConnectionType::Bluetooth => "bluetooth",
            ConnectionType::Vpn => "vpn",
            ConnectionType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Finer-grained refinement of [`ConnectionType`] as reported by the
/// platform (cellular generation, wifi standard, ethernet grade).
///
/// Only queryable from the thread that owns the producer adapter; see
/// [`crate::NetworkChangeNotifier::connection_subtype`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionSubtype {
    Unknown,
    None,
    Other,
    Gsm,
    Iden,
    Cdma,
    OneXRtt,
    Gprs,
    Edge,
    Umts,
    EvdoRev0,
    EvdoRevA,
    Hspa,
    EvdoRevB,
    Hsdpa,
    Hsupa,
    Ehrpd,
    Hspap,
    Lte,
    LteAdvanced,
    Bluetooth12,
    Bluetooth21,
    Bluetooth30,
    Bluetooth40,
    Ethernet,
    FastEthernet,
    GigabitEthernet,
    TenGigabitEthernet,
    WifiB,
    WifiG,
    WifiN,
    WifiAc,
    WifiAd,
}

impl ConnectionSubtype {
    /// Coarse [`ConnectionType`] this subtype belongs to.
    pub fn connection_type(&self) -> ConnectionType {
        use ConnectionSubtype::*;
        match self {
            None => ConnectionType::None,
            Unknown | Other => ConnectionType::Unknown,
            Gsm | Iden | Cdma | OneXRtt | Gprs | Edge | Umts | EvdoRev0 | EvdoRevA | Hspa
            | EvdoRevB | Hsdpa | Hsupa | Ehrpd | Hspap | Lte | LteAdvanced => {
                ConnectionType::Cellular
            }
            Bluetooth12 | Bluetooth21 | Bluetooth30 | Bluetooth40 => ConnectionType::Bluetooth,
            Ethernet | FastEthernet | GigabitEthernet | TenGigabitEthernet => {
                ConnectionType::Ethernet
            }
            WifiB | WifiG | WifiN | WifiAc | WifiAd => ConnectionType::Wifi,
        }
    }

    /// Nominal peak bandwidth for this subtype, in Mbps.
    ///
    /// These are the link-layer ceilings of the respective standards, not a
    /// live measurement. An unclassifiable subtype reports infinity so that
    /// consumers never throttle against a made-up number.
    pub fn max_bandwidth_mbps(&self) -> f64 {
        use ConnectionSubtype::*;
        match self {
            None => 0.0,
            Unknown | Other => f64::INFINITY,
            Gsm => 0.01,
            Iden => 0.064,
            Cdma => 0.115,
            OneXRtt => 0.153,
            Gprs => 0.237,
            Edge => 0.384,
            Umts => 2.0,
            EvdoRev0 => 2.46,
            EvdoRevA => 3.1,
            Hspa => 3.6,
            EvdoRevB => 14.7,
            Hsdpa => 14.3,
            Hsupa => 5.76,
            Ehrpd => 21.0,
            Hspap => 42.0,
            Lte => 100.0,
            LteAdvanced => 100.0,
            Bluetooth12 => 1.0,
            Bluetooth21 => 3.0,
            Bluetooth30 => 24.0,
            Bluetooth40 => 1.0,
            Ethernet => 10.0,
            FastEthernet => 100.0,
            GigabitEthernet => 1000.0,
            TenGigabitEthernet => 10000.0,
            WifiB => 11.0,
            WifiG => 54.0,
            WifiN => 600.0,
            WifiAc => 1300.0,
            WifiAd => 7000.0,
        }
    }
}

/// Opaque, producer-assigned identifier for one concrete network attachment.
///
/// Stable for the lifetime of the attachment; carries no ordering semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkHandle(pub i64);

impl NetworkHandle {
    /// Sentinel meaning "no network" / "invalid handle".
    pub const INVALID: NetworkHandle = NetworkHandle(-1);

    /// Whether this handle names an actual network.
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for NetworkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "net({})", self.0)
        } else {
            f.write_str("net(invalid)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_to_type() {
        assert_eq!(
            ConnectionSubtype::Lte.connection_type(),
            ConnectionType::Cellular
        );
        assert_eq!(
            ConnectionSubtype::WifiAc.connection_type(),
            ConnectionType::Wifi
        );
        assert_eq!(
            ConnectionSubtype::GigabitEthernet.connection_type(),
            ConnectionType::Ethernet
        );
        assert_eq!(
            ConnectionSubtype::Bluetooth40.connection_type(),
            ConnectionType::Bluetooth
        );
        assert_eq!(
            ConnectionSubtype::None.connection_type(),
            ConnectionType::None
        );
        assert_eq!(
            ConnectionSubtype::Other.connection_type(),
            ConnectionType::Unknown
        );
    }

    #[test]
    fn test_bandwidth_table_extremes() {
        assert_eq!(ConnectionSubtype::None.max_bandwidth_mbps(), 0.0);
        assert!(ConnectionSubtype::Unknown.max_bandwidth_mbps().is_infinite());
        assert!(
            ConnectionSubtype::Gsm.max_bandwidth_mbps()
                < ConnectionSubtype::Lte.max_bandwidth_mbps()
        );
    }

    #[test]
    fn test_invalid_handle_sentinel() {
        assert!(!NetworkHandle::INVALID.is_valid());
        assert!(NetworkHandle(7).is_valid());
        assert_eq!(NetworkHandle(7).to_string(), "net(7)");
        assert_eq!(NetworkHandle::INVALID.to_string(), "net(invalid)");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ConnectionType::Wifi).unwrap();
        assert_eq!(json, "\"wifi\"");
        let sub: ConnectionSubtype = serde_json::from_str("\"lte\"").unwrap();
        assert_eq!(sub, ConnectionSubtype::Lte);
    }
}
