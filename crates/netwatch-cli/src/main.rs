//! netwatch demo driver.
//!
//! Sets up logging, builds a notifier over a fake producer adapter, replays
//! a connectivity scenario (built-in, or a JSON file given as the first
//! argument) and logs every observer callback plus the final snapshot.

mod scenario;

use anyhow::Result;
use netwatch::{
    ConnectionType, FakeAdapter, FakeProducer, NetworkChangeNotifier, NetworkObserver,
};
use scenario::Scenario;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Observer that logs every notification it receives.
struct LoggingObserver;

impl NetworkObserver for LoggingObserver {
    fn on_connection_type_changed(&self) {
        info!("observer: connection type changed");
    }

    fn on_max_bandwidth_changed(&self, max_bandwidth_mbps: f64, connection_type: ConnectionType) {
        info!("observer: max bandwidth now {max_bandwidth_mbps} Mbps on {connection_type}");
    }

    fn on_default_network_active(&self) {
        info!("observer: default network went active");
    }
}

fn main() -> Result<()> {
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .compact()
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(&PathBuf::from(path))?,
        None => Scenario::builtin(),
    };

    let adapter = Arc::new(FakeAdapter::new());
    let notifier = Arc::new(NetworkChangeNotifier::new(adapter));
    let observer: Arc<dyn NetworkObserver> = Arc::new(LoggingObserver);
    notifier.register_observer(&observer);
    notifier.add_default_network_active_interest();

    let producer = FakeProducer::new(notifier.clone());
    scenario.replay(&producer);

    info!("final snapshot:");
    info!("  connection type: {}", notifier.connection_type());
    let (mbps, bandwidth_type) = notifier.max_bandwidth_and_connection_type();
    info!("  max bandwidth: {mbps} Mbps (measured on {bandwidth_type})");
    info!("  default network: {}", notifier.default_network());
    for handle in notifier.connected_networks() {
        info!(
            "  connected: {handle} ({})",
            notifier.network_connection_type(handle)
        );
    }

    notifier.remove_default_network_active_interest();
    notifier.unregister_observer(&observer);
    Ok(())
}
