//! netwatch — thread-safe network-change notification core
//!
//! Turns asynchronous, externally-delivered connectivity events into a
//! consistent, point-in-time-queryable view of network state and fans
//! change notifications out to a single subscriber.
//!
//! Architecture:
//! 1. A platform producer (behind [`ProducerAdapter`]) feeds events into
//!    the ingestion entry points of [`NetworkChangeNotifier`]
//! 2. Each event is reconciled into the locked state store and deduplicated
//! 3. If something observable changed, the observer is invoked with no
//!    lock held — callbacks may re-enter any query API
//! 4. The expensive default-network-active stream is only subscribed while
//!    at least one party holds interest through the ref-counted gate
//!
//! No network I/O, no polling, no retries: reconciliation of missed or
//! reordered producer events happens through the idempotent purge entry
//! point.

mod adapter;
mod fake;
mod gate;
mod notifier;
mod observer;
mod state;
mod types;

pub use adapter::{AdapterError, ProducerAdapter};
pub use fake::{FakeAdapter, FakeProducer};
pub use notifier::NetworkChangeNotifier;
pub use observer::NetworkObserver;
pub use types::{ConnectionSubtype, ConnectionType, NetworkHandle};
