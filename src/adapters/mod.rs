//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the navigation core to the outside world:
//! - `http` - Inbound command routes and the engine event webhook (axum)
//! - `remote` - Outbound clients for the remote collaborators (reqwest)
//! - `storage` - In-memory session registry

pub mod http;
pub mod remote;
pub mod storage;

pub use storage::InMemorySessionStore;
