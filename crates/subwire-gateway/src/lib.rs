pub mod connection;
pub mod registry;

pub use registry::{ConnectionHandle, ConnectionId, Outbound, Registry, ReplacePolicy};
