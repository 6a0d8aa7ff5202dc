// Module declarations
mod builder;
mod connection;
mod core;
mod queue;
mod state;

// Public API exports
pub use builder::{RealtimeClientBuilder, RealtimeClientOptions};
pub use connection::{ConnectionManager, ConnectionState};
pub use self::core::{LifecycleEvent, RealtimeClient};
pub use queue::CommandQueue;
pub use state::ClientState;
