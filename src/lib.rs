//! # traQ Realtime Rust
//!
//! An auto-reconnecting WebSocket client for the traQ realtime push channel.
//!
//! The client keeps a single connection alive, retries with exponential
//! backoff when it drops, replays the latest command of each kind after every
//! reconnect and routes decoded server events to subscribers.
//!
//! ## Example
//!
//! ```no_run
//! use traq_realtime_rs::{EventKind, RealtimeClient, RealtimeClientOptions, ViewState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RealtimeClient::new(
//!         "wss://q.example.com/api/v3/ws",
//!         RealtimeClientOptions {
//!             access_token: Some("your-token".to_string()),
//!             ..Default::default()
//!         }
//!     )?;
//!
//!     let mut messages = client.on(EventKind::MessageCreated);
//!     client.change_view_state(Some("channel-id"), ViewState::Monitoring).await?;
//!     client.connect().await;
//!
//!     while let Some(event) = messages.recv().await {
//!         println!("{}: {}", event.kind, event.body);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod infrastructure;
pub mod messaging;
pub mod types;
pub mod websocket;

pub use client::{
    ConnectionState, LifecycleEvent, RealtimeClient, RealtimeClientBuilder, RealtimeClientOptions,
};
pub use messaging::{
    ChannelEventBody, ChannelViewer, ChannelViewersChanged, EventDispatcher, EventKind,
    MessageEventBody, MessageStampedBody, SubscriptionId, UserEventBody,
};
pub use types::{Command, CommandKind, EventEnvelope, RealtimeError, Result, ViewState};
pub use websocket::{Connector, WebSocketFactory};
