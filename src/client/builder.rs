use super::{ClientState, ConnectionManager, RealtimeClient};
use crate::messaging::EventDispatcher;
use crate::types::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_RECONNECTION_DELAY, DEFAULT_MIN_RECONNECTION_DELAY,
    LIFECYCLE_BUFFER_SIZE, RealtimeError, Result,
};
use crate::websocket::{Connector, WebSocketFactory};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast, watch};
use url::Url;

/// Connection options. Delays and timeout are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeClientOptions {
    /// Upper bound for the backoff delay
    pub max_reconnection_delay: u64,
    /// Delay before the first reconnect attempt grows from here
    pub min_reconnection_delay: u64,
    /// How long one open attempt may take
    pub connection_timeout: u64,
    /// WebSocket sub-protocols to offer
    pub protocols: Vec<String>,
    /// Bearer token for the handshake
    pub access_token: Option<String>,
}

impl Default for RealtimeClientOptions {
    fn default() -> Self {
        Self {
            max_reconnection_delay: DEFAULT_MAX_RECONNECTION_DELAY,
            min_reconnection_delay: DEFAULT_MIN_RECONNECTION_DELAY,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            protocols: Vec::new(),
            access_token: None,
        }
    }
}

impl RealtimeClientOptions {
    /// Checks `0 < min ≤ max` and a non-zero timeout
    pub fn validate(&self) -> Result<()> {
        if self.min_reconnection_delay == 0 {
            return Err(RealtimeError::InvalidOptions(
                "min_reconnection_delay must be positive".to_string(),
            ));
        }
        if self.min_reconnection_delay > self.max_reconnection_delay {
            return Err(RealtimeError::InvalidOptions(format!(
                "min_reconnection_delay ({}) exceeds max_reconnection_delay ({})",
                self.min_reconnection_delay, self.max_reconnection_delay
            )));
        }
        if self.connection_timeout == 0 {
            return Err(RealtimeError::InvalidOptions(
                "connection_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for RealtimeClient that handles initialization
pub struct RealtimeClientBuilder {
    endpoint: Url,
    options: RealtimeClientOptions,
    connector: Arc<dyn Connector>,
}

impl RealtimeClientBuilder {
    /// Create a new builder
    pub fn new(endpoint: impl AsRef<str>, options: RealtimeClientOptions) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        if !matches!(endpoint.scheme(), "ws" | "wss") {
            return Err(RealtimeError::InvalidOptions(format!(
                "endpoint scheme must be ws or wss, got '{}'",
                endpoint.scheme()
            )));
        }

        options.validate()?;

        Ok(Self {
            endpoint,
            options,
            connector: Arc::new(WebSocketFactory),
        })
    }

    /// Replace the transport used to open connections
    pub fn connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    /// Build the client. No connection is opened until `connect()`.
    pub fn build(self) -> RealtimeClient {
        let (lifecycle_tx, _) = broadcast::channel(LIFECYCLE_BUFFER_SIZE);
        let (shutdown_tx, _) = watch::channel(false);

        RealtimeClient {
            endpoint: self.endpoint,
            options: Arc::new(self.options),
            connector: self.connector,
            connection: Arc::new(ConnectionManager::new()),
            state: Arc::new(RwLock::new(ClientState::new())),
            dispatcher: Arc::new(EventDispatcher::new()),
            lifecycle_tx,
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RealtimeClientOptions::default();
        assert_eq!(options.max_reconnection_delay, 10000);
        assert_eq!(options.min_reconnection_delay, 1000);
        assert_eq!(options.connection_timeout, 4000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_caller_options_take_precedence() {
        let builder = RealtimeClientBuilder::new(
            "wss://q.example.com/api/v3/ws",
            RealtimeClientOptions {
                min_reconnection_delay: 200,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(builder.options.min_reconnection_delay, 200);
        assert_eq!(builder.options.max_reconnection_delay, 10000);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let cases = [
            RealtimeClientOptions {
                min_reconnection_delay: 0,
                ..Default::default()
            },
            RealtimeClientOptions {
                min_reconnection_delay: 5000,
                max_reconnection_delay: 4000,
                ..Default::default()
            },
            RealtimeClientOptions {
                connection_timeout: 0,
                ..Default::default()
            },
        ];

        for options in cases {
            assert!(matches!(
                RealtimeClientBuilder::new("ws://localhost:3000/api/v3/ws", options),
                Err(RealtimeError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn test_endpoint_must_be_websocket_url() {
        assert!(matches!(
            RealtimeClientBuilder::new("not a url", Default::default()),
            Err(RealtimeError::UrlParse(_))
        ));
        assert!(matches!(
            RealtimeClientBuilder::new("https://q.example.com/api/v3/ws", Default::default()),
            Err(RealtimeError::InvalidOptions(_))
        ));
    }
}
