use crate::types::Result;
use async_trait::async_trait;
use futures::{Sink, Stream};
use std::pin::Pin;
use url::Url;

/// Write half of a transport: accepts outbound text frames.
pub type FrameSink = Pin<Box<dyn Sink<String, Error = crate::RealtimeError> + Send>>;

/// Read half of a transport: yields inbound frames until the peer goes away.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<TransportFrame>> + Send>>;

/// Inbound frames the client cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFrame {
    Text(String),
    /// Peer sent a close frame, with its reason if any
    Close(Option<String>),
}

/// An opened duplex connection
pub struct Transport {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

/// Everything needed to open the connection
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    pub url: Url,
    /// Offered in `Sec-WebSocket-Protocol`
    pub protocols: Vec<String>,
    /// Sent as `Authorization: Bearer <token>`
    pub access_token: Option<String>,
}

/// Opens transports. Each call must return a fresh connection.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, request: &ConnectRequest) -> Result<Transport>;
}
