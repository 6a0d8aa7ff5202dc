use super::transport::{ConnectRequest, Connector, Transport, TransportFrame};
use crate::types::{RealtimeError, Result};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt, future};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::{AUTHORIZATION, SEC_WEBSOCKET_PROTOCOL};

/// WebSocket factory for creating WebSocket connections
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketFactory;

impl WebSocketFactory {
    fn header_value(value: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(value)
            .map_err(|e| RealtimeError::InvalidOptions(format!("invalid header value: {}", e)))
    }

    fn map_message(message: Message) -> Option<TransportFrame> {
        match message {
            Message::Text(text) => Some(TransportFrame::Text(text.as_str().to_owned())),
            Message::Close(frame) => {
                if let Some(close_frame) = &frame {
                    tracing::info!(
                        "Server closed connection: code={:?}, reason='{}'",
                        close_frame.code,
                        close_frame.reason.as_str()
                    );
                } else {
                    tracing::warn!("Server closed connection without close frame");
                }
                Some(TransportFrame::Close(
                    frame.map(|close_frame| close_frame.reason.as_str().to_owned()),
                ))
            }
            Message::Ping(data) => {
                tracing::debug!("Received ping ({} bytes)", data.len());
                None
            }
            Message::Pong(data) => {
                tracing::debug!("Received pong ({} bytes)", data.len());
                None
            }
            Message::Binary(data) => {
                tracing::warn!("Received unexpected binary message ({} bytes)", data.len());
                None
            }
            Message::Frame(_) => {
                tracing::debug!("Received raw frame (internal)");
                None
            }
        }
    }
}

#[async_trait]
impl Connector for WebSocketFactory {
    async fn connect(&self, request: &ConnectRequest) -> Result<Transport> {
        let mut ws_request = request.url.as_str().into_client_request()?;
        let headers = ws_request.headers_mut();
        if !request.protocols.is_empty() {
            headers.insert(
                SEC_WEBSOCKET_PROTOCOL,
                Self::header_value(&request.protocols.join(", "))?,
            );
        }
        if let Some(token) = &request.access_token {
            headers.insert(AUTHORIZATION, Self::header_value(&format!("Bearer {}", token))?);
        }

        tracing::debug!("Creating WebSocket connection to: {}", request.url);
        let (ws_stream, _response) = connect_async(ws_request).await?;
        let (write_half, read_half) = ws_stream.split();

        let sink = write_half
            .with(|text: String| future::ok::<_, tungstenite::Error>(Message::Text(text.into())))
            .sink_map_err(RealtimeError::from);

        let stream = read_half.filter_map(|item| {
            future::ready(match item {
                Ok(message) => Self::map_message(message).map(Ok),
                Err(e) => Some(Err(RealtimeError::from(e))),
            })
        });

        Ok(Transport {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        })
    }
}
