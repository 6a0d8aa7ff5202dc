use crate::types::{RealtimeError, Result};
use crate::websocket::FrameSink;
use futures::SinkExt;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// `connect()` was never called
    Uninitialized,
    Connecting,
    Open,
    /// Lost or closed; a reconnect may follow
    Closed,
    /// The reconnect loop is running
    Reconnecting,
    Closing,
}

/// Owns the write half of the single live transport.
pub struct ConnectionManager {
    writer: Mutex<Option<FrameSink>>,
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(None),
            state: RwLock::new(ConnectionState::Uninitialized),
        }
    }

    /// Installs the writer of a freshly opened transport, dropping the previous one
    pub async fn set_writer(&self, writer: FrameSink) {
        let mut ws = self.writer.lock().await;
        *ws = Some(writer);
    }

    /// Gets the current connection state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Sets the connection state
    pub async fn set_state(&self, new_state: ConnectionState) {
        let mut state = self.state.write().await;
        if *state != new_state {
            tracing::debug!("Connection state {:?} -> {:?}", *state, new_state);
        }
        *state = new_state;
    }

    /// Checks if currently connected
    pub async fn is_open(&self) -> bool {
        *self.state.read().await == ConnectionState::Open
    }

    /// Writes one text frame to the live transport
    pub async fn send_frame(&self, frame: String) -> Result<()> {
        let mut ws_guard = self.writer.lock().await;
        let Some(ws) = ws_guard.as_mut() else {
            return Err(RealtimeError::NotConnected);
        };

        tracing::debug!("Sending frame: {}", frame);
        ws.send(frame).await
    }

    /// Forgets the transport after it went away on its own
    pub async fn mark_closed(&self) {
        self.writer.lock().await.take();
        self.set_state(ConnectionState::Closed).await;
    }

    /// Closes the transport gracefully
    pub async fn close(&self) -> Result<()> {
        self.set_state(ConnectionState::Closing).await;

        let writer = self.writer.lock().await.take();
        let result = match writer {
            Some(mut ws) => ws.close().await,
            None => Ok(()),
        };

        self.set_state(ConnectionState::Closed).await;
        result
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::channel::mpsc;

    fn sink_pair() -> (FrameSink, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded::<String>();
        let sink: FrameSink = Box::pin(
            tx.sink_map_err(|_| RealtimeError::Connection("receiver dropped".to_string())),
        );
        (sink, rx)
    }

    #[tokio::test]
    async fn test_send_without_writer_is_not_connected() {
        let connection = ConnectionManager::new();
        assert_eq!(connection.state().await, ConnectionState::Uninitialized);
        assert!(matches!(
            connection.send_frame("viewstate".to_string()).await,
            Err(RealtimeError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_send_and_close() {
        let connection = ConnectionManager::new();
        let (sink, mut rx) = sink_pair();
        connection.set_writer(sink).await;
        connection.set_state(ConnectionState::Open).await;
        assert!(connection.is_open().await);

        connection
            .send_frame("timeline_streaming:on".to_string())
            .await
            .unwrap();
        assert_eq!(rx.next().await.as_deref(), Some("timeline_streaming:on"));

        connection.close().await.unwrap();
        assert_eq!(connection.state().await, ConnectionState::Closed);
        // Sink closed: the receiving side terminates
        assert_eq!(rx.next().await, None);
    }

    #[tokio::test]
    async fn test_set_writer_replaces_previous_transport() {
        let connection = ConnectionManager::new();
        let (first, mut first_rx) = sink_pair();
        let (second, mut second_rx) = sink_pair();

        connection.set_writer(first).await;
        connection.set_writer(second).await;
        connection.send_frame("x".to_string()).await.unwrap();

        assert_eq!(first_rx.next().await, None);
        assert_eq!(second_rx.next().await.as_deref(), Some("x"));
    }
}
