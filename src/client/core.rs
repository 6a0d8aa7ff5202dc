use super::{
    ClientState, ConnectionManager, ConnectionState, RealtimeClientBuilder, RealtimeClientOptions,
};
use crate::infrastructure::Timer;
use crate::messaging::{EventDispatcher, EventKind, decode_event, encode_command};
use crate::types::{
    Command, EventEnvelope, LISTENER_BUFFER_SIZE, RealtimeError, Result, ViewState,
};
use crate::websocket::{ConnectRequest, Connector, FrameStream, Transport, TransportFrame};
use futures::stream::StreamExt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, mpsc, watch};
use tokio::time;
use url::Url;

/// Lifecycle notifications, delivered in the order the transport produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The first transport of this client opened
    Opened,
    /// A later transport opened; pending commands were already replayed
    Reconnected,
    /// The open transport went away, or the client was closed
    Closed,
    /// Raw text frame, before decoding
    MessageReceived(String),
}

/// Auto-reconnecting connection to the traQ realtime endpoint.
///
/// `RealtimeClient` owns at most one WebSocket at a time. When it drops, the
/// client reconnects with exponential backoff until it succeeds or
/// [`close()`](Self::close) is called, and replays the latest command of each
/// kind on every new connection. Decoded server events are routed through
/// the client's [`EventDispatcher`].
///
/// # Example
///
/// ```no_run
/// use traq_realtime_rs::{RealtimeClient, RealtimeClientOptions, ViewState};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RealtimeClient::new(
///     "wss://q.example.com/api/v3/ws",
///     RealtimeClientOptions {
///         access_token: Some("your-token".to_string()),
///         ..Default::default()
///     },
/// )?;
///
/// client.change_view_state(Some("channel-id"), ViewState::Monitoring).await?;
/// client.connect().await;
/// // Use the client...
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RealtimeClient {
    pub(crate) endpoint: Url,
    pub(crate) options: Arc<RealtimeClientOptions>,
    pub(crate) connector: Arc<dyn Connector>,

    // Connection manager
    pub(crate) connection: Arc<ConnectionManager>,

    // Consolidated mutable state
    pub(crate) state: Arc<RwLock<ClientState>>,

    pub(crate) dispatcher: Arc<EventDispatcher>,
    pub(crate) lifecycle_tx: broadcast::Sender<LifecycleEvent>,
    pub(crate) shutdown_tx: Arc<watch::Sender<bool>>,
}

impl RealtimeClient {
    /// Creates a new client using the tungstenite WebSocket transport.
    ///
    /// No connection is opened until [`connect()`](Self::connect) is called.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::UrlParse`](crate::RealtimeError::UrlParse) if the endpoint
    /// cannot be parsed, and
    /// [`RealtimeError::InvalidOptions`](crate::RealtimeError::InvalidOptions) if it is not
    /// a `ws`/`wss` URL or the options violate `0 < min ≤ max`.
    pub fn new(endpoint: impl AsRef<str>, options: RealtimeClientOptions) -> Result<Self> {
        RealtimeClientBuilder::new(endpoint, options).map(|builder| builder.build())
    }

    /// Starts a builder, e.g. to supply a custom [`Connector`].
    pub fn builder(
        endpoint: impl AsRef<str>,
        options: RealtimeClientOptions,
    ) -> Result<RealtimeClientBuilder> {
        RealtimeClientBuilder::new(endpoint, options)
    }

    /// Starts connecting and returns without waiting for the network.
    ///
    /// Completion is reported as [`LifecycleEvent::Opened`] (or
    /// [`LifecycleEvent::Reconnected`] after an earlier connection). If the
    /// attempt fails the client keeps retrying with backoff. Calling this
    /// while connecting, open or reconnecting does nothing, apart from
    /// lifting an earlier [`close()`](Self::close).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use traq_realtime_rs::{LifecycleEvent, RealtimeClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RealtimeClient::new("wss://q.example.com/api/v3/ws", Default::default())?;
    /// let mut lifecycle = client.lifecycle();
    ///
    /// client.connect().await;
    /// while let Ok(event) = lifecycle.recv().await {
    ///     if event == LifecycleEvent::Opened {
    ///         break;
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(&self) {
        let mut state = self.state.write().await;
        state.was_manual_close = false;
        self.shutdown_tx.send_replace(false);

        if !state.has_watcher() {
            let (lost_tx, lost_rx) = mpsc::unbounded_channel();
            state.connection_lost_tx = Some(lost_tx);

            let client = self.clone();
            state
                .task_manager
                .spawn(async move { client.watch_connection(lost_rx).await });
        }

        if state.reconnecting {
            tracing::debug!("Reconnect loop already running");
            return;
        }
        let current = self.connection.state().await;
        if matches!(current, ConnectionState::Connecting | ConnectionState::Open) {
            return;
        }

        self.connection.set_state(ConnectionState::Connecting).await;
        let client = self.clone();
        state
            .task_manager
            .spawn(async move { client.establish().await });
    }

    /// Records a command and transmits it if the connection is open.
    ///
    /// The command replaces any pending command of the same kind and is
    /// replayed after every (re)connection, so it is never lost while the
    /// client is offline. A failed write is logged; the command stays queued.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::InvalidCommandArgument`](crate::RealtimeError::InvalidCommandArgument)
    /// if an argument contains `:`. Nothing is queued in that case.
    pub async fn send(&self, command: Command) -> Result<()> {
        let frame = encode_command(&command)?;
        let kind = command.kind;

        // The state lock serialises this with replay, so one open never
        // transmits the same command twice
        let mut state = self.state.write().await;
        state.command_queue.record(command);

        if !self.connection.is_open().await {
            tracing::debug!("Not connected, {} command queued for the next open", kind);
            return Ok(());
        }

        if let Err(e) = self.connection.send_frame(frame).await {
            tracing::warn!("Failed to send {} command, keeping it queued: {}", kind, e);
        }
        Ok(())
    }

    /// Announces which channel this client is viewing; `None` for no channel.
    pub async fn change_view_state(
        &self,
        channel_id: Option<&str>,
        state: ViewState,
    ) -> Result<()> {
        self.send(Command::view_state(channel_id, state)).await
    }

    /// Turns the all-public-messages stream on or off.
    pub async fn set_timeline_streaming(&self, enabled: bool) -> Result<()> {
        self.send(Command::timeline_streaming(enabled)).await
    }

    /// Closes the connection and stops reconnecting.
    ///
    /// Background tasks, including a running reconnect loop, are aborted.
    /// Pending commands are kept and replayed if [`connect()`](Self::connect)
    /// is called again.
    ///
    /// # Errors
    ///
    /// Returns an error if the WebSocket close handshake fails (rare).
    pub async fn close(&self) -> Result<()> {
        self.shutdown_tx.send_replace(true);

        let was_open = {
            let mut state = self.state.write().await;
            state.was_manual_close = true;
            state.reconnecting = false;
            state.next_generation();
            state.connection_lost_tx = None;
            state.task_manager.abort_all();
            self.connection.is_open().await
        };

        tracing::info!("Closing connection to {}", self.endpoint);
        let result = self.connection.close().await;
        if was_open {
            self.emit(LifecycleEvent::Closed);
        }
        result
    }

    /// Subscribes to lifecycle events from this point on.
    pub fn lifecycle(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.lifecycle_tx.subscribe()
    }

    /// Registers a queue that receives every event of one type.
    ///
    /// The subscription ends by itself once the receiver is dropped. If the
    /// receiver falls more than its buffer behind, further events are dropped
    /// with a warning.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use traq_realtime_rs::{EventKind, MessageEventBody, RealtimeClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = RealtimeClient::new("wss://q.example.com/api/v3/ws", Default::default())?;
    /// let mut created = client.on(EventKind::MessageCreated);
    /// client.connect().await;
    ///
    /// tokio::spawn(async move {
    ///     while let Some(event) = created.recv().await {
    ///         if let Ok(body) = event.parse_body::<MessageEventBody>() {
    ///             println!("New message {}", body.id);
    ///         }
    ///     }
    /// });
    /// # Ok(())
    /// # }
    /// ```
    pub fn on(&self, kind: impl Into<EventKind>) -> mpsc::Receiver<EventEnvelope> {
        let (tx, rx) = mpsc::channel(LISTENER_BUFFER_SIZE);
        let own_id = Arc::new(OnceLock::new());
        let dispatcher = Arc::downgrade(&self.dispatcher);

        let slot = Arc::clone(&own_id);
        let id = self.dispatcher.subscribe(kind, move |envelope| {
            match tx.try_send(envelope.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Listener for event '{}' is full, dropping event",
                        envelope.kind
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    if let (Some(dispatcher), Some(id)) = (dispatcher.upgrade(), slot.get()) {
                        dispatcher.unsubscribe(&envelope.kind, *id);
                    }
                }
            }
        });
        let _ = own_id.set(id);

        rx
    }

    /// Dispatcher routing decoded server events; subscribe store handlers here.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Checks whether a transport is currently open.
    pub async fn is_open(&self) -> bool {
        self.connection.is_open().await
    }

    pub async fn connection_state(&self) -> ConnectionState {
        self.connection.state().await
    }

    /// Commands that will be replayed on the next open
    pub async fn pending_commands(&self) -> Vec<Command> {
        self.state.read().await.command_queue.replay_all()
    }

    fn emit(&self, event: LifecycleEvent) {
        if self.lifecycle_tx.send(event).is_err() {
            tracing::trace!("No lifecycle listeners");
        }
    }

    fn connect_request(&self) -> ConnectRequest {
        ConnectRequest {
            url: self.endpoint.clone(),
            protocols: self.options.protocols.clone(),
            access_token: self.options.access_token.clone(),
        }
    }

    /// First open attempt started by `connect()`
    async fn establish(&self) {
        tracing::info!("Connecting to {}", self.endpoint);
        if let Err(e) = self.open_transport().await {
            tracing::warn!("Connection attempt failed: {}", e);

            let state = self.state.read().await;
            if !state.was_manual_close {
                self.connection.set_state(ConnectionState::Closed).await;
                state.notify_connection_lost();
            }
        }
    }

    /// Opens a fresh transport, replays pending commands and starts its reader.
    async fn open_transport(&self) -> Result<()> {
        let generation = self.state.write().await.next_generation();
        let request = self.connect_request();
        let timeout = Duration::from_millis(self.options.connection_timeout);

        let Transport { sink, stream } =
            match time::timeout(timeout, self.connector.connect(&request)).await {
                Ok(result) => result?,
                Err(_) => return Err(RealtimeError::ConnectionTimeout(timeout)),
            };

        let mut state = self.state.write().await;
        if state.was_manual_close || state.generation != generation {
            tracing::debug!("Discarding transport of a superseded attempt");
            return Err(RealtimeError::Closed);
        }

        self.connection.set_writer(sink).await;
        self.connection.set_state(ConnectionState::Open).await;
        let reconnected = std::mem::replace(&mut state.initialized, true);

        for command in state.command_queue.replay_all() {
            let replayed = match encode_command(&command) {
                Ok(frame) => self.connection.send_frame(frame).await,
                Err(e) => Err(e),
            };
            if let Err(e) = replayed {
                tracing::warn!("Failed to replay {} command: {}", command.kind, e);
            }
        }

        if reconnected {
            tracing::info!("Reconnected to {}", self.endpoint);
            self.emit(LifecycleEvent::Reconnected);
        } else {
            tracing::info!("Connected to {}", self.endpoint);
            self.emit(LifecycleEvent::Opened);
        }

        // Started last so no frame is reported before the open event
        let client = self.clone();
        state
            .task_manager
            .spawn(async move { client.read_loop(stream, generation).await });
        Ok(())
    }

    async fn read_loop(self, mut stream: FrameStream, generation: u64) {
        tracing::debug!("Starting read task");
        while let Some(item) = stream.next().await {
            match item {
                Ok(TransportFrame::Text(text)) => self.handle_frame(text),
                Ok(TransportFrame::Close(reason)) => {
                    tracing::info!(
                        "Transport closed by server: {}",
                        reason.as_deref().unwrap_or("no reason given")
                    );
                    break;
                }
                Err(e) => {
                    tracing::warn!("Transport read error: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("Read task finished");

        self.handle_transport_closed(generation).await;
    }

    /// Decodes one inbound frame and routes it; undecodable frames are dropped.
    fn handle_frame(&self, text: String) {
        tracing::debug!("Received text message: {}", text);
        let decoded = decode_event(&text);
        if let Err(e) = &decoded {
            tracing::warn!("Failed to parse message: {} - Raw: {}", e, text);
        }

        self.emit(LifecycleEvent::MessageReceived(text));

        if let Ok(envelope) = decoded {
            let delivered = self.dispatcher.publish(&envelope);
            tracing::debug!("Event {} delivered to {} handler(s)", envelope.kind, delivered);
        }
    }

    async fn handle_transport_closed(&self, generation: u64) {
        let state = self.state.read().await;
        if state.was_manual_close || state.generation != generation {
            tracing::debug!("Ignoring end of a stale transport");
            return;
        }

        self.connection.mark_closed().await;
        self.emit(LifecycleEvent::Closed);
        tracing::info!("Connection lost, scheduling reconnect");
        state.notify_connection_lost();
    }

    /// Runs one reconnect loop per lost-connection notification, in order.
    async fn watch_connection(self, mut lost_rx: mpsc::UnboundedReceiver<()>) {
        while lost_rx.recv().await.is_some() {
            self.reconnect().await;
        }
        tracing::debug!("Reconnection watcher task finished");
    }

    /// Retries with backoff until a transport opens or the client is closed.
    ///
    /// Returns at once if a loop is already running or the client is open.
    pub(crate) async fn reconnect(&self) {
        {
            let mut state = self.state.write().await;
            if state.was_manual_close {
                tracing::info!("Manual close detected, will not attempt to reconnect");
                return;
            }
            if state.reconnecting {
                tracing::debug!("Reconnect loop already running");
                return;
            }
            if self.connection.is_open().await {
                tracing::debug!("Already connected, no reconnect needed");
                return;
            }
            state.reconnecting = true;
        }

        self.connection
            .set_state(ConnectionState::Reconnecting)
            .await;
        let mut shutdown = self.shutdown_tx.subscribe();
        let mut timer = Timer::new(
            self.options.min_reconnection_delay,
            self.options.max_reconnection_delay,
        );

        loop {
            let attempt = timer.attempts();
            if !timer.schedule_timeout(&mut shutdown).await {
                tracing::info!("Reconnect cancelled by close");
                break;
            }
            if self.connection.is_open().await {
                tracing::info!("Already connected, stopping reconnection attempts");
                break;
            }

            tracing::info!("Attempting to reconnect (attempt {})...", attempt);
            match self.open_transport().await {
                Ok(()) => break,
                Err(e) => tracing::warn!("Reconnection attempt {} failed: {}", attempt, e),
            }
        }

        self.state.write().await.reconnecting = false;
    }
}
