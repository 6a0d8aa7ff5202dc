use super::queue::CommandQueue;
use crate::infrastructure::TaskManager;
use tokio::sync::mpsc;

/// Consolidated mutable state for RealtimeClient
/// Using a single struct reduces lock contention
pub struct ClientState {
    /// Latest command per kind, replayed on every open
    pub command_queue: CommandQueue,

    /// Background task manager
    pub task_manager: TaskManager,

    /// Bumped for every open attempt and on close; a reader only reports the
    /// loss of its transport while its generation is still current
    pub generation: u64,

    /// Whether a transport has ever opened (distinguishes opened/reconnected)
    pub initialized: bool,

    /// Guard ensuring a single reconnect loop
    pub reconnecting: bool,

    /// Whether the client was closed on purpose (prevents auto-reconnect)
    pub was_manual_close: bool,

    /// Wakes the reconnection watcher task
    pub connection_lost_tx: Option<mpsc::UnboundedSender<()>>,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            command_queue: CommandQueue::new(),
            task_manager: TaskManager::new(),
            generation: 0,
            initialized: false,
            reconnecting: false,
            was_manual_close: false,
            connection_lost_tx: None,
        }
    }

    /// Start a new transport generation and return it
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a reconnection watcher is alive to receive notifications
    pub fn has_watcher(&self) -> bool {
        self.connection_lost_tx
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Notify the reconnection watcher
    pub fn notify_connection_lost(&self) {
        if let Some(tx) = &self.connection_lost_tx
            && tx.send(()).is_err()
        {
            tracing::debug!("Reconnection watcher is gone, could not report lost connection");
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}
