//! Scripted in-memory connector for exercising the client without a server.

use super::transport::{ConnectRequest, Connector, Transport, TransportFrame};
use crate::types::{RealtimeError, Result};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::time::Instant;

/// What the next `connect()` call does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Accept,
    Reject,
    /// Never completes; only the connection timeout ends it
    Hang,
}

/// The server side of an accepted connection
pub(crate) struct MockPeer {
    /// Frames the client wrote
    pub outbound: mpsc::UnboundedReceiver<String>,
    /// Frames to push to the client; drop it to simulate a lost connection
    pub inbound: mpsc::UnboundedSender<Result<TransportFrame>>,
}

impl MockPeer {
    /// Everything the client has written so far, without waiting.
    pub fn drain(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(Some(frame)) = self.outbound.try_next() {
            frames.push(frame);
        }
        frames
    }

    pub fn push_text(&self, text: &str) {
        let _ = self
            .inbound
            .unbounded_send(Ok(TransportFrame::Text(text.to_string())));
    }
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Outcome>,
    fallback: Option<Outcome>,
    attempts: Vec<Instant>,
    peers: VecDeque<MockPeer>,
}

#[derive(Clone, Default)]
pub(crate) struct MockConnector {
    state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    /// Outcomes for the next calls, in order; afterwards every call accepts.
    pub fn scripted(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let connector = Self::default();
        connector.state.lock().script.extend(outcomes);
        connector
    }

    /// Outcome used once the script runs out
    pub fn then_always(self, outcome: Outcome) -> Self {
        self.state.lock().fallback = Some(outcome);
        self
    }

    pub fn push_outcomes(&self, outcomes: impl IntoIterator<Item = Outcome>) {
        self.state.lock().script.extend(outcomes);
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().attempts.len()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.state.lock().attempts.clone()
    }

    /// Takes the oldest accepted connection not taken yet.
    pub fn take_peer(&self) -> Option<MockPeer> {
        self.state.lock().peers.pop_front()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _request: &ConnectRequest) -> Result<Transport> {
        let outcome = {
            let mut state = self.state.lock();
            state.attempts.push(Instant::now());
            let fallback = state.fallback.unwrap_or(Outcome::Accept);
            state.script.pop_front().unwrap_or(fallback)
        };

        match outcome {
            Outcome::Accept => {
                let (out_tx, out_rx) = mpsc::unbounded::<String>();
                let (in_tx, in_rx) = mpsc::unbounded::<Result<TransportFrame>>();
                self.state.lock().peers.push_back(MockPeer {
                    outbound: out_rx,
                    inbound: in_tx,
                });

                Ok(Transport {
                    sink: Box::pin(out_tx.sink_map_err(|_| {
                        RealtimeError::Connection("mock peer went away".to_string())
                    })),
                    stream: in_rx.boxed(),
                })
            }
            Outcome::Reject => Err(RealtimeError::Connection("connection refused".to_string())),
            Outcome::Hang => std::future::pending().await,
        }
    }
}
