use crate::types::constants::{NULL_CHANNEL, commands};
use serde::{Deserialize, Serialize};

/// Outbound state-synchronization commands understood by the server.
///
/// Only the latest command of each kind matters, so the kind doubles as the
/// key of the pending command queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    /// Which channel this client is looking at, and how
    ViewState,
    /// WebRTC session states for a channel
    RtcState,
    /// Whether every public message should be pushed
    TimelineStreaming,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewState => commands::VIEW_STATE,
            Self::RtcState => commands::RTC_STATE,
            Self::TimelineStreaming => commands::TIMELINE_STREAMING,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a user is looking at a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    None,
    Monitoring,
    Editing,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Monitoring => "monitoring",
            Self::Editing => "editing",
        }
    }
}

/// A command and its arguments, before wire encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<I, S>(kind: CommandKind, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `viewstate:<channel>:<state>`; `None` announces that no channel is open.
    pub fn view_state(channel_id: Option<&str>, state: ViewState) -> Self {
        Self::new(
            CommandKind::ViewState,
            [channel_id.unwrap_or(NULL_CHANNEL), state.as_str()],
        )
    }

    /// `rtcstate:<channel>:<state>:<session>...`
    pub fn rtc_state(channel_id: Option<&str>, sessions: &[(&str, &str)]) -> Self {
        let mut args = vec![channel_id.unwrap_or(NULL_CHANNEL).to_string()];
        for (state, session_id) in sessions {
            args.push(state.to_string());
            args.push(session_id.to_string());
        }
        Self {
            kind: CommandKind::RtcState,
            args,
        }
    }

    pub fn timeline_streaming(enabled: bool) -> Self {
        Self::new(
            CommandKind::TimelineStreaming,
            [if enabled { "on" } else { "off" }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_without_channel_uses_null() {
        let command = Command::view_state(None, ViewState::None);
        assert_eq!(command.kind, CommandKind::ViewState);
        assert_eq!(command.args, vec!["null", "none"]);
    }

    #[test]
    fn test_rtc_state_flattens_sessions() {
        let command = Command::rtc_state(
            Some("c1"),
            &[("joined", "s1"), ("calling", "s2")],
        );
        assert_eq!(command.args, vec!["c1", "joined", "s1", "calling", "s2"]);
    }

    #[test]
    fn test_view_state_deserializes_lowercase() {
        let state: ViewState = serde_json::from_str(r#""monitoring""#).unwrap();
        assert_eq!(state, ViewState::Monitoring);
    }
}
