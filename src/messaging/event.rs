use crate::types::constants::server_events;
use serde::{Deserialize, Serialize};

/// Type-safe server event types
///
/// Unknown types are kept verbatim in [`EventKind::Custom`] so that a newer
/// server never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    UserJoined,
    UserLeft,
    UserTagsUpdated,
    UserIconUpdated,
    UserWebrtcStateChanged,
    UserViewstateChanged,
    UserOnline,
    UserOffline,
    ChannelCreated,
    ChannelUpdated,
    ChannelDeleted,
    ChannelStared,
    ChannelUnstared,
    ChannelViewersChanged,
    ChannelSubscribersChanged,
    MessageCreated,
    MessageUpdated,
    MessageDeleted,
    MessagePinned,
    MessageUnpinned,
    MessageStamped,
    MessageUnstamped,
    MessageRead,
    StampCreated,
    StampUpdated,
    StampDeleted,
    ClipFolderCreated,
    ClipFolderUpdated,
    ClipFolderDeleted,
    ClipFolderMessageAdded,
    ClipFolderMessageDeleted,

    /// Event type this crate has no variant for
    Custom(String),
}

impl EventKind {
    /// Parse a wire string into an EventKind
    pub fn parse(s: &str) -> Self {
        use server_events::*;
        match s {
            USER_JOINED => Self::UserJoined,
            USER_LEFT => Self::UserLeft,
            USER_TAGS_UPDATED => Self::UserTagsUpdated,
            USER_ICON_UPDATED => Self::UserIconUpdated,
            USER_WEBRTC_STATE_CHANGED => Self::UserWebrtcStateChanged,
            USER_VIEWSTATE_CHANGED => Self::UserViewstateChanged,
            USER_ONLINE => Self::UserOnline,
            USER_OFFLINE => Self::UserOffline,
            CHANNEL_CREATED => Self::ChannelCreated,
            CHANNEL_UPDATED => Self::ChannelUpdated,
            CHANNEL_DELETED => Self::ChannelDeleted,
            CHANNEL_STARED => Self::ChannelStared,
            CHANNEL_UNSTARED => Self::ChannelUnstared,
            CHANNEL_VIEWERS_CHANGED => Self::ChannelViewersChanged,
            CHANNEL_SUBSCRIBERS_CHANGED => Self::ChannelSubscribersChanged,
            MESSAGE_CREATED => Self::MessageCreated,
            MESSAGE_UPDATED => Self::MessageUpdated,
            MESSAGE_DELETED => Self::MessageDeleted,
            MESSAGE_PINNED => Self::MessagePinned,
            MESSAGE_UNPINNED => Self::MessageUnpinned,
            MESSAGE_STAMPED => Self::MessageStamped,
            MESSAGE_UNSTAMPED => Self::MessageUnstamped,
            MESSAGE_READ => Self::MessageRead,
            STAMP_CREATED => Self::StampCreated,
            STAMP_UPDATED => Self::StampUpdated,
            STAMP_DELETED => Self::StampDeleted,
            CLIP_FOLDER_CREATED => Self::ClipFolderCreated,
            CLIP_FOLDER_UPDATED => Self::ClipFolderUpdated,
            CLIP_FOLDER_DELETED => Self::ClipFolderDeleted,
            CLIP_FOLDER_MESSAGE_ADDED => Self::ClipFolderMessageAdded,
            CLIP_FOLDER_MESSAGE_DELETED => Self::ClipFolderMessageDeleted,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Convert event to its wire representation
    pub fn as_str(&self) -> &str {
        use server_events::*;
        match self {
            Self::UserJoined => USER_JOINED,
            Self::UserLeft => USER_LEFT,
            Self::UserTagsUpdated => USER_TAGS_UPDATED,
            Self::UserIconUpdated => USER_ICON_UPDATED,
            Self::UserWebrtcStateChanged => USER_WEBRTC_STATE_CHANGED,
            Self::UserViewstateChanged => USER_VIEWSTATE_CHANGED,
            Self::UserOnline => USER_ONLINE,
            Self::UserOffline => USER_OFFLINE,
            Self::ChannelCreated => CHANNEL_CREATED,
            Self::ChannelUpdated => CHANNEL_UPDATED,
            Self::ChannelDeleted => CHANNEL_DELETED,
            Self::ChannelStared => CHANNEL_STARED,
            Self::ChannelUnstared => CHANNEL_UNSTARED,
            Self::ChannelViewersChanged => CHANNEL_VIEWERS_CHANGED,
            Self::ChannelSubscribersChanged => CHANNEL_SUBSCRIBERS_CHANGED,
            Self::MessageCreated => MESSAGE_CREATED,
            Self::MessageUpdated => MESSAGE_UPDATED,
            Self::MessageDeleted => MESSAGE_DELETED,
            Self::MessagePinned => MESSAGE_PINNED,
            Self::MessageUnpinned => MESSAGE_UNPINNED,
            Self::MessageStamped => MESSAGE_STAMPED,
            Self::MessageUnstamped => MESSAGE_UNSTAMPED,
            Self::MessageRead => MESSAGE_READ,
            Self::StampCreated => STAMP_CREATED,
            Self::StampUpdated => STAMP_UPDATED,
            Self::StampDeleted => STAMP_DELETED,
            Self::ClipFolderCreated => CLIP_FOLDER_CREATED,
            Self::ClipFolderUpdated => CLIP_FOLDER_UPDATED,
            Self::ClipFolderDeleted => CLIP_FOLDER_DELETED,
            Self::ClipFolderMessageAdded => CLIP_FOLDER_MESSAGE_ADDED,
            Self::ClipFolderMessageDeleted => CLIP_FOLDER_MESSAGE_DELETED,
            Self::Custom(s) => s,
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
