use crate::types::ViewState;
use serde::{Deserialize, Serialize};

/// Body of `MESSAGE_CREATED`, `MESSAGE_UPDATED`, `MESSAGE_DELETED`, ...
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageEventBody {
    pub id: String,
}

/// Body of `CHANNEL_CREATED`, `CHANNEL_UPDATED`, `CHANNEL_STARED`, ...
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelEventBody {
    pub id: String,
}

/// Body of `USER_ONLINE`, `USER_OFFLINE`, `USER_JOINED`, ...
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserEventBody {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelViewer {
    pub user_id: String,
    pub state: ViewState,
    pub updated_at: String,
}

/// Body of `CHANNEL_VIEWERS_CHANGED`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelViewersChanged {
    /// Channel id
    pub id: String,
    #[serde(default)]
    pub viewers: Vec<ChannelViewer>,
}

/// Body of `MESSAGE_STAMPED`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageStampedBody {
    pub message_id: String,
    pub user_id: String,
    pub stamp_id: String,
    pub count: u32,
    pub created_at: String,
}
