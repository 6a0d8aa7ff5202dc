/// Outbound command names (magic strings layer)
pub mod commands {
    pub const VIEW_STATE: &str = "viewstate";
    pub const RTC_STATE: &str = "rtcstate";
    pub const TIMELINE_STREAMING: &str = "timeline_streaming";
}

/// Server push event types (magic strings layer)
pub mod server_events {
    pub const USER_JOINED: &str = "USER_JOINED";
    pub const USER_LEFT: &str = "USER_LEFT";
    pub const USER_TAGS_UPDATED: &str = "USER_TAGS_UPDATED";
    pub const USER_ICON_UPDATED: &str = "USER_ICON_UPDATED";
    pub const USER_WEBRTC_STATE_CHANGED: &str = "USER_WEBRTC_STATE_CHANGED";
    pub const USER_VIEWSTATE_CHANGED: &str = "USER_VIEWSTATE_CHANGED";
    pub const USER_ONLINE: &str = "USER_ONLINE";
    pub const USER_OFFLINE: &str = "USER_OFFLINE";
    pub const CHANNEL_CREATED: &str = "CHANNEL_CREATED";
    pub const CHANNEL_UPDATED: &str = "CHANNEL_UPDATED";
    pub const CHANNEL_DELETED: &str = "CHANNEL_DELETED";
    pub const CHANNEL_STARED: &str = "CHANNEL_STARED";
    pub const CHANNEL_UNSTARED: &str = "CHANNEL_UNSTARED";
    pub const CHANNEL_VIEWERS_CHANGED: &str = "CHANNEL_VIEWERS_CHANGED";
    pub const CHANNEL_SUBSCRIBERS_CHANGED: &str = "CHANNEL_SUBSCRIBERS_CHANGED";
    pub const MESSAGE_CREATED: &str = "MESSAGE_CREATED";
    pub const MESSAGE_UPDATED: &str = "MESSAGE_UPDATED";
    pub const MESSAGE_DELETED: &str = "MESSAGE_DELETED";
    pub const MESSAGE_PINNED: &str = "MESSAGE_PINNED";
    pub const MESSAGE_UNPINNED: &str = "MESSAGE_UNPINNED";
    pub const MESSAGE_STAMPED: &str = "MESSAGE_STAMPED";
    pub const MESSAGE_UNSTAMPED: &str = "MESSAGE_UNSTAMPED";
    pub const MESSAGE_READ: &str = "MESSAGE_READ";
    pub const STAMP_CREATED: &str = "STAMP_CREATED";
    pub const STAMP_UPDATED: &str = "STAMP_UPDATED";
    pub const STAMP_DELETED: &str = "STAMP_DELETED";
    pub const CLIP_FOLDER_CREATED: &str = "CLIP_FOLDER_CREATED";
    pub const CLIP_FOLDER_UPDATED: &str = "CLIP_FOLDER_UPDATED";
    pub const CLIP_FOLDER_DELETED: &str = "CLIP_FOLDER_DELETED";
    pub const CLIP_FOLDER_MESSAGE_ADDED: &str = "CLIP_FOLDER_MESSAGE_ADDED";
    pub const CLIP_FOLDER_MESSAGE_DELETED: &str = "CLIP_FOLDER_MESSAGE_DELETED";
}

/// Separator between a command name and its arguments
pub const COMMAND_DELIMITER: char = ':';

/// Placeholder channel argument meaning "no channel"
pub const NULL_CHANNEL: &str = "null";

/// Default maximum reconnection delay (milliseconds)
pub const DEFAULT_MAX_RECONNECTION_DELAY: u64 = 10000;

/// Default minimum reconnection delay (milliseconds)
pub const DEFAULT_MIN_RECONNECTION_DELAY: u64 = 1000;

/// Default connection timeout (milliseconds)
pub const DEFAULT_CONNECTION_TIMEOUT: u64 = 4000;

/// Growth factor between consecutive reconnection delays
pub const RECONNECT_BACKOFF_FACTOR: f64 = 1.3;

/// Capacity of the lifecycle broadcast channel
pub const LIFECYCLE_BUFFER_SIZE: usize = 256;

/// Capacity of each `on()` listener queue
pub const LISTENER_BUFFER_SIZE: usize = 100;

/// WebSocket close codes
pub const WS_CLOSE_NORMAL: u16 = 1000;
