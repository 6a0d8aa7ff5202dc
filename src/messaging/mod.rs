// Messaging module - Wire codec, event vocabulary and dispatch
pub mod codec;
pub mod dispatcher;
pub mod event;
pub mod payload;

pub use codec::{decode_event, encode_command, validate_command};
pub use dispatcher::{EventDispatcher, SubscriptionId};
pub use event::EventKind;
pub use payload::{
    ChannelEventBody, ChannelViewer, ChannelViewersChanged, MessageEventBody, MessageStampedBody,
    UserEventBody,
};
