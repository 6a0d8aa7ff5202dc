pub mod command;
pub mod constants;
pub mod error;
pub mod message;

pub use command::{Command, CommandKind, ViewState};
pub use constants::*;
pub use error::{RealtimeError, Result};
pub use message::EventEnvelope;
