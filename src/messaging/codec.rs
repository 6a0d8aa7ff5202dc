use crate::types::{COMMAND_DELIMITER, Command, EventEnvelope, RealtimeError, Result};

/// Encodes a command as a single text frame: `kind:arg1:arg2...`.
///
/// Arguments are not escaped; one containing the delimiter is rejected.
pub fn encode_command(command: &Command) -> Result<String> {
    validate_command(command)?;

    let kind = command.kind.as_str();
    let capacity = kind.len() + command.args.iter().map(|arg| arg.len() + 1).sum::<usize>();
    let mut frame = String::with_capacity(capacity);
    frame.push_str(kind);
    for arg in &command.args {
        frame.push(COMMAND_DELIMITER);
        frame.push_str(arg);
    }
    Ok(frame)
}

/// Checks that every argument can be carried by the line protocol.
pub fn validate_command(command: &Command) -> Result<()> {
    match command
        .args
        .iter()
        .find(|arg| arg.contains(COMMAND_DELIMITER))
    {
        Some(arg) => Err(RealtimeError::InvalidCommandArgument {
            kind: command.kind.as_str().to_string(),
            argument: arg.clone(),
        }),
        None => Ok(()),
    }
}

/// Decodes an inbound text frame into an event envelope.
pub fn decode_event(frame: &str) -> Result<EventEnvelope> {
    Ok(serde_json::from_str(frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventKind;
    use crate::types::{CommandKind, ViewState};

    #[test]
    fn test_encode_joins_arguments_with_delimiter() {
        let command = Command::view_state(Some("channel-42"), ViewState::Monitoring);
        assert_eq!(
            encode_command(&command).unwrap(),
            "viewstate:channel-42:monitoring"
        );
    }

    #[test]
    fn test_encode_without_arguments() {
        let command = Command::new(CommandKind::TimelineStreaming, Vec::<String>::new());
        assert_eq!(encode_command(&command).unwrap(), "timeline_streaming");
    }

    #[test]
    fn test_encode_keeps_empty_arguments() {
        let command = Command::new(CommandKind::RtcState, ["c1", ""]);
        assert_eq!(encode_command(&command).unwrap(), "rtcstate:c1:");
    }

    #[test]
    fn test_encode_rejects_delimiter_in_argument() {
        let command = Command::new(CommandKind::ViewState, ["a:b", "monitoring"]);
        match encode_command(&command) {
            Err(RealtimeError::InvalidCommandArgument { kind, argument }) => {
                assert_eq!(kind, "viewstate");
                assert_eq!(argument, "a:b");
            }
            other => panic!("Expected InvalidCommandArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_event() {
        let envelope =
            decode_event(r#"{"type":"MESSAGE_CREATED","body":{"id":"m1","is_citing":false}}"#)
                .unwrap();
        assert_eq!(envelope.kind, EventKind::MessageCreated);
        assert_eq!(envelope.body["id"], "m1");
    }

    #[test]
    fn test_decode_malformed_frames() {
        for frame in ["", "not json", "[1,2,3]", r#"{"body":{}}"#, r#"{"type":5}"#] {
            assert!(
                matches!(decode_event(frame), Err(RealtimeError::Decode(_))),
                "frame {:?} should not decode",
                frame
            );
        }
    }
}
