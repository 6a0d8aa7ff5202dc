use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::EventKind;
use crate::types::Result;

/// A server push: event type plus an opaque body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub body: serde_json::Value,
}

impl EventEnvelope {
    pub fn new(kind: impl Into<EventKind>, body: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }

    /// Deserializes the body into one of the typed payloads.
    pub fn parse_body<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessageEventBody;

    #[test]
    fn test_event_envelope() {
        let envelope = EventEnvelope::new("MESSAGE_CREATED", serde_json::json!({"id": "m1"}));
        assert_eq!(envelope.kind, EventKind::MessageCreated);
        assert_eq!(envelope.body["id"], "m1");
    }

    #[test]
    fn test_event_envelope_missing_body_defaults_to_null() {
        let envelope: EventEnvelope = serde_json::from_str(r#"{"type":"USER_ONLINE"}"#).unwrap();
        assert_eq!(envelope.kind, EventKind::UserOnline);
        assert_eq!(envelope.body, serde_json::Value::Null);
    }

    #[test]
    fn test_event_envelope_serializes_type_as_string() {
        let envelope = EventEnvelope::new("SOMETHING_NEW", serde_json::json!({}));
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""type":"SOMETHING_NEW""#));
    }

    #[test]
    fn test_parse_body() {
        let envelope = EventEnvelope::new("MESSAGE_UPDATED", serde_json::json!({"id": "m2"}));
        let body: MessageEventBody = envelope.parse_body().unwrap();
        assert_eq!(body.id, "m2");

        let wrong = EventEnvelope::new("MESSAGE_UPDATED", serde_json::json!([1, 2]));
        assert!(wrong.parse_body::<MessageEventBody>().is_err());
    }
}
