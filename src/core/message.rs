use serde::{Deserialize, Serialize};

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }

    pub fn is_assistant(self) -> bool {
        self == Sender::Assistant
    }
}

/// Lifecycle state of a transcript entry.
///
/// `Pending` marks the provisional assistant entry shown while a remote call
/// is outstanding; it is mutated in place to `Final` or `Error` when the call
/// resolves and is never removed and re-inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Final,
    Pending,
    Error,
}

impl MessageStatus {
    pub fn is_final(&self) -> bool {
        matches!(self, MessageStatus::Final)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MessageStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "MessageStatus::is_final")]
    pub status: MessageStatus,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, status: MessageStatus) -> Self {
        Self {
            sender,
            text: text.into(),
            status,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, MessageStatus::Final)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, MessageStatus::Final)
    }

    /// Provisional assistant entry for an in-flight request.
    pub fn pending(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, MessageStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_status_is_omitted_from_serialization() {
        let json = serde_json::to_string(&Message::user("hello")).unwrap();
        assert!(!json.contains("status"));
        assert!(json.contains("\"sender\":\"user\""));
    }

    #[test]
    fn pending_and_error_statuses_round_trip() {
        for message in [
            Message::pending("working"),
            Message::new(Sender::Assistant, "boom", MessageStatus::Error),
        ] {
            let json = serde_json::to_string(&message).unwrap();
            let back: Message = serde_json::from_str(&json).unwrap();
            assert_eq!(back, message);
        }
    }

    #[test]
    fn missing_status_deserializes_as_final() {
        let back: Message =
            serde_json::from_str(r#"{"sender":"assistant","text":"hi"}"#).unwrap();
        assert_eq!(back.status, MessageStatus::Final);
    }
}
