//! Chat protocol frames: the `{t, p}` envelope and its payloads.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Outgoing frame of the chat protocol.
///
/// Every WebSocket text frame is one JSON object of the form
/// `{"t": <type>, "p": <payload>}`. Incoming frames are read through
/// [`classify_reply`], which tolerates a missing `p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<P> {
    /// Message type discriminator.
    #[serde(rename = "t")]
    pub msg_type: MessageType,
    /// Type-specific payload.
    #[serde(rename = "p")]
    pub payload: P,
}

/// Discriminator for chat protocol frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Client → Server encrypted chat message.
    #[serde(rename = "msg")]
    Message,
    /// Server → Client confirmation that a message was stored.
    Delivered,
    /// Typing indicator.
    Typing,
    /// Read receipt.
    Read,
    /// Contact came online.
    Online,
    /// Contact went offline.
    Offline,
    /// Server → Client error.
    Error,
}

/// Payload of a [`MessageType::Message`] frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    /// Recipient user.
    pub to: UserId,
    /// JSON text of an [`EncryptedContent`]; opaque to the server.
    pub encrypted_content: String,
    /// Client-generated correlation id echoed back in `delivered`.
    pub temp_id: String,
}

/// Encrypted body of a chat message as produced by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedContent {
    /// Base64 nonce.
    pub nonce: String,
    /// Base64 ciphertext.
    pub ciphertext: String,
}

impl EncryptedContent {
    /// Placeholder content; the probe never encrypts anything.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            nonce: "test".to_string(),
            ciphertext: "test".to_string(),
        }
    }
}

impl Envelope<ChatPayload> {
    /// Builds a `msg` frame for `to` carrying `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` cannot be serialized.
    pub fn chat(
        to: UserId,
        content: &EncryptedContent,
        temp_id: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            msg_type: MessageType::Message,
            payload: ChatPayload {
                to,
                encrypted_content: serde_json::to_string(content)?,
                temp_id: temp_id.into(),
            },
        })
    }
}

/// Envelope as received, tolerating a missing `p`.
#[derive(Debug, Deserialize)]
struct IncomingEnvelope {
    t: MessageType,
    #[serde(default)]
    p: serde_json::Value,
}

/// What the probe could tell about a reply frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    /// A `delivered` confirmation.
    Delivered {
        /// Correlation id echoed by the server, if present.
        temp_id: Option<String>,
        /// Server-assigned message id, if present.
        message_id: Option<String>,
    },
    /// An `error` frame with its message, if any.
    ServerError(Option<String>),
    /// Any other well-formed envelope.
    Other(MessageType),
    /// Not a chat protocol envelope.
    Unrecognized,
}

/// Classifies the text of a reply frame.
#[must_use]
pub fn classify_reply(text: &str) -> ReplyKind {
    let Ok(IncomingEnvelope { t, p }) = serde_json::from_str(text) else {
        return ReplyKind::Unrecognized;
    };
    let field = |value: &serde_json::Value, key: &str| {
        value.get(key).and_then(|v| v.as_str()).map(str::to_string)
    };
    match t {
        MessageType::Delivered => ReplyKind::Delivered {
            temp_id: field(&p, "temp_id"),
            message_id: p.get("message").and_then(|m| field(m, "id")),
        },
        MessageType::Error => {
            ReplyKind::ServerError(field(&p, "message").or_else(|| field(&p, "error")))
        }
        other => ReplyKind::Other(other),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn recipient() -> UserId {
        let Ok(id) = "fcf454d3-d34a-4765-bc75-e9c3aa4bd9c3".parse() else {
            panic!("valid uuid");
        };
        id
    }

    #[test]
    fn chat_frame_has_wire_shape() {
        let Ok(frame) = Envelope::chat(recipient(), &EncryptedContent::placeholder(), "tmp-1")
        else {
            panic!("frame construction failed");
        };
        let Ok(json) = serde_json::to_string(&frame) else {
            panic!("serialization failed");
        };
        assert_eq!(
            json,
            r#"{"t":"msg","p":{"to":"fcf454d3-d34a-4765-bc75-e9c3aa4bd9c3","encrypted_content":"{\"nonce\":\"test\",\"ciphertext\":\"test\"}","temp_id":"tmp-1"}}"#
        );
    }

    #[test]
    fn encrypted_content_is_nested_json_text() {
        let Ok(frame) = Envelope::chat(recipient(), &EncryptedContent::placeholder(), "x") else {
            panic!("frame construction failed");
        };
        let Ok(inner) =
            serde_json::from_str::<EncryptedContent>(&frame.payload.encrypted_content)
        else {
            panic!("inner content is not JSON");
        };
        assert_eq!(inner, EncryptedContent::placeholder());
    }

    #[test]
    fn typed_payload_serializes_under_p() {
        let frame = Envelope {
            msg_type: MessageType::Read,
            payload: EncryptedContent::placeholder(),
        };
        let Ok(json) = serde_json::to_string(&frame) else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"t":"read","p":{"nonce":"test","ciphertext":"test"}}"#);
    }

    #[test]
    fn classifies_delivered_confirmation() {
        let text = r#"{"t":"delivered","p":{"temp_id":"tmp-1","message":{"id":"m-9"}}}"#;
        assert_eq!(
            classify_reply(text),
            ReplyKind::Delivered {
                temp_id: Some("tmp-1".to_string()),
                message_id: Some("m-9".to_string()),
            }
        );
    }

    #[test]
    fn classifies_error_frame() {
        let text = r#"{"t":"error","p":{"message":"not friends"}}"#;
        assert_eq!(
            classify_reply(text),
            ReplyKind::ServerError(Some("not friends".to_string()))
        );
    }

    #[test]
    fn classifies_presence_frame() {
        let text = r#"{"t":"online","p":{"user_id":"u"}}"#;
        assert_eq!(classify_reply(text), ReplyKind::Other(MessageType::Online));
    }

    #[test]
    fn payload_may_be_omitted() {
        assert_eq!(
            classify_reply(r#"{"t":"typing"}"#),
            ReplyKind::Other(MessageType::Typing)
        );
    }

    #[test]
    fn unknown_type_is_unrecognized() {
        assert_eq!(classify_reply(r#"{"t":"ack"}"#), ReplyKind::Unrecognized);
        assert_eq!(classify_reply("pong"), ReplyKind::Unrecognized);
    }
}
