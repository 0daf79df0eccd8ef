//! Decoded WRP message types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// WRP message type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Auth,
    SimpleRequestResponse,
    SimpleEvent,
    Create,
    Retrieve,
    Update,
    Delete,
    ServiceRegistration,
    ServiceAlive,
    #[default]
    Unknown,
}

impl MessageType {
    /// Whether messages of this type must carry a transaction UUID to be correlated
    pub fn requires_transaction_uuid(&self) -> bool {
        matches!(
            self,
            MessageType::SimpleRequestResponse
                | MessageType::Create
                | MessageType::Retrieve
                | MessageType::Update
                | MessageType::Delete
        )
    }
}

/// A decoded WRP message
///
/// Every field is always serialized, so binary formats that rely on field
/// order decode what they encode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message type
    #[serde(rename = "msg_type")]
    pub message_type: MessageType,

    /// Address of the sender
    #[serde(default)]
    pub source: String,

    /// Address of the recipient (e.g., "mac:112233445566/service")
    #[serde(rename = "dest")]
    pub destination: String,

    /// Correlation identifier linking a request to its response; may be empty
    #[serde(default)]
    pub transaction_uuid: String,

    /// MIME type of the payload
    #[serde(default)]
    pub content_type: String,

    #[serde(default)]
    pub headers: Vec<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    #[serde(default)]
    pub partner_ids: Vec<String>,

    /// Application payload
    #[serde(default)]
    pub payload: Vec<u8>,
}

impl Message {
    /// Create a message of the given type between two addresses
    pub fn new(
        message_type: MessageType,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            message_type,
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Create a request/response message carrying a payload
    pub fn simple_request_response(
        source: impl Into<String>,
        destination: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(MessageType::SimpleRequestResponse, source, destination).with_payload(payload)
    }

    /// Create a fire-and-forget event carrying a payload
    pub fn simple_event(
        source: impl Into<String>,
        destination: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(MessageType::SimpleEvent, source, destination).with_payload(payload)
    }

    /// Set the transaction UUID
    pub fn with_transaction_uuid(mut self, id: impl Into<String>) -> Self {
        self.transaction_uuid = id.into();
        self
    }

    /// Set the payload content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Append a header
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Insert a metadata entry, replacing any previous value for the key
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Append a partner id
    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_ids.push(partner_id.into());
        self
    }

    /// Build a reply to this message
    ///
    /// The reply travels back to this message's source, keeps the message type
    /// and transaction UUID, and carries the given payload.
    pub fn response_to(&self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            message_type: self.message_type,
            source: self.destination.clone(),
            destination: self.source.clone(),
            transaction_uuid: self.transaction_uuid.clone(),
            content_type: self.content_type.clone(),
            partner_ids: self.partner_ids.clone(),
            payload: payload.into(),
            ..Self::default()
        }
    }
}
