/// Owner-to-tenant messages
///
/// Messages are append-only. An owner either addresses one tenant or
/// broadcasts to all of their tenants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::tenant::Tenant;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Owner,
}

/// A message delivered to a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID
    pub id: Uuid,

    /// Message body
    pub content: String,

    /// When the message was sent
    pub timestamp: DateTime<Utc>,

    /// Sender tag
    pub from: Sender,
}

impl Message {
    /// Creates an owner message stamped with the current time
    pub fn from_owner(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            timestamp: Utc::now(),
            from: Sender::Owner,
        }
    }
}

/// Addressee of an owner message
///
/// On the wire this is either the string `"all"` or a tenant ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every tenant of the sending owner
    All,

    /// A single tenant
    Tenant(Uuid),
}

impl Serialize for Recipient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recipient::All => serializer.serialize_str("all"),
            Recipient::Tenant(id) => serializer.serialize_str(&id.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Recipient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("all") {
            return Ok(Recipient::All);
        }
        Uuid::parse_str(raw.trim())
            .map(Recipient::Tenant)
            .map_err(|_| serde::de::Error::custom("recipient must be \"all\" or a tenant id"))
    }
}

impl Tenant {
    /// Appends `message` to the tenant's inbox
    pub fn receive_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_parsing() {
        let all: Recipient = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(all, Recipient::All);

        let id = Uuid::new_v4();
        let one: Recipient = serde_json::from_str(&format!(r#""{}""#, id)).unwrap();
        assert_eq!(one, Recipient::Tenant(id));

        assert!(serde_json::from_str::<Recipient>(r#""someone""#).is_err());
    }

    #[test]
    fn test_message_from_owner() {
        let msg = Message::from_owner("Rent is due on the 5th.");
        assert_eq!(msg.from, Sender::Owner);

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["from"], "owner");
    }
}
