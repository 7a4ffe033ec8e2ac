//! Delivery channel kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Channel a one-way message is delivered over.
///
/// The string forms match the names upstream orchestrators use on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    Sms,
    Whatsapp,
}

impl MessageChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageChannel::Sms => "sms",
            MessageChannel::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a channel name is not one of the known kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown message channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for MessageChannel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" => Ok(MessageChannel::Sms),
            "whatsapp" => Ok(MessageChannel::Whatsapp),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}
