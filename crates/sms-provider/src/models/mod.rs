//! SMS delivery models
//!
//! This module contains the core data types for delivery operations:
//! - `types` - Type aliases for common identifiers (MessageId)
//! - `channel` - Delivery channel kind (MessageChannel)
//! - `message` - One delivery request (OutboundMessage) and phone masking for logs

mod channel;
mod message;
mod types;

pub use channel::{MessageChannel, UnknownChannel};
pub use message::{mask_phone, OutboundMessage};
pub use types::MessageId;
