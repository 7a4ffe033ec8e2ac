use serde::{Deserialize, Serialize};

use super::MessageChannel;

/// One delivery request.
///
/// `phone` is kept exactly as the caller supplied it; number formatting is
/// the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub phone: String,
    pub channel: MessageChannel,
    pub otp: String,
    /// Vendor template identifier (Aliyun `TemplateCode`)
    pub template: String,
}

impl OutboundMessage {
    pub fn new(
        phone: impl Into<String>,
        channel: MessageChannel,
        otp: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            channel,
            otp: otp.into(),
            template: template.into(),
        }
    }

    /// Phone number safe to put in logs.
    pub fn masked_phone(&self) -> String {
        mask_phone(&self.phone)
    }
}

/// Masks all but the last four characters of a phone number.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
