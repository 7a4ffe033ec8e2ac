//! Provider capabilities.
//!
//! Describes which channels a provider variant delivers over and which
//! optional operations it implements.

use crate::models::MessageChannel;

/// Describes the capabilities of an SMS provider.
///
/// Used by the registry to route a message to a provider that handles
/// the requested channel.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Channels this provider can deliver over.
    pub channels: &'static [MessageChannel],

    /// Whether the provider verifies OTPs server-side.
    pub supports_verify: bool,
}

impl ProviderCapabilities {
    pub fn supports_channel(&self, channel: MessageChannel) -> bool {
        self.channels.contains(&channel)
    }
}
