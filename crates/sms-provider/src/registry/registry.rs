//! Provider registry for routing messages to providers.
//!
//! The registry holds every configured provider and picks, per call, the
//! first one (in registration order) that handles the requested channel.
//! It never retries or fails over after a provider has been called.

use std::sync::Arc;

use log::debug;

use super::ProviderFactory;
use crate::config::SmsConfig;
use crate::errors::SmsError;
use crate::models::{mask_phone, MessageChannel, MessageId};
use crate::provider::SmsProvider;

const REGISTRY_ID: &str = "REGISTRY";

/// Provider registry for message delivery.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn SmsProvider>>,
}

impl ProviderRegistry {
    /// Create a registry from already constructed providers.
    pub fn new(providers: Vec<Arc<dyn SmsProvider>>) -> Self {
        Self { providers }
    }

    /// Create a registry holding the single provider named in `config`.
    pub fn from_config(config: &SmsConfig) -> Result<Self, SmsError> {
        Ok(Self::new(vec![ProviderFactory::build(config)?]))
    }

    pub fn register(&mut self, provider: Arc<dyn SmsProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[Arc<dyn SmsProvider>] {
        &self.providers
    }

    /// Look up a provider by its id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<Arc<dyn SmsProvider>> {
        self.providers
            .iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
            .cloned()
    }

    /// First provider whose capabilities include `channel`.
    pub fn provider_for(&self, channel: MessageChannel) -> Option<Arc<dyn SmsProvider>> {
        self.providers
            .iter()
            .find(|p| p.capabilities().supports_channel(channel))
            .cloned()
    }

    /// Route a message to a provider that handles `channel`.
    ///
    /// Returns `UnsupportedChannel` without any network activity when no
    /// registered provider handles the channel.
    pub async fn send_message(
        &self,
        phone: &str,
        message: &str,
        channel: MessageChannel,
        otp: &str,
    ) -> Result<MessageId, SmsError> {
        let provider = self
            .provider_for(channel)
            .ok_or_else(|| SmsError::UnsupportedChannel {
                provider: REGISTRY_ID.to_string(),
                channel: channel.to_string(),
            })?;

        debug!(
            "Routing {} message to {} via '{}'",
            channel,
            mask_phone(phone),
            provider.id()
        );

        provider.send_message(phone, message, channel, otp).await
    }

    /// Verify an OTP with the first provider that supports verification.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<(), SmsError> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.capabilities().supports_verify)
            .ok_or_else(|| SmsError::UnsupportedCapability {
                provider: REGISTRY_ID.to_string(),
                operation: "verify_otp".to_string(),
            })?;

        provider.verify_otp(phone, otp).await
    }
}
