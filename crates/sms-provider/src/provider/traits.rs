//! SMS provider trait definitions.
//!
//! This module defines the core `SmsProvider` trait that all
//! delivery providers must implement.

use async_trait::async_trait;

use crate::errors::SmsError;
use crate::models::{MessageChannel, MessageId};

use super::capabilities::ProviderCapabilities;

/// Trait for one-way message delivery providers.
///
/// Implement this trait to add support for a new gateway vendor.
/// Optional operations have default implementations that report
/// [`SmsError::UnsupportedCapability`]; a variant must never turn an
/// operation it cannot perform into a silent success.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use smsgate_provider::provider::{ProviderCapabilities, SmsProvider};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl SmsProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             channels: &[MessageChannel::Sms],
///             supports_verify: false,
///         }
///     }
///
///     // ... implement send_message
/// }
/// ```
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALIYUN".
    /// Used for logging, error context and registry lookups.
    fn id(&self) -> &'static str;

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Deliver a message carrying an OTP.
    ///
    /// # Arguments
    ///
    /// * `phone` - Destination, passed through verbatim
    /// * `message` - Message body or vendor template identifier, depending on the variant
    /// * `channel` - Requested delivery channel
    /// * `otp` - Pre-generated one-time code
    ///
    /// # Returns
    ///
    /// The vendor's message id on success. A channel the provider does not
    /// handle fails with `UnsupportedChannel` before any network activity.
    async fn send_message(
        &self,
        phone: &str,
        message: &str,
        channel: MessageChannel,
        otp: &str,
    ) -> Result<MessageId, SmsError>;

    /// Verify an OTP with the vendor.
    ///
    /// Default implementation returns `UnsupportedCapability`.
    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<(), SmsError> {
        let _ = (phone, otp);
        Err(SmsError::UnsupportedCapability {
            provider: self.id().to_string(),
            operation: "verify_otp".to_string(),
        })
    }
}
