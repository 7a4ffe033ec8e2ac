//! Aliyun Dysms provider implementation.
//!
//! Sends OTP text messages through the `SendSms` RPC action:
//! - Parameters are built from the message and static credentials
//! - Requests are signed with HMAC-SHA1 (RPC signature version 1.0)
//! - Replies are JSON `{BizId, Code, Message, RequestId}`; `Code == "OK"` is success
//!
//! Only the SMS channel is handled, and OTP verification is not offered by
//! the gateway.

mod params;
mod response;
mod signing;

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::config::{AliyunConfig, TransportSettings};
use crate::errors::SmsError;
use crate::models::{MessageChannel, MessageId, OutboundMessage};
use crate::provider::{FormTransport, ProviderCapabilities, SmsProvider};

pub use params::{build_params, next_nonce, template_param, RequestStamp};
pub use response::{codes, decode_response, SendSmsResponse, SUCCESS_CODE};
pub use signing::{
    canonical_query, percent_encode, string_to_sign, Signer, SIGNATURE_PARAM,
};

pub const PROVIDER_ID: &str = "ALIYUN";

/// Canonical parameter set with its signature, ready to be posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    /// Every parameter, `Signature` included.
    pub params: BTreeMap<String, String>,
    pub signature: String,
    pub nonce: String,
    pub timestamp: String,
}

/// Aliyun Dysms SMS provider.
///
/// Holds validated, immutable configuration; safe to share across tasks.
pub struct AliyunProvider {
    config: AliyunConfig,
    signer: Signer,
    transport: FormTransport,
}

impl AliyunProvider {
    /// Validate `config` and build a ready-to-use provider.
    ///
    /// Fails before any network activity if a required field is missing.
    pub fn new(config: AliyunConfig, settings: &TransportSettings) -> Result<Self, SmsError> {
        config.validate()?;
        let signer = Signer::new(&config.access_key_secret)?;
        let transport = FormTransport::new(PROVIDER_ID, settings)?;

        debug!(
            "Aliyun provider ready (endpoint {}, sign name {:?}, timeout {:?})",
            config.endpoint,
            config.sign_name,
            transport.timeout()
        );

        Ok(Self {
            config,
            signer,
            transport,
        })
    }

    pub fn config(&self) -> &AliyunConfig {
        &self.config
    }

    /// Build and sign the parameter set for `message` with the given stamp.
    pub fn sign_request(&self, message: &OutboundMessage, stamp: &RequestStamp) -> SignedRequest {
        let mut params = build_params(&self.config, message, stamp);
        let signature = self.signer.sign(&params);
        params.insert(SIGNATURE_PARAM.to_string(), signature.clone());

        SignedRequest {
            params,
            signature,
            nonce: stamp.nonce.clone(),
            timestamp: stamp.formatted_timestamp(),
        }
    }

    /// Send one SMS. Exactly one network attempt is made.
    pub async fn send_sms(&self, message: &OutboundMessage) -> Result<MessageId, SmsError> {
        let request = self.sign_request(message, &RequestStamp::now());

        debug!(
            "Aliyun SendSms to {} (template {}, nonce {})",
            message.masked_phone(),
            message.template,
            request.nonce
        );

        let raw = self
            .transport
            .post_form(&self.config.endpoint, &request.params)
            .await?;

        match decode_response(raw.status, &raw.body) {
            Ok(biz_id) => {
                info!(
                    "Aliyun accepted SMS to {} (BizId {})",
                    message.masked_phone(),
                    biz_id
                );
                Ok(biz_id)
            }
            Err(e) => {
                warn!(
                    "Aliyun SMS to {} failed: {}",
                    message.masked_phone(),
                    e
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl SmsProvider for AliyunProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            channels: &[MessageChannel::Sms],
            supports_verify: false,
        }
    }

    /// `message` is the Dysms template code; the OTP fills its `code` variable.
    async fn send_message(
        &self,
        phone: &str,
        message: &str,
        channel: MessageChannel,
        otp: &str,
    ) -> Result<MessageId, SmsError> {
        match channel {
            MessageChannel::Sms => {
                let outbound = OutboundMessage::new(phone, channel, otp, message);
                self.send_sms(&outbound).await
            }
            other => Err(SmsError::UnsupportedChannel {
                provider: PROVIDER_ID.to_string(),
                channel: other.to_string(),
            }),
        }
    }
}
