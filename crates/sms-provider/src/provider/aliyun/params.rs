//! SendSms parameter set.
//!
//! API documentation:
//! https://help.aliyun.com/zh/sms/developer-reference/api-dysmsapi-2017-05-25-sendsms

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::config::AliyunConfig;
use crate::models::OutboundMessage;

pub const ACTION: &str = "SendSms";
pub const API_VERSION: &str = "2017-05-25";
pub const FORMAT: &str = "JSON";
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

/// Template variable the OTP is bound to.
pub const OTP_TEMPLATE_KEY: &str = "code";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Highest nonce handed out so far in this process.
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Per-request replay protection values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestStamp {
    pub nonce: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestStamp {
    /// Fresh stamp: a unique nonce and the current UTC time.
    pub fn now() -> Self {
        let timestamp = Utc::now();
        Self {
            nonce: next_nonce(&timestamp),
            timestamp,
        }
    }

    /// Timestamp rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Nanoseconds since the epoch as a decimal string, bumped past the last
/// value issued so two requests never share a nonce on coarse clocks.
pub fn next_nonce(now: &DateTime<Utc>) -> String {
    let reading = now
        .timestamp_nanos_opt()
        .and_then(|nanos| u64::try_from(nanos).ok())
        .unwrap_or(0);

    let previous = LAST_NONCE
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(reading.max(last + 1))
        })
        .unwrap_or_else(|last| last);

    reading.max(previous + 1).to_string()
}

/// `{"code":"<otp>"}` with the OTP JSON-escaped.
pub fn template_param(otp: &str) -> String {
    serde_json::json!({ OTP_TEMPLATE_KEY: otp }).to_string()
}

/// Full SendSms parameter set, without `Signature`.
pub fn build_params(
    config: &AliyunConfig,
    message: &OutboundMessage,
    stamp: &RequestStamp,
) -> BTreeMap<String, String> {
    let mut params: BTreeMap<String, String> = [
        ("Action", ACTION.to_string()),
        ("Version", API_VERSION.to_string()),
        ("AccessKeyId", config.access_key_id.clone()),
        ("Format", FORMAT.to_string()),
        ("SignatureMethod", SIGNATURE_METHOD.to_string()),
        ("SignatureVersion", SIGNATURE_VERSION.to_string()),
        ("SignatureNonce", stamp.nonce.clone()),
        ("Timestamp", stamp.formatted_timestamp()),
        ("PhoneNumbers", message.phone.clone()),
        ("SignName", config.sign_name.clone()),
        ("TemplateCode", message.template.clone()),
        ("TemplateParam", template_param(&message.otp)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    // Upstream SMS extend code, billed by the carrier. Omitted entirely when unset.
    if let Some(code) = config.extend_code() {
        params.insert("SmsUpExtendCode".to_string(), code.to_string());
    }

    params
}
