//! Error types and retry classification for the SMS provider crate.
//!
//! This module provides:
//! - [`SmsError`]: The main error enum for all delivery operations
//! - [`ErrorKind`]: A field-less tag so callers can branch without string matching
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Coarse error category, one per [`SmsError`] variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    ConfigValidation,
    UnknownProvider,
    HttpClient,
    UnsupportedChannel,
    UnsupportedCapability,
    Transport,
    ResponseDecode,
    VendorRejection,
}

/// Errors that can occur while constructing a provider or delivering a message.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method.
#[derive(Error, Debug)]
pub enum SmsError {
    /// Provider configuration is incomplete or malformed.
    /// Raised at construction time, never during a send.
    #[error("Invalid {provider} configuration: {field} {reason}")]
    ConfigValidation {
        /// The provider whose configuration was rejected
        provider: String,
        /// The offending configuration field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// No provider variant is registered under this name.
    #[error("Unknown SMS provider: {0}")]
    UnknownProvider(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The requested channel is not handled by this provider.
    /// Raised before any network call.
    #[error("Channel {channel:?} is not supported by {provider}")]
    UnsupportedChannel {
        /// The provider that was asked
        provider: String,
        /// The requested channel, as given by the caller
        channel: String,
    },

    /// The operation is not implemented by this provider variant.
    #[error("Operation {operation:?} is not supported by {provider}")]
    UnsupportedCapability {
        /// The provider that was asked
        provider: String,
        /// The operation name (e.g. "verify_otp")
        operation: String,
    },

    /// The request did not complete: connection failure or timeout.
    #[error("Transport error calling {provider} (timed out: {timed_out}): {source}")]
    Transport {
        /// The provider being called
        provider: String,
        /// Whether the configured timeout elapsed
        timed_out: bool,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the vendor's reply shape.
    /// Usually a sign of API drift or a proxy in the way.
    #[error("Failed to decode {provider} response (HTTP {status}): {reason}")]
    ResponseDecode {
        /// The provider that answered
        provider: String,
        /// HTTP status of the response
        status: u16,
        /// Decoder message
        reason: String,
    },

    /// The vendor answered with a non-success status code.
    #[error("{provider} rejected the request: Code={code}, Message={message}")]
    VendorRejection {
        /// The provider that rejected the request
        provider: String,
        /// Vendor status code, verbatim
        code: String,
        /// Vendor message, verbatim
        message: String,
        /// Vendor request id, when present
        request_id: Option<String>,
        /// HTTP status of the response
        status: u16,
    },
}

impl SmsError {
    /// Returns the kind tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigValidation { .. } => ErrorKind::ConfigValidation,
            Self::UnknownProvider(_) => ErrorKind::UnknownProvider,
            Self::HttpClient(_) => ErrorKind::HttpClient,
            Self::UnsupportedChannel { .. } => ErrorKind::UnsupportedChannel,
            Self::UnsupportedCapability { .. } => ErrorKind::UnsupportedCapability,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::ResponseDecode { .. } => ErrorKind::ResponseDecode,
            Self::VendorRejection { .. } => ErrorKind::VendorRejection,
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use smsgate_provider::errors::{RetryClass, SmsError};
    ///
    /// let error = SmsError::UnknownProvider("carrier-pigeon".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    ///
    /// let error = SmsError::VendorRejection {
    ///     provider: "ALIYUN".to_string(),
    ///     code: "isv.BUSINESS_LIMIT_CONTROL".to_string(),
    ///     message: "throttled".to_string(),
    ///     request_id: None,
    ///     status: 200,
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::CallerPolicy);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::ConfigValidation { .. }
            | Self::UnknownProvider(_)
            | Self::HttpClient(_)
            | Self::UnsupportedChannel { .. }
            | Self::UnsupportedCapability { .. }
            | Self::ResponseDecode { .. } => RetryClass::Never,

            Self::Transport { .. } => RetryClass::Retryable,

            Self::VendorRejection { .. } => RetryClass::CallerPolicy,
        }
    }

    /// Whether issuing the same call again could succeed without caller input.
    pub fn is_retryable(&self) -> bool {
        self.retry_class() == RetryClass::Retryable
    }

    /// Vendor status code for rejections, `None` for every other error.
    pub fn vendor_code(&self) -> Option<&str> {
        match self {
            Self::VendorRejection { code, .. } => Some(code),
            _ => None,
        }
    }

    pub(crate) fn config(provider: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            provider: provider.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(code: &str) -> SmsError {
        SmsError::VendorRejection {
            provider: "ALIYUN".to_string(),
            code: code.to_string(),
            message: "bad number".to_string(),
            request_id: Some("req-1".to_string()),
            status: 200,
        }
    }

    #[test]
    fn test_config_validation_never_retries() {
        let error = SmsError::config("ALIYUN", "access_key_secret", "must not be empty");
        assert_eq!(error.kind(), ErrorKind::ConfigValidation);
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_unsupported_channel_never_retries() {
        let error = SmsError::UnsupportedChannel {
            provider: "ALIYUN".to_string(),
            channel: "whatsapp".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::UnsupportedChannel);
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_unsupported_capability_never_retries() {
        let error = SmsError::UnsupportedCapability {
            provider: "ALIYUN".to_string(),
            operation: "verify_otp".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_response_decode_never_retries() {
        let error = SmsError::ResponseDecode {
            provider: "ALIYUN".to_string(),
            status: 502,
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert_eq!(error.vendor_code(), None);
    }

    #[test]
    fn test_vendor_rejection_is_caller_policy() {
        let error = rejection("isv.MOBILE_NUMBER_ILLEGAL");
        assert_eq!(error.kind(), ErrorKind::VendorRejection);
        assert_eq!(error.retry_class(), RetryClass::CallerPolicy);
        assert_eq!(error.vendor_code(), Some("isv.MOBILE_NUMBER_ILLEGAL"));
    }

    #[test]
    fn test_error_display() {
        let error = rejection("isv.MOBILE_NUMBER_ILLEGAL");
        assert_eq!(
            format!("{}", error),
            "ALIYUN rejected the request: Code=isv.MOBILE_NUMBER_ILLEGAL, Message=bad number"
        );

        let error = SmsError::config("ALIYUN", "sign_name", "must not be empty");
        assert_eq!(
            format!("{}", error),
            "Invalid ALIYUN configuration: sign_name must not be empty"
        );

        let error = SmsError::UnknownProvider("twilio".to_string());
        assert_eq!(format!("{}", error), "Unknown SMS provider: twilio");
    }
}
