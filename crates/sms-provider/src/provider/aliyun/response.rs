//! SendSms reply decoding.

use serde::Deserialize;

use crate::errors::SmsError;
use crate::models::MessageId;

use super::PROVIDER_ID;

/// `Code` value of an accepted request.
pub const SUCCESS_CODE: &str = "OK";

/// Reply body. The gateway uses the same shape for HTTP 200 and error statuses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SendSmsResponse {
    #[serde(rename = "BizId", default)]
    pub biz_id: Option<String>,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
}

/// Decode a reply into the vendor message id.
///
/// The body is parsed as JSON whatever the HTTP status. A body that does not
/// parse is a `ResponseDecode` error; a parsed body with a non-`OK` code is a
/// `VendorRejection` carrying the vendor's code and message verbatim.
pub fn decode_response(status: u16, body: &str) -> Result<MessageId, SmsError> {
    let response: SendSmsResponse =
        serde_json::from_str(body).map_err(|e| SmsError::ResponseDecode {
            provider: PROVIDER_ID.to_string(),
            status,
            reason: e.to_string(),
        })?;

    if response.code != SUCCESS_CODE {
        return Err(SmsError::VendorRejection {
            provider: PROVIDER_ID.to_string(),
            code: response.code,
            message: response.message.unwrap_or_default(),
            request_id: response.request_id,
            status,
        });
    }

    Ok(response.biz_id.unwrap_or_default())
}

/// Well-known gateway codes, for caller retry policies.
pub mod codes {
    pub const MOBILE_NUMBER_ILLEGAL: &str = "isv.MOBILE_NUMBER_ILLEGAL";
    pub const BUSINESS_LIMIT_CONTROL: &str = "isv.BUSINESS_LIMIT_CONTROL";
    pub const DAY_LIMIT_CONTROL: &str = "isv.DAY_LIMIT_CONTROL";
    pub const AMOUNT_NOT_ENOUGH: &str = "isv.AMOUNT_NOT_ENOUGH";
    pub const SMS_SIGNATURE_ILLEGAL: &str = "isv.SMS_SIGNATURE_ILLEGAL";
    pub const SMS_TEMPLATE_ILLEGAL: &str = "isv.SMS_TEMPLATE_ILLEGAL";
    pub const SIGNATURE_DOES_NOT_MATCH: &str = "SignatureDoesNotMatch";
    pub const SIGNATURE_NONCE_USED: &str = "SignatureNonceUsed";
    pub const INVALID_ACCESS_KEY_ID: &str = "InvalidAccessKeyId.NotFound";
    pub const INVALID_TIMESTAMP_EXPIRED: &str = "InvalidTimeStamp.Expired";

    /// Flow-control codes; the same request may succeed later.
    pub fn is_throttling(code: &str) -> bool {
        code == BUSINESS_LIMIT_CONTROL || code.starts_with("Throttling")
    }

    /// Codes produced by a bad signature, key, nonce or clock rather than by
    /// the message itself.
    pub fn is_authentication_failure(code: &str) -> bool {
        matches!(
            code,
            SIGNATURE_DOES_NOT_MATCH | SIGNATURE_NONCE_USED | INVALID_ACCESS_KEY_ID
        ) || code.starts_with("InvalidTimeStamp")
            || code.starts_with("InvalidAccessKeyId")
    }
}
