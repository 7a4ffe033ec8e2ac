//! Aliyun RPC request signing (signature version 1.0, HMAC-SHA1).
//!
//! The canonical form is percent-encoded twice: every key and value is
//! encoded once to build the canonical query string, then the whole query
//! string is encoded again inside the string-to-sign. Dropping either layer
//! yields a signature the gateway rejects with `SignatureDoesNotMatch`.
//!
//! Doc: https://help.aliyun.com/zh/sdk/product-overview/rpc-mechanism

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::errors::SmsError;

use super::PROVIDER_ID;

type HmacSha1 = Hmac<Sha1>;

/// Parameter carrying the computed signature. Never part of the signed input.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Percent-encodes per RFC 3986: only `A-Z a-z 0-9 - _ . ~` pass through,
/// everything else becomes `%XX` with uppercase hex (space is `%20`).
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Sorted, encoded `key=value&...` form of `params`, without `Signature`.
///
/// `BTreeMap<String, _>` iterates in byte order of the keys, which is the
/// ordering the gateway expects.
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != SIGNATURE_PARAM)
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `METHOD&%2F&<encoded canonical query>`.
pub fn string_to_sign(method: &str, canonical_query: &str) -> String {
    format!(
        "{}&{}&{}",
        method,
        percent_encode("/"),
        percent_encode(canonical_query)
    )
}

/// HMAC-SHA1 signer keyed with `access_key_secret + "&"`.
///
/// The keyed state is built once at provider construction and cloned for
/// each signature.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha1,
}

impl Signer {
    pub fn new(access_key_secret: &str) -> Result<Self, SmsError> {
        let key = format!("{}&", access_key_secret);
        let mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| {
            SmsError::config(
                PROVIDER_ID,
                "access_key_secret",
                format!("is not a usable HMAC key: {}", e),
            )
        })?;
        Ok(Self { mac })
    }

    /// Signature for a POST request carrying `params`.
    pub fn sign(&self, params: &BTreeMap<String, String>) -> String {
        self.sign_with_method("POST", params)
    }

    /// Signature for `params` sent with an arbitrary HTTP method.
    pub fn sign_with_method(&self, method: &str, params: &BTreeMap<String, String>) -> String {
        let canonical = canonical_query(params);
        self.sign_raw(&string_to_sign(method, &canonical))
    }

    /// Base64 HMAC-SHA1 of an already assembled string-to-sign.
    pub fn sign_raw(&self, string_to_sign: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(string_to_sign.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}
