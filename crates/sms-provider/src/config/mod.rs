//! Provider configuration.
//!
//! Configuration is plain data: it can be deserialized (JSON, TOML, ...) or
//! read from `SMS_*` environment variables with [`SmsConfig::from_env`].
//! Completeness checks run when a provider is constructed, never later.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::SmsError;
use crate::provider::aliyun::PROVIDER_ID as ALIYUN_ID;

/// Request timeout shared by every provider variant unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Public Dysms endpoint.
pub const DEFAULT_ALIYUN_ENDPOINT: &str = "https://dysmsapi.aliyuncs.com";

/// Provider selected when `SMS_PROVIDER` is unset.
pub const DEFAULT_PROVIDER: &str = "aliyun";

/// Credentials and endpoint for the Aliyun Dysms gateway.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliyunConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    #[serde(default = "default_aliyun_endpoint")]
    pub endpoint: String,
    pub sign_name: String,
    /// Upstream extend code; sent only when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_up_extend_code: Option<String>,
}

fn default_aliyun_endpoint() -> String {
    DEFAULT_ALIYUN_ENDPOINT.to_string()
}

impl AliyunConfig {
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        sign_name: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            endpoint: default_aliyun_endpoint(),
            sign_name: sign_name.into(),
            sms_up_extend_code: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_extend_code(mut self, code: impl Into<String>) -> Self {
        self.sms_up_extend_code = Some(code.into());
        self
    }

    /// Extend code if configured and non-empty.
    pub fn extend_code(&self) -> Option<&str> {
        self.sms_up_extend_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }

    /// Checks that every required field is present and the endpoint is usable.
    pub fn validate(&self) -> Result<(), SmsError> {
        require(&self.access_key_id, "access_key_id")?;
        require(&self.access_key_secret, "access_key_secret")?;
        require(&self.endpoint, "endpoint")?;
        require(&self.sign_name, "sign_name")?;

        let url = Url::parse(&self.endpoint)
            .map_err(|e| SmsError::config(ALIYUN_ID, "endpoint", format!("is not a URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SmsError::config(
                ALIYUN_ID,
                "endpoint",
                format!("must use http or https, got {:?}", url.scheme()),
            ));
        }
        Ok(())
    }
}

fn require(value: &str, field: &str) -> Result<(), SmsError> {
    if value.trim().is_empty() {
        return Err(SmsError::config(ALIYUN_ID, field, "must not be empty"));
    }
    Ok(())
}

// The secret must never reach logs.
impl fmt::Debug for AliyunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliyunConfig")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("sign_name", &self.sign_name)
            .field("sms_up_extend_code", &self.sms_up_extend_code)
            .finish()
    }
}

/// HTTP settings applied to each provider instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSettings {
    #[serde(default = "default_timeout", rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportSettings {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Process-level SMS configuration: which provider to use and its settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliyun: Option<AliyunConfig>,
    #[serde(default)]
    pub transport: TransportSettings,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl SmsConfig {
    /// Reads configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SMS_PROVIDER` | `aliyun` |
    /// | `SMS_ALIYUN_ACCESS_KEY_ID` | - |
    /// | `SMS_ALIYUN_ACCESS_KEY_SECRET` | - |
    /// | `SMS_ALIYUN_ENDPOINT` | `https://dysmsapi.aliyuncs.com` |
    /// | `SMS_ALIYUN_SIGN_NAME` | - |
    /// | `SMS_ALIYUN_SMS_UP_EXTEND_CODE` | unset |
    /// | `SMS_TIMEOUT_MS` | `10000` |
    pub fn from_env() -> Result<Self, SmsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SmsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup("SMS_PROVIDER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_provider);

        let timeout = match lookup("SMS_TIMEOUT_MS") {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    SmsError::config("SMS", "SMS_TIMEOUT_MS", format!("is not a number: {:?}", raw))
                })?;
                if millis == 0 {
                    return Err(SmsError::config("SMS", "SMS_TIMEOUT_MS", "must be positive"));
                }
                Duration::from_millis(millis)
            }
            None => DEFAULT_TIMEOUT,
        };

        let id = lookup("SMS_ALIYUN_ACCESS_KEY_ID");
        let secret = lookup("SMS_ALIYUN_ACCESS_KEY_SECRET");
        let sign_name = lookup("SMS_ALIYUN_SIGN_NAME");
        let aliyun = if id.is_some() || secret.is_some() || sign_name.is_some() {
            Some(AliyunConfig {
                access_key_id: id.unwrap_or_default(),
                access_key_secret: secret.unwrap_or_default(),
                endpoint: lookup("SMS_ALIYUN_ENDPOINT").unwrap_or_else(default_aliyun_endpoint),
                sign_name: sign_name.unwrap_or_default(),
                sms_up_extend_code: lookup("SMS_ALIYUN_SMS_UP_EXTEND_CODE"),
            })
        } else {
            None
        };

        Ok(Self {
            provider,
            aliyun,
            transport: TransportSettings::with_timeout(timeout),
        })
    }
}
