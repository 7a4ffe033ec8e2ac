//! smsgate SMS provider crate
//!
//! This crate delivers pre-generated OTP codes through pluggable one-way
//! message providers.
//!
//! # Overview
//!
//! The crate supports:
//! - A provider-agnostic delivery contract ([`SmsProvider`])
//! - The Aliyun Dysms gateway with signed `SendSms` requests
//! - Construction-time configuration validation
//! - Structured errors with retry classification
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Caller       | --> | ProviderRegistry |  (validation, channel routing)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | Parameter Builder|  (vendor parameter set)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  Signing Engine  |  (canonical query + HMAC-SHA1)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Transport     |  (form POST, bounded timeout)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | Response Decoder |  (message id or SmsError)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SmsProvider`] - Delivery capability contract
//! - [`AliyunProvider`] - Aliyun Dysms variant
//! - [`ProviderRegistry`] / [`ProviderFactory`] - Construction and routing
//! - [`SmsConfig`] / [`AliyunConfig`] - Configuration
//! - [`SmsError`] - Error taxonomy with [`RetryClass`]

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use config::{AliyunConfig, SmsConfig, TransportSettings, DEFAULT_TIMEOUT};
pub use errors::{ErrorKind, RetryClass, SmsError};
pub use models::{mask_phone, MessageChannel, MessageId, OutboundMessage};
pub use provider::aliyun::AliyunProvider;
pub use provider::{ProviderCapabilities, SmsProvider};
pub use registry::{ProviderFactory, ProviderRegistry};
