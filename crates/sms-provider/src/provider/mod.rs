//! SMS provider abstractions and implementations.
//!
//! This module contains:
//! - The `SmsProvider` trait that all providers implement
//! - Provider capabilities
//! - The form-encoded HTTP transport shared by vendor variants
//! - Concrete provider implementations (Aliyun Dysms)
//!
//! # Architecture
//!
//! Each variant follows the same pipeline: build the vendor parameter set,
//! sign it, send it through [`FormTransport`], and decode the reply into a
//! message id or a structured [`SmsError`](crate::errors::SmsError).
//! Variants hold only immutable configuration, so one instance can be
//! shared across tasks.

mod capabilities;
mod traits;
mod transport;

pub mod aliyun;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use traits::SmsProvider;
pub use transport::{FormTransport, RawResponse};
