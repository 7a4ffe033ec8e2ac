//! Provider registry module.
//!
//! This module provides construction and routing for SMS providers:
//! - Configuration validation and provider construction (`ProviderFactory`)
//! - Channel-based routing across registered providers (`ProviderRegistry`)

mod factory;
mod registry;

pub use factory::ProviderFactory;
pub use registry::ProviderRegistry;
