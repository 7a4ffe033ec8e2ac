//! Builds provider instances from configuration.

use std::sync::Arc;

use log::info;

use crate::config::SmsConfig;
use crate::errors::SmsError;
use crate::provider::aliyun::{AliyunProvider, PROVIDER_ID as ALIYUN_ID};
use crate::provider::SmsProvider;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Construct the provider named by `config.provider`.
    ///
    /// Validation happens here, so the returned provider is always usable.
    pub fn build(config: &SmsConfig) -> Result<Arc<dyn SmsProvider>, SmsError> {
        match config.provider.trim().to_ascii_lowercase().as_str() {
            "aliyun" => {
                let aliyun = config.aliyun.clone().ok_or_else(|| {
                    SmsError::config(ALIYUN_ID, "aliyun", "section is missing")
                })?;
                let provider = AliyunProvider::new(aliyun, &config.transport)?;
                info!("SMS provider {} configured", ALIYUN_ID);
                Ok(Arc::new(provider))
            }
            _ => Err(SmsError::UnknownProvider(config.provider.clone())),
        }
    }
}
