mod cli;

use anyhow::Context;
use clap::Parser;
use smsgate_provider::{mask_phone, ProviderRegistry, SmsConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = SmsConfig::from_env().context("Failed to read SMS configuration")?;
    let registry =
        ProviderRegistry::from_config(&config).context("Failed to build SMS provider")?;

    match cli.command {
        Command::CheckConfig => {
            for provider in registry.providers() {
                let caps = provider.capabilities();
                println!(
                    "{}: ok (channels: {:?}, verify: {}, timeout: {:?})",
                    provider.id(),
                    caps.channels,
                    caps.supports_verify,
                    config.transport.timeout
                );
            }
        }
        Command::Send {
            phone,
            template,
            otp,
            channel,
        } => {
            tracing::info!("Sending {} OTP to {}", channel, mask_phone(&phone));
            match registry.send_message(&phone, &template, channel, &otp).await {
                Ok(message_id) => println!("{}", message_id),
                Err(e) => {
                    tracing::error!(
                        kind = ?e.kind(),
                        retry = ?e.retry_class(),
                        "Delivery failed: {}",
                        e
                    );
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("SMSGATE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}
