use clap::{Parser, Subcommand};
use smsgate_provider::MessageChannel;

/// Send OTP messages through the configured SMS gateway.
///
/// Credentials come from `SMS_*` environment variables (or a `.env` file).
#[derive(Debug, Parser)]
#[command(name = "smsgate", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate configuration and build the provider without sending anything.
    CheckConfig,

    /// Deliver one OTP and print the vendor message id.
    Send {
        /// Destination phone number, passed to the gateway verbatim.
        #[arg(long)]
        phone: String,

        /// Vendor template code (Aliyun `TemplateCode`).
        #[arg(long, env = "SMS_TEMPLATE")]
        template: String,

        /// One-time code to embed in the template.
        #[arg(long)]
        otp: String,

        #[arg(long, default_value = "sms")]
        channel: MessageChannel,
    },
}
