use crate::config::{ApiSettings, CheckoutSettings, PollSettings, Settings};
use crate::domain::payment::{Amount, PaymentStatus};
use crate::error::{PaymentError, Result};
use clap::{ArgAction, Parser};
use rust_decimal::Decimal;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.yookassa.ru/v3";

/// Create a payment and watch it until it settles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shop identifier, used as the Basic auth user name
    #[arg(long, env = "YOOKASSA_SHOP_ID")]
    pub shop_id: String,

    /// Secret API key, used as the Basic auth password
    #[arg(long, env = "YOOKASSA_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Root of the payments API
    #[arg(long, env = "YOOKASSA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Amount to charge
    #[arg(long, env = "PAYMENT_AMOUNT", default_value = "10.00")]
    pub amount: Decimal,

    /// ISO 4217 currency code
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "RUB")]
    pub currency: String,

    #[arg(long, default_value = "Test payment")]
    pub description: String,

    /// Where the payer lands after confirming
    #[arg(long, env = "PAYMENT_RETURN_URL", default_value = "https://your-website.com/return")]
    pub return_url: String,

    /// Receipt recipient
    #[arg(long, env = "PAYMENT_RECEIPT_EMAIL", default_value = "user@example.com")]
    pub receipt_email: String,

    /// Description of the single receipt line
    #[arg(long, default_value = "Test item")]
    pub item_description: String,

    /// VAT code of the receipt line
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub vat_code: u8,

    /// Capture funds automatically once the payer confirms
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub capture: bool,

    /// Mark the payment as a test payment
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub test_mode: bool,

    /// Seconds between status checks
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 30)]
    pub poll_interval: u64,

    /// Status checks before giving up
    #[arg(long, env = "POLL_MAX_ATTEMPTS", default_value_t = 20)]
    pub max_attempts: u32,

    /// Statuses that end polling (repeat or comma-separate)
    #[arg(
        long = "terminal-status",
        value_delimiter = ',',
        default_values = ["succeeded", "canceled"]
    )]
    pub terminal_statuses: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout: u64,
}

impl Cli {
    /// Validates the parsed arguments and groups them by consumer.
    pub fn into_settings(self) -> Result<Settings> {
        let api = ApiSettings::new(&self.base_url, self.shop_id, self.secret_key)?;

        let checkout = CheckoutSettings {
            amount: Amount::new(self.amount, self.currency)?,
            description: self.description,
            return_url: self.return_url,
            receipt_email: self.receipt_email,
            item_description: self.item_description,
            vat_code: self.vat_code,
            capture: self.capture,
            test: self.test_mode,
        };

        let poll = PollSettings::new(
            Duration::from_secs(self.poll_interval),
            self.max_attempts,
            self.terminal_statuses
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(PaymentStatus::from),
        )?;

        if self.request_timeout == 0 {
            return Err(PaymentError::ValidationError(
                "Request timeout must be positive".to_string(),
            ));
        }

        Ok(Settings {
            api,
            checkout,
            poll,
            request_timeout: Duration::from_secs(self.request_timeout),
        })
    }
}
