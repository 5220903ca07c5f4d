//! Runtime settings, split by the part of the program that consumes them.
//!
//! Values are produced by the command-line layer (flags with environment
//! fallbacks); nothing secret has a default.

use crate::domain::payment::{Amount, PaymentStatus};
use crate::error::{PaymentError, Result};
use reqwest::Url;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Credentials and location of the payments API.
#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub shop_id: String,
    pub secret_key: String,
}

impl ApiSettings {
    pub fn new(base_url: &str, shop_id: String, secret_key: String) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            PaymentError::ValidationError(format!("Invalid base URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PaymentError::ValidationError(format!(
                "Base URL {base_url} cannot carry a path"
            )));
        }
        if shop_id.trim().is_empty() || secret_key.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Shop ID and secret key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            base_url,
            shop_id,
            secret_key,
        })
    }
}

// The secret key never reaches logs.
impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url.as_str())
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// What gets charged and how the payer is sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSettings {
    pub amount: Amount,
    pub description: String,
    pub return_url: String,
    pub receipt_email: String,
    pub item_description: String,
    pub vat_code: u8,
    pub capture: bool,
    pub test: bool,
}

/// Cadence and stop conditions of the status polling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
    pub terminal_statuses: HashSet<PaymentStatus>,
}

impl PollSettings {
    pub fn new(
        interval: Duration,
        max_attempts: u32,
        terminal_statuses: impl IntoIterator<Item = PaymentStatus>,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(PaymentError::ValidationError(
                "Poll interval must be positive".to_string(),
            ));
        }
        if max_attempts == 0 {
            return Err(PaymentError::ValidationError(
                "Max attempts must be positive".to_string(),
            ));
        }
        let terminal_statuses: HashSet<_> = terminal_statuses.into_iter().collect();
        if terminal_statuses.is_empty() {
            return Err(PaymentError::ValidationError(
                "At least one terminal status is required".to_string(),
            ));
        }
        Ok(Self {
            interval,
            max_attempts,
            terminal_statuses,
        })
    }

    pub fn is_terminal(&self, status: &PaymentStatus) -> bool {
        self.terminal_statuses.contains(status)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub checkout: CheckoutSettings,
    pub poll: PollSettings,
    pub request_timeout: Duration,
}
