use crate::error::PaymentError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits the API expects in monetary values.
const MONEY_SCALE: u32 = 2;

pub const SUCCEEDED: &str = "succeeded";
pub const CANCELED: &str = "canceled";

/// A monetary value paired with its ISO 4217 currency code.
///
/// The value travels over the wire as a decimal string (`"10.00"`), which is
/// what `rust_decimal`'s serde support produces by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: Decimal,
    pub currency: String,
}

impl Amount {
    /// Builds an amount for an outgoing request.
    ///
    /// The value must be positive and is rescaled to two decimal places.
    pub fn new(value: Decimal, currency: impl Into<String>) -> Result<Self, PaymentError> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }

        let currency = currency.into();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(PaymentError::ValidationError(format!(
                "Currency must be a three-letter ISO code, got {currency:?}"
            )));
        }

        let mut value = value;
        value.rescale(MONEY_SCALE);
        Ok(Self { value, currency })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Payment status as reported by the remote service.
///
/// Kept opaque: the service owns the lifecycle, we only compare against a
/// configured set of terminal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentStatus(String);

impl PaymentStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation descriptor returned with a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(rename = "type")]
    pub kind: String,
    pub return_url: Option<String>,
    /// Where the payer goes to authorize the payment.
    pub confirmation_url: Option<String>,
}

/// A payment record as returned by both the create and fetch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub status: PaymentStatus,
    pub amount: Amount,
    pub confirmation: Option<Confirmation>,
    pub description: Option<String>,
    #[serde(default)]
    pub capture: bool,
    #[serde(default)]
    pub test: bool,
}

impl Payment {
    pub fn confirmation_url(&self) -> Option<&str> {
        self.confirmation
            .as_ref()
            .and_then(|c| c.confirmation_url.as_deref())
    }
}

/// How the payer confirms the payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfirmationRequest {
    Redirect { return_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    FullPrepayment,
    Prepayment,
    Advance,
    FullPayment,
    PartialPayment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSubject {
    Commodity,
    Excise,
    Job,
    Service,
    Payment,
    Another,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptItem {
    pub description: String,
    pub quantity: Decimal,
    pub amount: Amount,
    pub vat_code: u8,
    pub payment_mode: PaymentMode,
    pub payment_subject: PaymentSubject,
}

impl ReceiptItem {
    /// A single unit of a commodity paid in full, priced at `amount`.
    pub fn single(description: impl Into<String>, amount: Amount, vat_code: u8) -> Self {
        Self {
            description: description.into(),
            quantity: dec!(1.00),
            amount,
            vat_code,
            payment_mode: PaymentMode::FullPayment,
            payment_subject: PaymentSubject::Commodity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub items: Vec<ReceiptItem>,
    pub email: String,
}

/// Body of a payment creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub confirmation: ConfirmationRequest,
    pub description: String,
    pub capture: bool,
    pub test: bool,
    pub receipt: Receipt,
}
