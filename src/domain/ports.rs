use super::payment::{Payment, PaymentRequest, PaymentStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote service that owns payments and their state transitions.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submits a new payment. Each call is a distinct logical attempt.
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment>;

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment>;

    /// Looks up the current status of a payment.
    async fn fetch_status(&self, payment_id: &str) -> Result<PaymentStatus> {
        Ok(self.fetch_payment(payment_id).await?.status)
    }
}

pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
