use crate::config::CheckoutSettings;
use crate::domain::payment::{ConfirmationRequest, Payment, PaymentRequest, Receipt, ReceiptItem};
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use tracing::info;

/// Builds a redirect-confirmed payment with a one-item receipt matching the
/// payment amount.
pub fn build_request(settings: &CheckoutSettings) -> PaymentRequest {
    let item = ReceiptItem::single(
        settings.item_description.clone(),
        settings.amount.clone(),
        settings.vat_code,
    );

    PaymentRequest {
        amount: settings.amount.clone(),
        confirmation: ConfirmationRequest::Redirect {
            return_url: settings.return_url.clone(),
        },
        description: settings.description.clone(),
        capture: settings.capture,
        test: settings.test,
        receipt: Receipt {
            items: vec![item],
            email: settings.receipt_email.clone(),
        },
    }
}

/// Creates the payment. Failures are returned as-is; there is nothing to
/// poll without a payment.
pub async fn initiate_payment(
    gateway: &dyn PaymentGateway,
    settings: &CheckoutSettings,
) -> Result<Payment> {
    let request = build_request(settings);
    let payment = gateway.create_payment(&request).await?;
    info!(
        payment_id = %payment.id,
        status = %payment.status,
        amount = %payment.amount,
        "Payment created"
    );
    Ok(payment)
}
