use checkout_poller::application::checkout::initiate_payment;
use checkout_poller::application::polling::{StopReason, poll_until_settled};
use checkout_poller::domain::ports::PaymentGatewayRef;
use checkout_poller::infrastructure::http::ReqwestTransport;
use checkout_poller::infrastructure::yookassa::YooKassaClient;
use checkout_poller::interfaces::cli::Cli;
use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the payment report only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.into_settings().into_diagnostic()?;

    let transport = ReqwestTransport::new(settings.request_timeout).into_diagnostic()?;
    let client = YooKassaClient::new(settings.api, transport).into_diagnostic()?;
    let gateway: PaymentGatewayRef = Arc::new(client);

    let payment = initiate_payment(gateway.as_ref(), &settings.checkout)
        .await
        .into_diagnostic()
        .wrap_err("Failed to create payment")?;

    println!(
        "Payment created with ID: {}, Status: {}",
        payment.id, payment.status
    );
    match payment.confirmation_url() {
        Some(url) => println!("Payment URL: {url}"),
        None => warn!(payment_id = %payment.id, "Payment has no confirmation URL"),
    }

    let outcome = poll_until_settled(gateway, &payment.id, settings.poll)
        .await
        .into_diagnostic()?;

    match (outcome.reason, &outcome.last_status) {
        (StopReason::Terminal, Some(status)) => {
            println!("Final status reached: {status}. Stopping checks.")
        }
        _ => println!(
            "Attempt budget of {} checks exhausted. Stopping checks.",
            outcome.attempts
        ),
    }
    info!(
        payment_id = %payment.id,
        reason = %outcome.reason,
        attempts = outcome.attempts,
        "Polling finished"
    );

    println!("Payment status checking completed.");
    Ok(())
}
