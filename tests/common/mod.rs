#![allow(dead_code)]

use async_trait::async_trait;
use checkout_poller::config::ApiSettings;
use checkout_poller::domain::payment::{Amount, Payment, PaymentRequest, PaymentStatus};
use checkout_poller::domain::ports::PaymentGateway;
use checkout_poller::error::{PaymentError, Result};
use checkout_poller::infrastructure::http::{HttpTransport, RawResponse};
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

pub const PAYMENT_BODY: &str = r#"{
    "id": "2f4e8c1a-000f-5000-8000-1a2b3c4d5e6f",
    "status": "pending",
    "amount": {"value": "10.00", "currency": "RUB"},
    "confirmation": {
        "type": "redirect",
        "return_url": "https://your-website.com/return",
        "confirmation_url": "https://yoomoney.ru/checkout/payments/v2/contract?orderId=2f4e8c1a"
    },
    "description": "Test payment",
    "capture": true,
    "test": true
}"#;

pub fn api_settings() -> ApiSettings {
    ApiSettings::new("https://api.test/v3", "shop-42".into(), "secret".into()).unwrap()
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
    pub headers: reqwest::header::HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().unwrap()).unwrap()
    }
}

/// Replays canned responses and records every request it receives.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    pub sent: Mutex<Vec<SentRequest>>,
}

impl RecordingTransport {
    pub fn replying(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(status, body)| RawResponse {
                status,
                body: body.to_string(),
            })
            .collect();
        Self {
            responses: Mutex::new(responses),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: reqwest::Request) -> Result<RawResponse> {
        self.sent.lock().unwrap().push(SentRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request.body().and_then(|b| b.as_bytes()).map(<[u8]>::to_vec),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PaymentError::RequestError("connection refused".into()))
    }
}

/// Gateway whose status checks follow a script, then repeat a fallback.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<PaymentStatus>>>,
    fallback: PaymentStatus,
    calls: AtomicU32,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Result<PaymentStatus>>, fallback: &str) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: PaymentStatus::from(fallback),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn status(s: &str) -> Result<PaymentStatus> {
    Ok(PaymentStatus::from(s))
}

pub fn transport_failure() -> Result<PaymentStatus> {
    Err(PaymentError::RequestError("connection reset by peer".into()))
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment> {
        Ok(Payment {
            id: "scripted".to_string(),
            status: PaymentStatus::from("pending"),
            amount: request.amount.clone(),
            confirmation: None,
            description: Some(request.description.clone()),
            capture: request.capture,
            test: request.test,
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let status = match next {
            Some(result) => result?,
            None => self.fallback.clone(),
        };
        Ok(Payment {
            id: payment_id.to_string(),
            status,
            amount: Amount::new(dec!(10.00), "RUB")?,
            confirmation: None,
            description: None,
            capture: true,
            test: true,
        })
    }
}
