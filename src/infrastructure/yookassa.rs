use super::http::{HttpTransport, RawResponse};
use crate::config::ApiSettings;
use crate::domain::payment::{Payment, PaymentRequest};
use crate::domain::ports::PaymentGateway;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use tracing::debug;
use uuid::Uuid;

pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

/// Client for the YooKassa v3 payments API.
///
/// Requests are assembled here (credentials, headers, body) and handed to an
/// [`HttpTransport`], so the status and decoding rules stay independent of
/// the network layer.
pub struct YooKassaClient<T> {
    settings: ApiSettings,
    transport: T,
    builder: reqwest::Client,
}

impl<T: HttpTransport> YooKassaClient<T> {
    pub fn new(settings: ApiSettings, transport: T) -> Result<Self> {
        let builder = reqwest::Client::builder().build()?;
        Ok(Self {
            settings,
            transport,
            builder,
        })
    }

    /// `<base>/payments`, or `<base>/payments/<id>` when an id is given.
    fn payments_url(&self, payment_id: Option<&str>) -> Result<Url> {
        let mut url = self.settings.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PaymentError::ValidationError(format!(
                    "Base URL {} cannot carry a path",
                    self.settings.base_url
                ))
            })?;
            segments.pop_if_empty().push("payments");
            if let Some(id) = payment_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.builder
            .request(method, url)
            .basic_auth(&self.settings.shop_id, Some(&self.settings.secret_key))
    }

    /// Builds the creation request with the given idempotence key.
    pub fn create_request(
        &self,
        payment: &PaymentRequest,
        idempotence_key: &str,
    ) -> Result<reqwest::Request> {
        let url = self.payments_url(None)?;
        let request = self
            .request(Method::POST, url)
            .header(IDEMPOTENCE_KEY_HEADER, idempotence_key)
            .json(payment)
            .build()?;
        Ok(request)
    }

    pub fn fetch_request(&self, payment_id: &str) -> Result<reqwest::Request> {
        if payment_id.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Payment ID must not be empty".to_string(),
            ));
        }
        let url = self.payments_url(Some(payment_id))?;
        let request = self
            .request(Method::GET, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .build()?;
        Ok(request)
    }

    async fn send(&self, request: reqwest::Request) -> Result<Payment> {
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "Received response");
        decode_payment(response)
    }
}

/// Accepts only `200 OK`; anything else is surfaced with its body.
fn decode_payment(response: RawResponse) -> Result<Payment> {
    if response.status != StatusCode::OK.as_u16() {
        return Err(PaymentError::ResponseError {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

#[async_trait]
impl<T: HttpTransport> PaymentGateway for YooKassaClient<T> {
    async fn create_payment(&self, payment: &PaymentRequest) -> Result<Payment> {
        // A fresh key per call: every call is a new logical attempt.
        let idempotence_key = Uuid::new_v4().to_string();
        let request = self.create_request(payment, &idempotence_key)?;
        debug!(
            method = %request.method(),
            url = %request.url(),
            idempotence_key = %idempotence_key,
            "Creating payment"
        );
        self.send(request).await
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        let request = self.fetch_request(payment_id)?;
        debug!(method = %request.method(), url = %request.url(), "Fetching payment");
        self.send(request).await
    }
}
