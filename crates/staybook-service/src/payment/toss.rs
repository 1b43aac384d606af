//! Toss Payments v1 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, instrument};

use staybook_core::config::PaymentConfig;
use staybook_core::error::{AppError, ErrorKind};

use super::gateway::{GatewayPayment, PaymentGateway};

/// Error body returned by Toss on non-2xx responses.
#[derive(Debug, Deserialize)]
struct TossError {
    code: String,
    message: String,
}

/// [`PaymentGateway`] backed by the Toss Payments REST API.
///
/// Requests authenticate with HTTP basic auth using the secret key as the
/// user name and an empty password.
#[derive(Debug, Clone)]
pub struct TossGateway {
    client: Client,
    config: PaymentConfig,
}

impl TossGateway {
    /// Create a gateway client from configuration.
    pub fn new(config: PaymentConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client, config })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.config.toss_api_base.trim_end_matches('/'), path);

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(&self.config.toss_secret_key, None::<&str>);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, path, "Toss request failed");
            AppError::with_source(ErrorKind::Gateway, "결제 서버와 통신할 수 없습니다", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, path, "Toss API error");
            let message = serde_json::from_str::<TossError>(&body)
                .map(|e| format!("{} ({})", e.message, e.code))
                .unwrap_or_else(|_| format!("결제 처리에 실패했습니다 ({status})"));
            return Err(AppError::gateway(message));
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, path, "Failed to parse Toss response");
            AppError::with_source(ErrorKind::Gateway, "결제 서버 응답을 해석할 수 없습니다", e)
        })
    }
}

#[async_trait]
impl PaymentGateway for TossGateway {
    #[instrument(skip(self, payment_key))]
    async fn confirm(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> Result<GatewayPayment, AppError> {
        debug!(order_id, amount, "Confirming payment with Toss");
        self.request(
            Method::POST,
            "/v1/payments/confirm",
            Some(json!({
                "paymentKey": payment_key,
                "orderId": order_id,
                "amount": amount,
            })),
        )
        .await
    }

    #[instrument(skip(self, payment_key))]
    async fn fetch(&self, payment_key: &str) -> Result<GatewayPayment, AppError> {
        self.request(Method::GET, &format!("/v1/payments/{payment_key}"), None)
            .await
    }

    #[instrument(skip(self, payment_key))]
    async fn cancel(
        &self,
        payment_key: &str,
        reason: &str,
        amount: Option<i64>,
    ) -> Result<GatewayPayment, AppError> {
        let mut body = json!({ "cancelReason": reason });
        if let Some(amount) = amount {
            body["cancelAmount"] = json!(amount);
        }
        self.request(
            Method::POST,
            &format!("/v1/payments/{payment_key}/cancel"),
            Some(body),
        )
        .await
    }
}
