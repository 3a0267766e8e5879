//! Delivery through the EmailJS REST API.
//!
//! The configured template receives `from_name`, `reply_to`, `message` and
//! `to_email` as template parameters.

use folio_contact::{Delivery, DeliveryError, OutboundMessage};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com";

#[derive(Debug, Deserialize, Clone)]
pub struct EmailJsConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    /// Optional access token, required when the account enforces
    /// private-key authentication for API calls.
    #[serde(default)]
    pub private_key: Option<String>,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            private_key: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: &'a OutboundMessage,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
}

#[derive(Clone)]
pub struct EmailJs {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJs {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}/api/v1.0/email/send",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    pub fn request<'a>(&'a self, message: &'a OutboundMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: message,
            access_token: self.config.private_key.as_deref(),
        }
    }

    async fn post(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(self.url())
            .json(&self.request(message))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("emailjs responded {status}: {body}");
        }

        tracing::debug!(%status, "emailjs accepted message");

        Ok(())
    }
}

#[async_trait::async_trait]
impl Delivery for EmailJs {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        Ok(self.post(message).await?)
    }
}
