// ABOUTME: reqwest-backed ChatApi — health probe and chat call against the configured base URL.
// ABOUTME: Maps non-2xx answers to Rejected, pulling the server's error message when present.

use async_trait::async_trait;
use reqwest::Client;

use crate::client::api::{ChatApi, ChatRequest, ChatResponse, REQUEST_ID_HEADER, error_message};
use crate::client::error::TransportError;

/// Production chat service client.
#[derive(Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "Invalid base URL '{}': expected an http:// or https:// URL",
                base_url
            );
        }
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn health(&self) -> Result<(), TransportError> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Rejected {
                status: Some(status.as_u16()),
                message: None,
            })
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint("chat"))
            .header(REQUEST_ID_HEADER, &request.request_id)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: Some(status.as_u16()),
                message: error_message(&body),
            });
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
