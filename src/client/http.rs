//! reqwest 传输实现
//!
//! 头部固定：`Content-Type: application/json; charset=utf-8` 与 Basic 认证；
//! 超时由配置决定，除此之外不做重试或连接管理。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::client::request::{WireRequest, WireResponse};
use crate::client::traits::Transport;
use crate::core::ClientError;

/// 基于 reqwest 的 HTTPS 传输
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(60)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, ClientError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|_| ClientError::MalformedUrl(request.url.clone()))?;

        let mut builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(AUTHORIZATION, request.auth_header.as_str());

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| ClientError::Transport {
            description: e.to_string(),
            status: e.status().map(|s| s.as_u16()),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ClientError::Transport {
            description: format!("Read body: {}", e),
            status: Some(status),
        })?;

        Ok(WireResponse { status, body })
    }
}
