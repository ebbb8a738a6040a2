//! 调用客户端：凭证、base URL、verbose / mock 模式与 invoke / fire 操作
//!
//! 每次调用独立组装请求，客户端构造后不可变、无共享可变状态，可在并发任务间共享；
//! 一次调用恰好产生一个回执或一个错误。不自动重试，不支持取消。

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::client::http::HttpTransport;
use crate::client::mock::MockOutcome;
use crate::client::name::QualifiedName;
use crate::client::reply::{normalize_response, Reply};
use crate::client::request::{
    encode_parameters, encode_path, entity_path, EntityKind, WireRequest,
};
use crate::client::traits::Transport;
use crate::config::WispConfig;
use crate::core::ClientError;

/// 调用后端所需的凭证；客户端生命周期内不可变
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_key: Option<String>,
    pub access_token: Option<String>,
    /// 自定义认证流程的保留字段，当前不参与请求
    pub session_token: Option<String>,
    pub jwt_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key: Option<String>, access_token: Option<String>) -> Self {
        Self {
            access_key,
            access_token,
            session_token: None,
            jwt_token: None,
        }
    }

    /// 从环境变量 WISP_ACCESS_KEY / WISP_ACCESS_TOKEN 读取（单元测试与构建任务场景）
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("WISP_ACCESS_KEY").ok(),
            std::env::var("WISP_ACCESS_TOKEN").ok(),
        )
    }
}

/// Action / Trigger 调用客户端
pub struct Client {
    credentials: Credentials,
    base_url: Option<String>,
    verbose_replies: bool,
    mock: Option<MockOutcome>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// 默认 reqwest 传输
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(credentials, Arc::new(HttpTransport::default()))
    }

    /// 注入传输实现（测试时用 MockTransport）
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            base_url: None,
            verbose_replies: false,
            mock: None,
            transport,
        }
    }

    /// 从配置构建：base URL、凭证、verbose 开关与传输超时
    pub fn from_config(config: &WispConfig) -> Self {
        let credentials = Credentials::new(
            config.credentials.access_key.clone(),
            config.credentials.access_token.clone(),
        );
        let mut client = Self::with_transport(
            credentials,
            Arc::new(HttpTransport::new(config.http.timeout_secs)),
        );
        client.set_base_url(config.api.base_url.as_deref());
        client.verbose_replies = config.http.verbose_replies;
        client
    }

    /// 设置后端根地址；自动追加 `api/v1/` 公共前缀
    pub fn set_base_url(&mut self, url: Option<&str>) {
        self.base_url = url.map(|u| {
            let separator = if u.ends_with('/') { "" } else { "/" };
            format!("{}{}api/v1/", u, separator)
        });
    }

    /// 含 `api/v1/` 前缀的完整根地址
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// verbose 模式：返回完整响应体并附带请求 URL，便于诊断
    pub fn set_verbose_replies(&mut self, verbose: bool) {
        self.verbose_replies = verbose;
    }

    /// mock 模式：凭证检查后直接返回预置结果，不做网络调用
    pub fn set_mock(&mut self, mock: MockOutcome) {
        self.mock = Some(mock);
    }

    /// 按限定名调用 Action
    pub async fn invoke_action(
        &self,
        qualified_name: &str,
        parameters: Option<&Value>,
        blocking: bool,
    ) -> Result<Reply, ClientError> {
        let parts = QualifiedName::parse(qualified_name)?;
        self.invoke_action_with(
            &parts.name,
            parts.package.as_deref(),
            &parts.namespace,
            parameters,
            blocking,
        )
        .await
    }

    /// 按组成部分调用 Action
    pub async fn invoke_action_with(
        &self,
        name: &str,
        package: Option<&str>,
        namespace: &str,
        parameters: Option<&Value>,
        blocking: bool,
    ) -> Result<Reply, ClientError> {
        self.dispatch(EntityKind::Action, namespace, package, name, parameters, blocking)
            .await
    }

    /// 按限定名触发 Trigger（总是非阻塞）
    pub async fn fire_trigger(
        &self,
        qualified_name: &str,
        parameters: Option<&Value>,
    ) -> Result<Reply, ClientError> {
        let parts = QualifiedName::parse(qualified_name)?;
        self.fire_trigger_with(
            &parts.name,
            parts.package.as_deref(),
            &parts.namespace,
            parameters,
        )
        .await
    }

    /// 按组成部分触发 Trigger
    pub async fn fire_trigger_with(
        &self,
        name: &str,
        package: Option<&str>,
        namespace: &str,
        parameters: Option<&Value>,
    ) -> Result<Reply, ClientError> {
        self.dispatch(EntityKind::Trigger, namespace, package, name, parameters, false)
            .await
    }

    /// 组装并执行一次调用；mock 模式在凭证检查之后、组装 URL 之前短路
    async fn dispatch(
        &self,
        kind: EntityKind,
        namespace: &str,
        package: Option<&str>,
        name: &str,
        parameters: Option<&Value>,
        blocking: bool,
    ) -> Result<Reply, ClientError> {
        let (access_key, access_token) = match (
            &self.credentials.access_key,
            &self.credentials.access_token,
        ) {
            (Some(key), Some(token)) => (key, token),
            _ => {
                return Err(ClientError::Credential(
                    "Access key and token not set".to_string(),
                ))
            }
        };

        if let Some(ref mock) = self.mock {
            if let Some(ref error) = mock.error {
                return Err(error.clone());
            }
            return Ok(mock.reply.clone().unwrap_or_default());
        }

        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::MalformedUrl("Base URL not set".to_string()))?;

        let path = entity_path(namespace, kind, package, name, blocking);
        // verbose 回执附带未编码的请求 URL
        let request_url = format!("{}{}", base_url, path);
        let url = format!("{}{}", base_url, encode_path(&path));

        let auth = STANDARD.encode(format!("{}:{}", access_key, access_token));
        let body = parameters.map(encode_parameters).transpose()?;

        let request = WireRequest {
            url,
            auth_header: format!("Basic {}", auth),
            body,
        };

        tracing::debug!(url = %request.url, kind = ?kind, blocking, "dispatching invocation");

        let response = self.transport.execute(&request).await?;

        if response.status >= 300 {
            tracing::warn!(status = response.status, "backend returned HTTP error");
            return Err(ClientError::Status {
                status: response.status,
            });
        }

        normalize_response(&response.body, kind, &request_url, blocking, self.verbose_replies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_appends_api_prefix() {
        let mut client = Client::new(Credentials::default());
        client.set_base_url(Some("https://whisk.example.com"));
        assert_eq!(client.base_url(), Some("https://whisk.example.com/api/v1/"));
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let mut client = Client::new(Credentials::default());
        client.set_base_url(Some("https://whisk.example.com/"));
        assert_eq!(client.base_url(), Some("https://whisk.example.com/api/v1/"));
    }

    #[test]
    fn test_base_url_unset() {
        let mut client = Client::new(Credentials::default());
        client.set_base_url(None);
        assert_eq!(client.base_url(), None);
    }

    #[test]
    fn test_credentials_from_env() {
        std::env::set_var("WISP_ACCESS_KEY", "env-key");
        std::env::set_var("WISP_ACCESS_TOKEN", "env-token");

        let credentials = Credentials::from_env();
        assert_eq!(credentials.access_key.as_deref(), Some("env-key"));
        assert_eq!(credentials.access_token.as_deref(), Some("env-token"));

        std::env::remove_var("WISP_ACCESS_KEY");
        std::env::remove_var("WISP_ACCESS_TOKEN");
    }
}
