//! Mock 支持（用于测试，无需后端）
//!
//! MockOutcome：客户端级 mock，凭证检查后直接返回预置回执/错误，完全绕开网络；
//! MockTransport：传输级 mock，记录请求并返回预置响应，便于测试请求组装与归一化。

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::reply::Reply;
use crate::client::request::{WireRequest, WireResponse};
use crate::client::traits::Transport;
use crate::core::ClientError;

/// 预置的调用结果；error 优先于 reply
#[derive(Debug, Clone, Default)]
pub struct MockOutcome {
    pub reply: Option<Reply>,
    pub error: Option<ClientError>,
}

impl MockOutcome {
    pub fn reply(reply: Reply) -> Self {
        Self {
            reply: Some(reply),
            error: None,
        }
    }

    pub fn error(error: ClientError) -> Self {
        Self {
            reply: None,
            error: Some(error),
        }
    }
}

/// Mock 传输：记录收到的请求并返回预置响应
pub struct MockTransport {
    response: WireResponse,
    requests: Mutex<Vec<WireRequest>>,
}

impl MockTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: WireResponse {
                status,
                body: body.into(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 已执行的请求数
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// 最近一次请求（断言 URL / 认证头 / 请求体用）
    pub fn last_request(&self) -> Option<WireRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, ClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.response.clone())
    }
}
