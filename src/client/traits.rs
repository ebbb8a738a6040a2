//! 传输层抽象
//!
//! 所有传输实现（reqwest / Mock）实现 Transport：执行一次 POST 并返回状态码与响应体。
//! 归一化、错误分类等都在传输之上，便于测试不经网络走通整条调用链。

use async_trait::async_trait;

use crate::client::request::{WireRequest, WireResponse};
use crate::core::ClientError;

/// 传输 trait：执行一次请求；网络失败返回 Transport 错误，URL 非法返回 MalformedUrl
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, ClientError>;
}
