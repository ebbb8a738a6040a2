//! 客户端错误类型
//!
//! 所有失败以封闭的 ClientError 枚举经 Result 返回，不跨异步边界抛出；
//! 客户端不做自动重试，是否重新提交由调用方决定。

use thiserror::Error;

/// 一次调用可能出现的错误（传输、URL、状态码、JSON、后端处理、凭证、限定名）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// 网络传输失败；能拿到 HTTP 状态码时一并携带
    #[error("Transport error: {description}")]
    Transport {
        description: String,
        status: Option<u16>,
    },

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// 非 2xx HTTP 状态
    #[error("Backend returned HTTP error code {status}")]
    Status { status: u16 },

    #[error("JSON error: {0}")]
    Json(String),

    /// 后端处理错误；code 取响应中的 code 字段，缺省 -1
    #[error("Processing error: {description} (code {code})")]
    Processing { description: String, code: i64 },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Qualified name format error: {0}")]
    QualifiedName(String),
}
