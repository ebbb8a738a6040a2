//! Wisp - Rust Serverless Action 调用客户端
//!
//! 模块划分：
//! - **client**: 调用客户端（限定名解析、请求组装、传输抽象、回执归一化、Mock）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **observability**: tracing 初始化

pub mod client;
pub mod config;
pub mod core;
pub mod observability;

pub use client::{Client, Credentials, QualifiedName, Reply};
pub use crate::core::ClientError;
