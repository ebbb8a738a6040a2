//! 请求组装：路径拼接、百分号编码与参数载荷编码
//!
//! 动词固定为 POST；路径形如 `namespaces/{ns}/{actions|triggers}/[{pkg}/]{name}`，
//! blocking 调用追加 `?blocking=true`。

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::{json, Value};

use crate::core::ClientError;

/// query 位置允许之外的字符转义（控制字符、空格与 `"` `#` `<` `>`）
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// 调用目标类别；两者仅路径段与 verbose 注解键不同
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Action,
    Trigger,
}

impl EntityKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Action => "actions",
            Self::Trigger => "triggers",
        }
    }

    /// verbose 回执中附带请求 URL 的键名
    pub fn url_key(&self) -> &'static str {
        match self {
            Self::Action => "actionUrl",
            Self::Trigger => "triggerUrl",
        }
    }
}

/// 发往传输层的请求（头部固定：Basic 认证 + JSON 内容类型）
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub url: String,
    pub auth_header: String,
    pub body: Option<String>,
}

/// 传输层回执：状态码与原始响应体
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// 组装相对路径；namespace / package 为空串时分别回退为 `_` 与无包名
pub fn entity_path(
    namespace: &str,
    kind: EntityKind,
    package: Option<&str>,
    name: &str,
    blocking: bool,
) -> String {
    let namespace = if namespace.is_empty() { "_" } else { namespace };
    let mut path = format!("namespaces/{}/{}/", namespace, kind.path_segment());

    match package {
        Some(pkg) if !pkg.is_empty() => {
            path.push_str(pkg);
            path.push('/');
            path.push_str(name);
        }
        _ => path.push_str(name),
    }

    if blocking {
        path.push_str("?blocking=true");
    }

    path
}

/// 路径百分号编码
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, QUERY_ENCODE_SET).to_string()
}

/// 参数载荷编码：对象原样作为请求体；字符串包成 `{"payload": "<s>"}`；
/// 其余 JSON 值包成 `{"payload": <v>}`
pub fn encode_parameters(parameters: &Value) -> Result<String, ClientError> {
    let body = match parameters {
        Value::Object(_) => parameters.clone(),
        Value::String(s) => json!({ "payload": s }),
        other => json!({ "payload": other }),
    };

    serde_json::to_string(&body).map_err(|e| ClientError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_path_bare_name() {
        assert_eq!(
            entity_path("_", EntityKind::Action, None, "echo", false),
            "namespaces/_/actions/echo"
        );
    }

    #[test]
    fn test_entity_path_with_package_and_blocking() {
        assert_eq!(
            entity_path("ns", EntityKind::Action, Some("util"), "echo", true),
            "namespaces/ns/actions/util/echo?blocking=true"
        );
    }

    #[test]
    fn test_entity_path_trigger() {
        assert_eq!(
            entity_path("ns", EntityKind::Trigger, None, "heartbeat", false),
            "namespaces/ns/triggers/heartbeat"
        );
    }

    #[test]
    fn test_entity_path_empty_namespace_and_package() {
        assert_eq!(
            entity_path("", EntityKind::Action, Some(""), "echo", false),
            "namespaces/_/actions/echo"
        );
    }

    #[test]
    fn test_encode_path_escapes_spaces() {
        assert_eq!(
            encode_path("namespaces/_/actions/my action"),
            "namespaces/_/actions/my%20action"
        );
    }

    #[test]
    fn test_encode_parameters_object() {
        let body = encode_parameters(&json!({"imageDocumentId": "doc-1"})).unwrap();
        assert_eq!(body, r#"{"imageDocumentId":"doc-1"}"#);
    }

    #[test]
    fn test_encode_parameters_string() {
        let body = encode_parameters(&json!("hello")).unwrap();
        assert_eq!(body, r#"{"payload":"hello"}"#);
    }

    #[test]
    fn test_encode_parameters_scalar() {
        let body = encode_parameters(&json!(42)).unwrap();
        assert_eq!(body, r#"{"payload":42}"#);
    }
}
