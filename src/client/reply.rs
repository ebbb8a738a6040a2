//! 调用回执与响应归一化
//!
//! 成功回执是一个 JSON 映射：归一化模式仅保留 activationId 与（blocking 时的）result；
//! verbose 模式返回完整响应体并附带请求 URL。result 为 JSON 编码字符串时做二次解码，
//! 兼容把结果预序列化成字符串返回的 Action；解码失败降级为字面字符串。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::request::EntityKind;
use crate::core::ClientError;

/// 调用回执：对 JSON 映射的类型化视图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reply(Map<String, Value>);

impl Reply {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// 激活标识；归一化回执必有
    pub fn activation_id(&self) -> Option<&str> {
        self.0.get("activationId").and_then(Value::as_str)
    }

    /// blocking 调用的结果载荷
    pub fn result(&self) -> Option<&Value> {
        self.0.get("result")
    }

    /// 将结果载荷反序列化为调用方类型
    pub fn decode_result<T: serde::de::DeserializeOwned>(&self) -> Result<T, ClientError> {
        let value = self.result().cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| ClientError::Json(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Reply {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 将成功（< 300）的响应体归一化为回执
///
/// 响应体含 `error` 字段时上抛 Processing 错误；verbose 模式返回完整响应体并附带
/// 请求 URL；否则仅保留 activationId，blocking 时抽取 `response.result` 并按需二次解码。
pub fn normalize_response(
    body: &str,
    kind: EntityKind,
    request_url: &str,
    blocking: bool,
    verbose: bool,
) -> Result<Reply, ClientError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|e| ClientError::Json(e.to_string()))?;
    let Value::Object(mut response) = parsed else {
        return Err(ClientError::Json("Response body is not a JSON object".to_string()));
    };

    if let Some(message) = response.get("error").and_then(Value::as_str) {
        let code = response.get("code").and_then(Value::as_i64).unwrap_or(-1);
        tracing::warn!(code, "backend reported processing error");
        return Err(ClientError::Processing {
            description: message.to_string(),
            code,
        });
    }

    if verbose {
        response.insert(
            kind.url_key().to_string(),
            Value::String(request_url.to_string()),
        );
        return Ok(Reply::new(response));
    }

    let mut reply = Map::new();
    if let Some(id) = response.get("activationId") {
        reply.insert("activationId".to_string(), id.clone());
    }

    if blocking {
        if let Some(result) = response.get("response").and_then(|r| r.get("result")) {
            reply.insert("result".to_string(), decode_result_payload(result));
        }
    }

    Ok(Reply::new(reply))
}

/// 预序列化 JSON 字符串载荷的二次解码；解析失败降级为原字符串
fn decode_result_payload(result: &Value) -> Value {
    match result {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(decoded) => decoded,
            Err(_) => {
                tracing::debug!("result payload is not JSON, keeping string literal");
                Value::String(s.clone())
            }
        },
        other => other.clone(),
    }
}
