// search-core/src/error.rs
//! 存储层错误类型

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP 客户端创建失败
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid Elasticsearch URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid index name {0:?}")]
    InvalidIndexName(String),

    /// 引擎拒绝了索引创建（例如索引已存在）
    #[error("cannot create index: [{status}] {reason}")]
    IndexCreation { status: u16, reason: String },

    #[error("cannot store document {id}: [{status}] {kind}: {reason}")]
    Write {
        id: String,
        status: u16,
        kind: String,
        reason: String,
    },

    /// 非 200/404 的状态码，或查询被引擎拒绝
    #[error("[{status}] {reason}")]
    Query { status: u16, reason: String },

    #[error("invalid search cursor {0:?}")]
    InvalidCursor(String),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed engine response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 从 `{"error": {"type": .., "reason": ..}}` 中取出错误类型和原因。
/// 某些响应的 `error` 是纯字符串，或者干脆没有响应体。
pub(crate) fn engine_error(body: &str) -> (String, String) {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return (String::from("unknown"), body.trim().to_string()),
    };

    match &value["error"] {
        serde_json::Value::Object(err) => {
            let kind = err
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            let reason = err
                .get("reason")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            (kind, reason)
        }
        serde_json::Value::String(s) => (String::from("unknown"), s.clone()),
        _ => (String::from("unknown"), body.trim().to_string()),
    }
}
