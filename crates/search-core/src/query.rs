// search-core/src/query.rs
//! 查询构建
//!
//! 两种查询体：
//! - 空查询：match_all，按创建时间倒序
//! - 非空查询：多字段短语匹配 + 高亮，按相关度排序
//!
//! 上一页最后一条结果的 `sort` 值可作为游标传入，生成 `search_after`。

use serde_json::{Value, json};

use crate::error::{StoreError, StoreResult};

/// 每页返回的结果数
pub const PAGE_SIZE: usize = 25;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_BRIEF: &str = "brief_content";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_COMPANY: &str = "author_info.company";
pub const FIELD_CREATE_TIME: &str = "create_time";

/// 构建完整的 `_search` 请求体
pub fn build_query(query: &str, after: Option<&str>) -> StoreResult<Value> {
    let mut body = if query.is_empty() {
        match_all()
    } else {
        match_phrase(query)
    };

    if let Some(cursor) = parse_cursor(after)? {
        body["search_after"] = cursor;
    }

    Ok(body)
}

fn match_all() -> Value {
    json!({
        "query": { "match_all": {} },
        "size": PAGE_SIZE,
        "sort": [
            { FIELD_CREATE_TIME: "desc" },
            { "_doc": "asc" }
        ]
    })
}

fn match_phrase(query: &str) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": query,
                "fields": [
                    format!("{FIELD_TITLE}^100"),
                    format!("{FIELD_BRIEF}^100"),
                    FIELD_CATEGORY,
                    FIELD_COMPANY
                ],
                "operator": "and",
                "type": "phrase"
            }
        },
        "highlight": {
            "fields": {
                FIELD_TITLE: { "number_of_fragments": 0 },
                FIELD_BRIEF: { "number_of_fragments": 3, "fragment_size": 25 },
                FIELD_CATEGORY: { "number_of_fragments": 0 },
                FIELD_COMPANY: { "number_of_fragments": 0 }
            }
        },
        "size": PAGE_SIZE,
        "sort": [
            { "_score": "desc" },
            { "_doc": "asc" }
        ]
    })
}

/// 空串和 `null` 视为没有游标，其余必须是 JSON 数组
fn parse_cursor(after: Option<&str>) -> StoreResult<Option<Value>> {
    let raw = match after.map(str::trim) {
        None | Some("") | Some("null") => return Ok(None),
        Some(raw) => raw,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Array(_)) => Ok(Some(value)),
        _ => Err(StoreError::InvalidCursor(raw.to_string())),
    }
}
