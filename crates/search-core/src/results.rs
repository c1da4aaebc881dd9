// search-core/src/results.rs
//! 查询结果
//!
//! 把引擎的 `hits` 信封解码成 [`SearchResults`]。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;
use crate::models::Document;

/// 一次查询的结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub total: u64,
    /// 没有结果时为空数组，而不是缺失
    pub hits: Vec<Hit>,
}

/// 单条结果
#[derive(Debug, Clone, Serialize)]
pub struct Hit {
    #[serde(flatten)]
    pub document: Document,
    /// 排序值，可原样作为下一页的游标
    pub sort: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
}

/// 各字段的高亮片段，片段内用 `<em>` 标记命中词
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(rename = "brief_content", default)]
    pub brief: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(rename = "author_info.company", default)]
    pub company: Vec<String>,
}

impl Hit {
    /// 下一页游标：本条结果 `sort` 的 JSON 文本
    pub fn cursor(&self) -> Option<String> {
        if self.sort.is_empty() {
            return None;
        }
        serde_json::to_string(&self.sort).ok()
    }

    pub fn title(&self) -> &str {
        first_or(self.highlights.as_ref().map(|h| &h.title), &self.document.title)
    }

    pub fn brief(&self) -> &str {
        first_or(self.highlights.as_ref().map(|h| &h.brief), &self.document.brief)
    }

    pub fn category(&self) -> &str {
        first_or(self.highlights.as_ref().map(|h| &h.category), &self.document.category)
    }

    pub fn company(&self) -> &str {
        first_or(
            self.highlights.as_ref().map(|h| &h.company),
            &self.document.author.company,
        )
    }
}

/// 有高亮片段时用第一段，否则用原文
fn first_or<'a>(fragments: Option<&'a Vec<String>>, plain: &'a str) -> &'a str {
    fragments
        .and_then(|f| f.first())
        .map(String::as_str)
        .unwrap_or(plain)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: Total,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// 7.x 之后是 `{"value": n}`，更早的版本是裸数字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Total {
    Object { value: u64 },
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Document,
    #[serde(rename = "highlight", default)]
    highlights: Option<Highlights>,
    #[serde(default)]
    sort: Vec<Value>,
}

impl SearchResults {
    pub fn from_response(body: &str) -> StoreResult<Self> {
        let envelope: Envelope = serde_json::from_str(body)?;

        let total = match envelope.hits.total {
            Total::Object { value } | Total::Number(value) => value,
        };

        let hits = envelope
            .hits
            .hits
            .into_iter()
            .map(|raw| {
                let mut document = raw.source;
                document.id = raw.id;
                Hit {
                    document,
                    sort: raw.sort,
                    highlights: raw.highlights,
                }
            })
            .collect();

        Ok(Self { total, hits })
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 本页已满时返回下一页游标
    pub fn next_cursor(&self, page_size: usize) -> Option<String> {
        if self.hits.len() < page_size {
            return None;
        }
        self.hits.last().and_then(Hit::cursor)
    }
}
