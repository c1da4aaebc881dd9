// search-core/src/models.rs
//! 数据模型定义

use serde::{Deserialize, Serialize};

/// 一篇掘金文章，`id` 同时作为索引中的文档 ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "article_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "brief_content", default)]
    pub brief: String,
    #[serde(default)]
    pub category: String,
    /// 创建时间（Unix 时间戳秒，字符串形式）
    #[serde(default)]
    pub create_time: String,
    #[serde(rename = "author_info", default)]
    pub author: Author,
}

/// 作者信息，仅用于展示
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub description: String,
}

impl Document {
    /// 序列化为写入索引的 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
