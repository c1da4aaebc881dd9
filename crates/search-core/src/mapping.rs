// search-core/src/mapping.rs
//! 索引 mapping
//!
//! 中文字段使用 IK 分词插件：索引时 `ik_max_word`，查询时 `ik_smart`。

use serde_json::{Value, json};

const INDEX_ANALYZER: &str = "ik_max_word";
const SEARCH_ANALYZER: &str = "ik_smart";

fn analyzed_text() -> Value {
    json!({ "type": "text", "analyzer": INDEX_ANALYZER, "search_analyzer": SEARCH_ANALYZER })
}

/// `index --setup` 创建索引时使用的 mapping
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "article_id": { "type": "keyword" },
                "title": analyzed_text(),
                "brief_content": analyzed_text(),
                "category": analyzed_text(),
                "create_time": { "type": "date", "format": "epoch_second" },
                "author_info": {
                    "properties": {
                        "user_name": { "type": "keyword" },
                        "company": analyzed_text(),
                        "job_title": { "type": "text" },
                        "description": { "type": "text" }
                    }
                }
            }
        }
    })
}
