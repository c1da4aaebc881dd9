// search-core/src/store.rs
//! Elasticsearch 存储
//!
//! 通过 REST 接口操作单个索引：建索引、写入、判断存在、删除、查询。

use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{StoreError, StoreResult, engine_error};
use crate::models::Document;
use crate::query::build_query;
use crate::results::SearchResults;

/// 爬虫所需的最小存储接口
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn exists(&self, id: &str) -> StoreResult<bool>;
    async fn create(&self, document: &Document) -> StoreResult<()>;
}

/// 存储配置
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// 引擎地址，例如 `http://localhost:9200`
    pub url: String,
    pub index_name: String,
}

pub struct Store {
    client: Client,
    base: Url,
    index_name: String,
}

impl Store {
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = Client::builder().build().map_err(StoreError::Client)?;
        Self::with_client(client, config)
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(client: Client, config: StoreConfig) -> StoreResult<Self> {
        let base = parse_base_url(&config.url)?;
        validate_index_name(&config.index_name)?;

        Ok(Self {
            client,
            base,
            index_name: config.index_name,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // parse_base_url 保证了 base 可以追加路径
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(&self.index_name).extend(segments);
        }
        url
    }

    /// 用给定的 mapping 创建索引
    pub async fn create_index(&self, mapping: &Value) -> StoreResult<()> {
        let res = self
            .client
            .put(self.endpoint(&[]))
            .json(mapping)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let (kind, reason) = engine_error(&res.text().await?);
            return Err(StoreError::IndexCreation {
                status: status.as_u16(),
                reason: format!("{kind}: {reason}"),
            });
        }

        tracing::info!(index = %self.index_name, "Index created");
        Ok(())
    }

    /// 按 id 写入文档，已存在则覆盖
    pub async fn create(&self, document: &Document) -> StoreResult<()> {
        let res = self
            .client
            .put(self.endpoint(&["_doc", &document.id]))
            .json(document)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let (kind, reason) = engine_error(&res.text().await?);
            return Err(StoreError::Write {
                id: document.id.clone(),
                status: status.as_u16(),
                kind,
                reason,
            });
        }

        Ok(())
    }

    /// id 对应的文档存在时返回 true
    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        let res = self
            .client
            .head(self.endpoint(&["_doc", id]))
            .send()
            .await?;

        found_or_missing(res.status())
    }

    /// 删除指定 id 的文档，文档不存在时返回 false
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let res = self
            .client
            .delete(self.endpoint(&["_doc", id]))
            .send()
            .await?;

        found_or_missing(res.status())
    }

    /// 根据查询词查询，`after` 为上一页最后一条结果的 sort 值
    pub async fn search(&self, query: &str, after: Option<&str>) -> StoreResult<SearchResults> {
        let body = build_query(query, after)?;
        tracing::debug!(index = %self.index_name, %body, "Search request");

        let res = self
            .client
            .post(self.endpoint(&["_search"]))
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            let (kind, reason) = engine_error(&text);
            return Err(StoreError::Query {
                status: status.as_u16(),
                reason: format!("{kind}: {reason}"),
            });
        }

        let results = SearchResults::from_response(&text)?;
        tracing::debug!(total = results.total, hits = results.hits.len(), "Search response");
        Ok(results)
    }
}

#[async_trait::async_trait]
impl DocumentStore for Store {
    async fn exists(&self, id: &str) -> StoreResult<bool> {
        Store::exists(self, id).await
    }

    async fn create(&self, document: &Document) -> StoreResult<()> {
        Store::create(self, document).await
    }
}

fn found_or_missing(status: StatusCode) -> StoreResult<bool> {
    match status {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        other => Err(StoreError::Query {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or("unexpected status").to_string(),
        }),
    }
}

fn parse_base_url(raw: &str) -> StoreResult<Url> {
    let invalid = |reason: &str| StoreError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL"));
    }
    Ok(url)
}

/// Elasticsearch 的索引命名规则
fn validate_index_name(name: &str) -> StoreResult<()> {
    const FORBIDDEN: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.starts_with(['-', '_', '+'])
        && !name.contains(FORBIDDEN)
        && !name.chars().any(char::is_uppercase);

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidIndexName(name.to_string()))
    }
}
