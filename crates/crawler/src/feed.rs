// crawler/src/feed.rs
//! 推荐流接口：请求体、响应解码、以及把条目转换成 [`Document`]

use reqwest::Client;
use serde::{Deserialize, Serialize};

use search_core::{Author, Document};

use crate::cursor::encode_cursor;
use crate::error::{CrawlError, CrawlResult};

/// 每页条数，接口固定
pub const PAGE_SIZE: usize = 20;

const CLIENT_TYPE: u32 = 2608;
const ID_TYPE: u32 = 2;
const SORT_TYPE: u32 = 200;

/// 推荐流请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRequest {
    pub client_type: u32,
    pub cursor: String,
    pub id_type: u32,
    pub limit: usize,
    pub sort_type: u32,
}

impl FeedRequest {
    pub fn for_offset(offset: usize) -> Self {
        Self {
            client_type: CLIENT_TYPE,
            cursor: encode_cursor(offset),
            id_type: ID_TYPE,
            limit: PAGE_SIZE,
            sort_type: SORT_TYPE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    err_no: i64,
    #[serde(default)]
    err_msg: String,
    #[serde(default)]
    data: Option<Vec<FeedItem>>,
    #[serde(default)]
    has_more: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct FeedItem {
    #[serde(default)]
    item_info: ItemInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ItemInfo {
    #[serde(default)]
    article_info: ArticleInfo,
    #[serde(default)]
    author_user_info: AuthorInfo,
    #[serde(default)]
    category: Category,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleInfo {
    #[serde(default)]
    article_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    brief_content: String,
    #[serde(default)]
    ctime: String,
}

#[derive(Debug, Default, Deserialize)]
struct AuthorInfo {
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct Category {
    #[serde(default)]
    category_name: String,
}

impl From<ItemInfo> for Document {
    fn from(info: ItemInfo) -> Self {
        Document {
            id: info.article_info.article_id,
            title: info.article_info.title,
            brief: info.article_info.brief_content,
            category: info.category.category_name,
            create_time: info.article_info.ctime,
            author: Author {
                user_name: info.author_user_info.user_name,
                company: info.author_user_info.company,
                job_title: info.author_user_info.job_title,
                description: info.author_user_info.description,
            },
        }
    }
}

/// 解码后的一页
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub offset: usize,
    pub documents: Vec<Document>,
    /// 接口返回的条目数，包含被丢弃的非文章条目
    pub item_count: usize,
    pub has_more: bool,
}

impl FeedPage {
    /// 少于一整页视为已经到达推荐流末尾
    pub fn is_short(&self) -> bool {
        self.item_count < PAGE_SIZE || !self.has_more
    }
}

/// 解码推荐流响应
pub fn decode_page(offset: usize, body: &str) -> CrawlResult<FeedPage> {
    let response: FeedResponse =
        serde_json::from_str(body).map_err(|source| CrawlError::Decode { offset, source })?;

    if response.err_no != 0 {
        return Err(CrawlError::Feed {
            offset,
            code: response.err_no,
            message: response.err_msg,
        });
    }

    let items = response.data.unwrap_or_default();
    let item_count = items.len();

    let documents = items
        .into_iter()
        .map(|item| Document::from(item.item_info))
        .filter(|doc| {
            if doc.id.is_empty() {
                tracing::debug!(offset, "Skipping feed item without article id");
                return false;
            }
            true
        })
        .collect();

    Ok(FeedPage {
        offset,
        documents,
        item_count,
        // 老版本接口不返回 has_more，按条目数判断
        has_more: response.has_more.unwrap_or(item_count >= PAGE_SIZE),
    })
}

/// 推荐流 HTTP 客户端
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>) -> CrawlResult<Self> {
        let client = Client::builder().build().map_err(CrawlError::Client)?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 拉取 `offset` 开始的一页
    pub async fn fetch_page(&self, offset: usize) -> CrawlResult<FeedPage> {
        let request = FeedRequest::for_offset(offset);
        tracing::debug!(offset, cursor = %request.cursor, "Posting feed request");

        let res = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|source| CrawlError::Request { offset, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                offset,
                status: status.as_u16(),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|source| CrawlError::Request { offset, source })?;

        decode_page(offset, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, title: &str) -> serde_json::Value {
        json!({
            "item_type": 2,
            "item_info": {
                "article_id": id,
                "article_info": {
                    "article_id": id,
                    "title": title,
                    "brief_content": format!("{title} brief"),
                    "ctime": "1620000000"
                },
                "author_user_info": {
                    "user_name": "thepoy",
                    "company": "ACME",
                    "job_title": "engineer",
                    "description": "hi"
                },
                "category": { "category_name": "后端" }
            }
        })
    }

    #[test]
    fn test_request_body_first_page() {
        let body = serde_json::to_value(FeedRequest::for_offset(0)).unwrap();
        assert_eq!(
            body,
            json!({ "client_type": 2608, "cursor": "0", "id_type": 2, "limit": 20, "sort_type": 200 })
        );
    }

    #[test]
    fn test_request_body_later_page_uses_encoded_cursor() {
        let request = FeedRequest::for_offset(40);
        assert_eq!(request.cursor, encode_cursor(40));
        assert_eq!(request.limit, PAGE_SIZE);
    }

    #[test]
    fn test_decode_full_page() {
        let data: Vec<_> = (0..20).map(|i| item(&format!("{i}"), &format!("title {i}"))).collect();
        let body = json!({ "err_no": 0, "err_msg": "success", "data": data, "has_more": true }).to_string();

        let page = decode_page(0, &body).unwrap();
        assert_eq!(page.documents.len(), 20);
        assert!(!page.is_short());

        let doc = &page.documents[3];
        assert_eq!(doc.id, "3");
        assert_eq!(doc.title, "title 3");
        assert_eq!(doc.brief, "title 3 brief");
        assert_eq!(doc.category, "后端");
        assert_eq!(doc.create_time, "1620000000");
        assert_eq!(doc.author.company, "ACME");
        assert_eq!(doc.author.job_title, "engineer");
    }

    #[test]
    fn test_short_page_is_not_an_error() {
        let body = json!({ "err_no": 0, "data": [item("1", "a"), item("2", "b")], "has_more": false }).to_string();
        let page = decode_page(40, &body).unwrap();
        assert_eq!(page.documents.len(), 2);
        assert!(page.is_short());
    }

    #[test]
    fn test_null_data_is_empty_page() {
        let page = decode_page(60, r#"{"err_no":0,"data":null}"#).unwrap();
        assert!(page.documents.is_empty());
        assert!(page.is_short());
    }

    #[test]
    fn test_items_without_article_are_dropped() {
        let ad = json!({ "item_type": 14, "item_info": { "advert_id": "9" } });
        let body = json!({ "data": [item("1", "a"), ad], "has_more": true }).to_string();
        let page = decode_page(0, &body).unwrap();
        assert_eq!(page.item_count, 2);
        assert_eq!(page.documents.len(), 1);
    }

    #[test]
    fn test_feed_error_code() {
        let err = decode_page(0, r#"{"err_no":403,"err_msg":"forbidden"}"#).unwrap_err();
        assert!(matches!(err, CrawlError::Feed { code: 403, .. }));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_page(20, "<html>").unwrap_err();
        assert!(matches!(err, CrawlError::Decode { offset: 20, .. }));
    }
}
