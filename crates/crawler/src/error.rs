// crawler/src/error.rs
//! 爬取错误
//!
//! 页级错误会丢弃整页，文档级错误只跳过该文档，都不会重试。

use search_core::StoreError;
use thiserror::Error;

pub type CrawlResult<T> = Result<T, CrawlError>;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for offset {offset} failed: {source}")]
    Request {
        offset: usize,
        #[source]
        source: reqwest::Error,
    },

    #[error("feed returned HTTP {status} for offset {offset}")]
    Status { offset: usize, status: u16 },

    #[error("cannot decode feed response for offset {offset}: {source}")]
    Decode {
        offset: usize,
        #[source]
        source: serde_json::Error,
    },

    /// 接口返回了非零 `err_no`
    #[error("feed error {code} for offset {offset}: {message}")]
    Feed {
        offset: usize,
        code: i64,
        message: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
