// crawler/src/lib.rs
//! 掘金热门推荐流爬虫
//!
//! 按页并发拉取推荐流，转换成 [`search_core::Document`]，
//! 跳过已存在的文档后写入存储。

pub mod crawler;
pub mod cursor;
pub mod error;
pub mod feed;

pub use crawler::{CrawlConfig, CrawlSummary, Crawler, PageReport, process_page};
pub use cursor::{CURSOR_VERSION, encode_cursor};
pub use error::{CrawlError, CrawlResult};
pub use feed::{FeedClient, FeedPage, FeedRequest, PAGE_SIZE, decode_page};
