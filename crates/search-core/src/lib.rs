// search-core/src/lib.rs
//! 掘金文章的 Elasticsearch 存储层
//!
//! 提供：
//! - 文档模型（[`Document`]、[`Author`]）
//! - 单索引的建索引 / 写入 / 存在判断 / 删除 / 查询
//! - 查询体构建与结果解码

pub mod error;
pub mod mapping;
pub mod models;
pub mod query;
pub mod results;
pub mod store;

// 重导出核心类型
pub use error::{StoreError, StoreResult};
pub use mapping::index_mapping;
pub use models::{Author, Document};
pub use query::{PAGE_SIZE, build_query};
pub use results::{Highlights, Hit, SearchResults};
pub use store::{DocumentStore, Store, StoreConfig};
