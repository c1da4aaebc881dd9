pub mod delete;
pub mod index;
pub mod search;

use crate::config::Config;
use crate::error::{Result, WrapErr};
use search_core::{Store, StoreConfig};

pub use delete::DeleteCommand;
pub use index::IndexCommand;
pub use search::SearchCommand;

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// 按配置创建存储，失败时程序直接退出
fn open_store(config: &Config) -> Result<Store> {
    Store::new(StoreConfig {
        url: config.elasticsearch_url.clone(),
        index_name: config.index_name.clone(),
    })
    .wrap_err("Cannot create store")
}
