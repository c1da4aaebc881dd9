pub const TOP_LEVEL_DOMAIN: &str = "cn";
pub const AUTHOR: &str = "juejin";
pub const APP_NAME: &str = "juejin";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX_NAME: &str = "juejin";
pub const DEFAULT_FEED_URL: &str = "https://api.juejin.cn/recommend_api/v1/article/recommend_all_feed";
pub const DEFAULT_PAGES: usize = 5;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;
