use crate::error::Result;
use config::constants;
use config::create_strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 运行配置，构造命令时传入，不使用全局变量
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default = "default_config", deny_unknown_fields)]
pub struct Config {
    /// Elasticsearch 地址，可被环境变量 ELASTICSEARCH_URL 覆盖
    pub elasticsearch_url: String,
    pub index_name: String,
    /// 掘金推荐流接口
    pub feed_url: String,
    /// index 命令默认爬取的页数
    pub pages: usize,
    /// 同时爬取的页数上限
    pub max_concurrency: usize,
    /// 输出分隔线的宽度，不设置时读取 COLUMNS
    pub terminal_width: Option<usize>,
}


fn default_config() -> Config {
    Config {
        elasticsearch_url: constants::DEFAULT_ELASTICSEARCH_URL.to_string(),
        index_name: constants::DEFAULT_INDEX_NAME.to_string(),
        feed_url: constants::DEFAULT_FEED_URL.to_string(),
        pages: constants::DEFAULT_PAGES,
        max_concurrency: constants::DEFAULT_MAX_CONCURRENCY,
        terminal_width: None,
    }
}


impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    pub fn load() -> Result<Config> {
        let strategy = create_strategy()?;
        let config_path = config::config_file_path(&strategy);

        let cfg = match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // 配置文件不存在，创建示例配置文件
                Self::create_example_config(&config_path)?;
                Self::load_str("")?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(cfg.apply_env(|key| std::env::var(key).ok()))
    }

    fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ELASTICSEARCH_URL").filter(|u| !u.trim().is_empty()) {
            self.elasticsearch_url = url;
        }
        self
    }

    /// 命令行 `--index` 优先于配置文件
    pub fn with_index(mut self, index: Option<String>) -> Self {
        if let Some(index) = index {
            self.index_name = index;
        }
        self
    }

    pub fn terminal_width(&self) -> usize {
        self.terminal_width
            .or_else(|| std::env::var("COLUMNS").ok().and_then(|c| c.trim().parse().ok()))
            .filter(|w| *w > 0)
            .unwrap_or(constants::DEFAULT_TERMINAL_WIDTH)
    }

    fn create_example_config(config_path: &Path) -> Result<()> {
        use std::io::Write;

        // 确保配置目录存在
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# juejin 配置文件
#
# 此文件在首次运行时自动创建，所有字段都是可选的

# Elasticsearch 地址（环境变量 ELASTICSEARCH_URL 优先）
# elasticsearch-url = "http://localhost:9200"

# 索引名（命令行 --index 优先）
# index-name = "juejin"

# index 命令默认爬取的页数与并发数
# pages = 5
# max-concurrency = 4

# 输出分隔线宽度
# terminal-width = 80
"#;

        let mut file = std::fs::File::create(config_path)?;
        file.write_all(example_config.as_bytes())?;

        eprintln!("📝 已创建配置文件: {:?}", config_path);

        Ok(())
    }
}
