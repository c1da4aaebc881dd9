use super::{Command, open_store};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use crawler::{CrawlConfig, Crawler, FeedClient};
use search_core::index_mapping;
use std::sync::Arc;
use tracing::{info, warn};

pub struct IndexCommand {
    config: Config,
    setup: bool,
    pages: usize,
    concurrency: usize,
}

impl IndexCommand {
    pub fn new(cfg: Config, setup: bool, pages: Option<usize>, concurrency: Option<usize>) -> Self {
        let pages = pages.unwrap_or(cfg.pages);
        let concurrency = concurrency.unwrap_or(cfg.max_concurrency);
        Self {
            config: cfg,
            setup,
            pages,
            concurrency,
        }
    }

    fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            pages: self.pages,
            max_concurrency: self.concurrency,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl Command for IndexCommand {
    async fn execute(&self) -> Result<()> {
        let store = open_store(&self.config)?;

        if self.setup {
            info!(index = %store.index_name(), "Creating index with mapping");
            store
                .create_index(&index_mapping())
                .await
                .wrap_err("Cannot create Elasticsearch index")?;
        }

        let feed = FeedClient::new(self.config.feed_url.clone())
            .wrap_err("Error creating HTTP client")?;

        let crawler = Crawler::new(Arc::new(store), feed, self.crawl_config());
        let summary = crawler.run().await;

        for err in &summary.errors {
            warn!("{err}");
        }
        println!(
            "Crawled {} pages: {} stored, {} skipped, {} errors",
            summary.pages_attempted,
            summary.documents_stored,
            summary.documents_skipped,
            summary.errors.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        toml::from_str("pages = 7\nmax-concurrency = 2").unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let cmd = IndexCommand::new(config(), false, Some(3), None);
        let crawl = cmd.crawl_config();
        assert_eq!(crawl.pages, 3);
        assert_eq!(crawl.max_concurrency, 2);
        assert_eq!(crawl.start_offset, 0);
        assert_eq!(crawl.jitter_ms, 100..=200);
    }

    #[test]
    fn test_config_defaults_apply() {
        let crawl = IndexCommand::new(config(), true, None, Some(8)).crawl_config();
        assert_eq!(crawl.pages, 7);
        assert_eq!(crawl.max_concurrency, 8);
    }
}
