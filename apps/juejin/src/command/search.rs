use super::{Command, open_store};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use crate::render::Printer;
use search_core::PAGE_SIZE;
use std::io::Write;

pub struct SearchCommand {
    config: Config,
    query: String,
    after: Option<String>,
}

impl SearchCommand {
    pub fn new(cfg: Config, words: Vec<String>, after: Option<String>) -> Self {
        Self {
            config: cfg,
            query: words.join(" "),
            after,
        }
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let printer = Printer::detect(self.config.terminal_width());
        {
            let mut out = std::io::stdout().lock();
            printer.banner(&mut out, "?q=", &self.query)?;
            out.flush()?;
        }

        let store = open_store(&self.config)?;
        let results = store
            .search(&self.query, self.after.as_deref())
            .await
            .wrap_err("Search failed")?;

        let mut out = std::io::stdout().lock();
        if results.is_empty() {
            printer.no_results(&mut out)?;
            return Ok(());
        }

        printer.results(&mut out, &results, PAGE_SIZE)?;
        Ok(())
    }
}
