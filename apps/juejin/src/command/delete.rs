use super::{Command, open_store};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use crate::render::Printer;

pub struct DeleteCommand {
    config: Config,
    id: String,
}

impl DeleteCommand {
    pub fn new(cfg: Config, id: Vec<String>) -> Self {
        Self {
            config: cfg,
            id: id.join(" "),
        }
    }
}

#[async_trait::async_trait]
impl Command for DeleteCommand {
    async fn execute(&self) -> Result<()> {
        let printer = Printer::detect(self.config.terminal_width());
        printer.banner(&mut std::io::stdout(), "id=", &self.id)?;

        let store = open_store(&self.config)?;
        let deleted = store
            .delete(&self.id)
            .await
            .wrap_err_with(|| format!("Cannot delete id={}", self.id))?;

        if deleted {
            printer.status(&mut std::io::stdout(), "Deleted: id=", &self.id)?;
        } else {
            // 文档不存在不算错误，退出码仍为 0
            printer.error(&mut std::io::stderr(), &format!("Not found: id={}", self.id))?;
        }

        Ok(())
    }
}
