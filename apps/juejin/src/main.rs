mod cli;
mod command;
mod config;
mod error;
mod render;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// 日志写到 stderr，stdout 只留给搜索结果
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = log_level(verbose, std::env::var("DEBUG").ok().as_deref());
        EnvFilter::new(format!("warn,juejin={level},crawler={level},search_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 空的 `DEBUG` 等同于未设置
fn log_level(verbose: u8, debug: Option<&str>) -> &'static str {
    match verbose {
        0 if debug.is_some_and(|v| !v.is_empty()) => "debug",
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();
    init_tracing(command_line.verbose);

    let cfg = config::Config::load()
        .context("Load configuration error")?
        .with_index(command_line.index);

    if let Some(command) = command_line.command {
        let cmd: Box<dyn command::Command> = match command {
            cli::Commands::Index { setup, pages, concurrency } => {
                Box::new(command::IndexCommand::new(cfg, setup, pages, concurrency))
            }
            cli::Commands::Search { query, after } => {
                Box::new(command::SearchCommand::new(cfg, query, after))
            }
            cli::Commands::Delete { id } => Box::new(command::DeleteCommand::new(cfg, id)),
        };
        cmd.execute().await?;
    } else {
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
