use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "juejin",
    version,
    about = "juejin allows you to index and search hot-recommended article's titles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Index name (overrides `index-name` in the config file)
    #[arg(short, long, global = true)]
    pub index: Option<String>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index juejin hot-recommended articles into Elasticsearch
    Index {
        /// Create the Elasticsearch index with the article mapping first
        #[arg(long)]
        setup: bool,

        /// The count of pages you want to crawl
        #[arg(long)]
        pages: Option<usize>,

        /// How many pages are fetched at the same time
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Search juejin hot recommended articles
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Cursor printed at the end of the previous page
        #[arg(long)]
        after: Option<String>,
    },
    /// Delete item with id
    Delete {
        #[arg(required = true, num_args = 1..)]
        id: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_flags() {
        let cli = Cli::try_parse_from(["juejin", "-i", "hot", "index", "--setup", "--pages", "3"]).unwrap();
        assert_eq!(cli.index.as_deref(), Some("hot"));
        match cli.command {
            Some(Commands::Index { setup, pages, concurrency }) => {
                assert!(setup);
                assert_eq!(pages, Some(3));
                assert_eq!(concurrency, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_joins_words_later() {
        let cli = Cli::try_parse_from(["juejin", "search", "rust", "异步", "--after", "[1,2]", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Search { query, after }) => {
                assert_eq!(query, vec!["rust", "异步"]);
                assert_eq!(after.as_deref(), Some("[1,2]"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_and_delete_need_arguments() {
        assert!(Cli::try_parse_from(["juejin", "search"]).is_err());
        assert!(Cli::try_parse_from(["juejin", "delete"]).is_err());
    }
}
