pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::path::PathBuf;


pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// Location of the user config file, e.g. `~/.config/juejin/config.toml` on Linux.
pub fn config_file_path<S: AppStrategy>(strategy: &S) -> PathBuf {
    strategy.config_dir().join(constants::CONFIG_FILE_NAME)
}
