use std::path::PathBuf;

use directories::ProjectDirs;

use crate::{catalog::DEFAULT_STORAGE_KEY, cli::Cli};

const FALLBACK_DATA_DIR: &str = ".oml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub storage_key: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            seed_path: cli.seed.clone(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match ProjectDirs::from("", "", "oml") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            log::warn!(
                "Could not determine a data directory, using ./{}",
                FALLBACK_DATA_DIR
            );
            PathBuf::from(FALLBACK_DATA_DIR)
        }
    }
}
