use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::state::FileStore;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved locations the CLI works against.
#[derive(Debug, Clone)]
pub struct Config {
    pub library_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let config = Self {
            library_path: cli.library.clone(),
            data_dir: cli.data_dir.clone(),
        };
        debug!(
            "Using library {} and data dir {}",
            config.library_path.display(),
            config.data_dir.display()
        );
        config
    }

    /// The persistent store backing history and user recipes.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}
