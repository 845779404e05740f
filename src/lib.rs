pub mod books;
pub mod db;
pub mod error;
pub mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use db::Database;
use settings::SettingsStore;

pub use books::{next_dates, BookEditor, SortOrder};
pub use db::models::{Book, BookStatus, DatePair, Rating, StatusTag};
pub use error::{BookError, BookResult};

const DATABASE_FILE: &str = "mybooks.sqlite3";
const SETTINGS_FILE: &str = "settings.json";

pub struct AppState {
    pub db: Database,
    pub settings: SettingsStore,
}

impl AppState {
    /// Open the library stored under `data_dir`, creating it on first run.
    ///
    /// A store that cannot be opened is fatal; callers should not carry on
    /// without one.
    pub fn initialize(data_dir: &Path) -> Result<Self> {
        init_logging();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
        log::info!("Library data directory: {}", data_dir.display());

        let database = Database::new(data_dir.join(DATABASE_FILE))?;
        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;

        Ok(Self {
            db: database,
            settings,
        })
    }

    /// Library backed by an in-memory store, for tests and previews.
    pub fn in_memory(settings_path: &Path) -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
            settings: SettingsStore::new(settings_path.to_path_buf())?,
        })
    }
}

/// Install the env_logger backend (reads RUST_LOG, defaults to `info`).
/// [`AppState::initialize`] calls this; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
