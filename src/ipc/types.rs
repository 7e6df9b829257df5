use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Config;
use crate::db;
use crate::kv::{SqliteMedium, Store};
use crate::seed::{self, SeedReport};
use crate::session::Session;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub workspace: Option<PathBuf>,
    pub store: Option<Store>,
    pub session: Session,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            workspace: None,
            store: None,
            session: Session::default(),
        }
    }

    /// Opens (or reopens) the workspace store, seeds empty collections and
    /// restores the login persisted there.
    pub fn open_workspace(&mut self, path: &Path) -> anyhow::Result<SeedReport> {
        let conn = db::open_db(path)?;
        let mut store = Store::new(SqliteMedium::new(conn, self.config.quota_bytes));
        let report = if self.config.seed_defaults {
            seed::bootstrap(&mut store)
        } else {
            SeedReport::default()
        };
        self.session = Session::restore(&store);
        self.store = Some(store);
        self.workspace = Some(path.to_path_buf());
        tracing::info!(workspace = %path.display(), "workspace opened");
        Ok(report)
    }
}
