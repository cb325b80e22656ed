use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;

use crate::config::DaemonConfig;
use crate::slots::SqliteSlots;
use crate::workspace::{OpenReport, Workspace};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub stores: Workspace,
    pub config: DaemonConfig,
}

impl AppState {
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            workspace: None,
            stores: Workspace::detached(config.seed),
            config,
        }
    }

    /// Swaps the stores for ones backed by `path`. On failure the current
    /// stores stay as they were.
    pub fn open_workspace(&mut self, path: &Path) -> anyhow::Result<OpenReport> {
        let slots = SqliteSlots::open(path)?;
        log::info!("opened workspace db {}", slots.path().to_string_lossy());
        let (stores, report) = Workspace::open(Rc::new(slots), self.config.seed);
        self.stores = stores;
        self.workspace = Some(path.to_path_buf());
        Ok(report)
    }

    /// Drops the stores and with them the open database handle.
    pub fn close_workspace(&mut self) -> Option<PathBuf> {
        self.stores = Workspace::detached(self.config.seed);
        self.workspace.take()
    }
}
