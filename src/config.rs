use std::path::PathBuf;

pub const WORKSPACE_ENV: &str = "STAFFDESK_WORKSPACE";
pub const SEED_ENV: &str = "STAFFDESK_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Workspace opened before the first request is read.
    pub workspace: Option<PathBuf>,
    /// Whether empty stores get the bundled seed data on open.
    pub seed: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            workspace: None,
            seed: true,
        }
    }
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(WORKSPACE_ENV).ok(),
            std::env::var(SEED_ENV).ok(),
        )
    }

    fn from_vars(workspace: Option<String>, seed: Option<String>) -> Self {
        let workspace = workspace
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let seed = match seed.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                log::warn!("ignoring {}={:?}; expected 0/1/true/false", SEED_ENV, other);
                true
            }
        };
        Self { workspace, seed }
    }
}
