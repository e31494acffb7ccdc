//! Workspace config file source: the nearest `draftdesk.toml` at or above the
//! workspace root, so a matter folder can pin its own endpoint or log level.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const WORKSPACE_CONFIG_FILE: &str = "draftdesk.toml";

/// Nearest workspace config file, searching `workspace_root` then its ancestors.
pub fn locate(workspace_root: &Path) -> Option<PathBuf> {
    workspace_root
        .ancestors()
        .map(|dir| dir.join(WORKSPACE_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Add the nearest workspace config file to builder, if any. Only one file is
/// used; files further up the tree are ignored.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match locate(workspace_root) {
        Some(path) => {
            debug!(config_path = %path.display(), "Using workspace configuration file");
            Ok(builder.add_source(File::from(path.as_path()).required(true)))
        }
        None => Ok(builder),
    }
}
