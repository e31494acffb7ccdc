//! Config loading facade: the only entry point that assembles sources.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::DraftDeskConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then global file, then workspace files, then environment.
    pub fn load(workspace_root: &Path) -> Result<DraftDeskConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = merge_policy::with_environment(builder);
        builder.build()?.try_deserialize()
    }

    /// Defaults, then the given file (required), then environment.
    pub fn load_from_file(path: &Path) -> Result<DraftDeskConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = merge_policy::with_environment(builder);
        builder.build()?.try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
