//! Workspace config file source: config/config.toml and config/{env}.toml

use crate::config::AppEnv;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = "config";

/// Base workspace config path.
pub fn base_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_DIR).join("config.toml")
}

/// Environment-specific workspace config path.
pub fn env_config_path(workspace_root: &Path, env: &AppEnv) -> PathBuf {
    workspace_root
        .join(CONFIG_DIR)
        .join(format!("{}.toml", env.as_str()))
}

/// Add workspace config files to builder.
/// Precedence: config/config.toml (base) then config/{env}.toml (env-specific).
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
    env: &AppEnv,
) -> ConfigBuilder<DefaultState> {
    for path in [base_config_path(workspace_root), env_config_path(workspace_root, env)] {
        if path.exists() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }
    builder
}
