//! Config loader: builds a [`ShellConfig`] from the layered sources.

use super::merge::builder_with_defaults;
use super::sources::{self, global_file, workspace_file};
use super::{AppEnv, ShellConfig};
use crate::error::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads configuration for one workspace and environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    workspace_root: PathBuf,
    env: AppEnv,
    global_file: Option<PathBuf>,
    use_env_vars: bool,
}

impl ConfigLoader {
    pub fn new(workspace_root: impl Into<PathBuf>, env: AppEnv) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            env,
            global_file: global_file::global_config_path(),
            use_env_vars: true,
        }
    }

    /// Override (or with `None`, skip) the global config file.
    pub fn with_global_file(mut self, path: Option<PathBuf>) -> Self {
        self.global_file = path;
        self
    }

    /// Skip `CMDROUTER__*` environment overrides.
    pub fn without_env_vars(mut self) -> Self {
        self.use_env_vars = false;
        self
    }

    pub fn env(&self) -> &AppEnv {
        &self.env
    }

    /// Load and validate the layered configuration.
    pub fn load(&self) -> Result<ShellConfig, ConfigError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder, self.global_file.as_deref());
        builder = workspace_file::add_to_builder(builder, &self.workspace_root, &self.env);
        if self.use_env_vars {
            builder = sources::add_environment(builder);
        }

        let config: ShellConfig = builder.build()?.try_deserialize()?;
        validated(config)
    }

    /// Load a single explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<ShellConfig, ConfigError> {
        debug!(config_path = %path.display(), "Loading configuration file");
        let config: ShellConfig = builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        validated(config)
    }

    /// Write a default `config/{env}.toml` unless one already exists.
    ///
    /// Returns the path written, or `None` when the file was already present.
    pub fn write_template(&self) -> Result<Option<PathBuf>, ConfigError> {
        let path = workspace_file::env_config_path(&self.workspace_root, &self.env);
        if path.exists() {
            return Ok(None);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let template = toml::to_string_pretty(&ShellConfig::default())?;
        std::fs::write(&path, template)?;
        info!(config_path = %path.display(), env = %self.env, "Wrote configuration template");
        Ok(Some(path))
    }
}

fn validated(config: ShellConfig) -> Result<ShellConfig, ConfigError> {
    config
        .validate()
        .map_err(|errors| ConfigError::Invalid(errors.join("; ")))?;
    Ok(config)
}
