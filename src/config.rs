//! Configuration System
//!
//! Layered configuration for the `cmdrouter` shell: merge-policy defaults, the
//! global config file, workspace files for the selected environment, then
//! `CMDROUTER__*` environment variables. The environment is an explicit
//! [`AppEnv`] value passed to the loader; nothing is kept in process-wide state.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{base_config_path, env_config_path};

/// Deployment environment selecting `config/{env}.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppEnv {
    Local,
    #[default]
    Dev,
    Test,
    Prod,
    Custom(String),
}

impl AppEnv {
    pub fn as_str(&self) -> &str {
        match self {
            AppEnv::Local => "local",
            AppEnv::Dev => "dev",
            AppEnv::Test => "test",
            AppEnv::Prod => "prod",
            AppEnv::Custom(name) => name,
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(AppEnv::Local),
            "dev" => Ok(AppEnv::Dev),
            "test" => Ok(AppEnv::Test),
            "prod" => Ok(AppEnv::Prod),
            // "config" would alias the base file
            "" | "config" => Err(format!("Invalid environment name: {:?}", s)),
            name if name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
            {
                Ok(AppEnv::Custom(name.to_string()))
            }
            name => Err(format!("Invalid environment name: {:?}", name)),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub shell: ShellSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Prompt printed before each line when reading a terminal
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Token separator for command text
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Echo each command line before its output
    #[serde(default)]
    pub echo: bool,
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_separator() -> String {
    " ".to_string()
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            separator: default_separator(),
            echo: false,
        }
    }
}

impl ShellConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.shell.separator.is_empty() {
            errors.push("shell.separator cannot be empty".to_string());
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
