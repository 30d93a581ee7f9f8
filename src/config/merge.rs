//! Merge rules: defaults applied before any file or environment source.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("shell.prompt", "> ")?
        .set_default("shell.separator", " ")?
        .set_default("shell.echo", false)?
        .set_default("logging.level", "warn")
}
