//! Integration tests for environment variable overrides

use cmdrouter::config::{AppEnv, ConfigLoader};
use cmdrouter::logging::{init_logging, LoggingConfig};
use cmdrouter::ConfigError;
use std::sync::Mutex;
use tempfile::TempDir;

// Mutex for tests that need direct environment variable manipulation
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Set `vars` for the duration of `f`, then restore the previous values.
fn with_env_vars<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let originals: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    // Restore original
    for (key, original) in originals {
        match original {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
    result
}

#[test]
fn test_env_vars_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = with_env_vars(
        &[
            ("CMDROUTER__SHELL__PROMPT", "env> "),
            ("CMDROUTER__SHELL__ECHO", "true"),
        ],
        || {
            ConfigLoader::new(temp_dir.path(), AppEnv::Dev)
                .with_global_file(None)
                .load()
                .unwrap()
        },
    );
    assert_eq!(config.shell.prompt, "env> ");
    assert!(config.shell.echo);
    assert_eq!(config.shell.separator, " ");
}

#[test]
fn test_env_vars_beat_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("prod.toml"),
        "[shell]\nprompt = \"file> \"\nseparator = \",\"\n\n[logging]\nlevel = \"info\"\n",
    )
    .unwrap();

    let config = with_env_vars(
        &[
            ("CMDROUTER__SHELL__PROMPT", "env> "),
            ("CMDROUTER__LOGGING__LEVEL", "error"),
        ],
        || {
            ConfigLoader::new(temp_dir.path(), AppEnv::Prod)
                .with_global_file(None)
                .load()
                .unwrap()
        },
    );
    assert_eq!(config.shell.prompt, "env> ");
    assert_eq!(config.logging.level, "error");
    // Keys not set in the environment still come from the file.
    assert_eq!(config.shell.separator, ",");
}

#[test]
fn test_env_vars_ignored_when_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let config = with_env_vars(&[("CMDROUTER__SHELL__PROMPT", "env> ")], || {
        ConfigLoader::new(temp_dir.path(), AppEnv::Dev)
            .with_global_file(None)
            .without_env_vars()
            .load()
            .unwrap()
    });
    assert_eq!(config.shell.prompt, "> ");
}

#[test]
fn test_invalid_env_value_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let result = with_env_vars(&[("CMDROUTER__LOGGING__FORMAT", "yaml")], || {
        ConfigLoader::new(temp_dir.path(), AppEnv::Dev)
            .with_global_file(None)
            .load()
    });
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_log_format_env_overrides_config() {
    let config = LoggingConfig::default();
    let result = with_env_vars(&[("CMDROUTER_LOG_FORMAT", "yaml")], || {
        init_logging(Some(&config))
    });
    match result {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("yaml")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_log_output_env_overrides_config() {
    let config = LoggingConfig {
        output: "stdout".to_string(),
        ..LoggingConfig::default()
    };
    let result = with_env_vars(&[("CMDROUTER_LOG_OUTPUT", "file")], || {
        init_logging(Some(&config))
    });
    match result {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("file")),
        other => panic!("unexpected result: {other:?}"),
    }
}
