//! Error types for the command router.

use crate::value::ValueType;
use thiserror::Error;

/// Errors raised while registering options and commands.
///
/// Registration fails fast: when one of these is returned, nothing about the
/// offending option or command has been stored.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("The {kind} name of an option should not contain {ch:?}: {name:?}")]
    InvalidOptionName {
        kind: &'static str,
        name: String,
        ch: char,
    },

    #[error("The {kind} name of an option must not be empty")]
    EmptyOptionName { kind: &'static str },

    #[error("The {kind} name of an option must not start with '-': {name:?}")]
    LeadingDash { kind: &'static str, name: String },

    #[error("The {kind} name of option '{name}' has been registered")]
    DuplicateOption { kind: &'static str, name: String },

    #[error("The option '{0}' has not been registered")]
    UnknownOption(String),

    #[error("The route '{0}' has been registered")]
    DuplicateRoute(String),

    #[error("Invalid route {route:?}: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("Parameter '{param}' is declared twice on route '{route}'")]
    DuplicateParameter { route: String, param: String },

    #[error("Default for '{name}' is {actual}, expected {expected}")]
    DefaultTypeMismatch {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("Required parameter '{param}' follows a parameter with a default on route '{route}'")]
    RequiredAfterOptional { route: String, param: String },
}

/// Errors raised while parsing a command line.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Option '{0}' needs a value")]
    MissingOptionValue(String),

    #[error("Too many parameters for command '{route}': expected at most {expected}, got {got}")]
    TooManyParameters {
        route: String,
        expected: usize,
        got: usize,
    },

    #[error("Missing required parameter '{param}' for command '{route}'")]
    MissingParameter { route: String, param: String },

    #[error("Invalid value {raw:?} for '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        expected: ValueType,
        raw: String,
    },

    #[error("Command \"{0}\" Not Found")]
    CommandNotFound(String),
}

/// Configuration and logging setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Load(format!("Failed to serialize template: {}", err))
    }
}

/// Top-level error returned by [`crate::CommandRouter::execute`].
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Command '{route}' failed: {source}")]
    Callback {
        route: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RouterError {
    /// The parse error behind this failure, if parsing is what failed.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            RouterError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
