//! Named, typed command-line options.

use crate::error::RegistrationError;
use crate::value::{Value, ValueType};

/// Characters that may not appear in an option's full or short name.
pub const FORBIDDEN_CHARACTERS: &[char] = &[
    ' ', '\t', '\n', '\r', '\u{0b}', '\u{0c}', '\0', '\\', '"', '\'', '=', ':', '|', '>', '<',
    '&', ';', '!', '@', '#', '$', '%', '^', '*', '(', ')', '+', '[', ']', '{', '}', '?', '/', '`',
    '~', ',', '.',
];

pub const DEFAULT_HELP: &str = "No help info.";

/// A flag addressable as `--{full_name}` or `-{short_name}`.
///
/// Options are built with [`CmdOption::new`] and the `with`-style setters, then
/// handed to [`crate::CommandRouter::register_option`].
#[derive(Debug, Clone, PartialEq)]
pub struct CmdOption {
    full_name: String,
    short_name: String,
    help: String,
    value_type: ValueType,
    default: Option<Value>,
}

impl CmdOption {
    /// Create a boolean option defaulting to `false`.
    pub fn new(
        full_name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        let full_name = full_name.into();
        let short_name = short_name.into();
        validate_name("full", &full_name)?;
        validate_name("short", &short_name)?;

        Ok(Self {
            full_name,
            short_name,
            help: DEFAULT_HELP.to_string(),
            value_type: ValueType::Bool,
            default: Some(Value::Bool(false)),
        })
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the value type. A default that still fits the new type is kept
    /// (an int default widens to float); otherwise it is dropped, and a bool
    /// option falls back to `false`.
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self.default = match self.default.take().and_then(|d| d.coerce_to(value_type)) {
            Some(kept) => Some(kept),
            None if value_type == ValueType::Bool => Some(Value::Bool(false)),
            None => None,
        };
        self
    }

    /// Set the default, which must fit the type declared so far.
    pub fn default_value(mut self, default: impl Into<Value>) -> Result<Self, RegistrationError> {
        let default = default.into();
        let actual = default.value_type();
        self.default = Some(default.coerce_to(self.value_type).ok_or_else(|| {
            RegistrationError::DefaultTypeMismatch {
                name: self.full_name.clone(),
                expected: self.value_type,
                actual,
            }
        })?);
        Ok(self)
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> ValueType {
        self.value_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// True if `token` is this option's long or short form.
    pub fn matches(&self, token: &str) -> bool {
        match token.strip_prefix("--") {
            Some(long) if long == self.full_name => true,
            _ => token.strip_prefix('-') == Some(self.short_name.as_str()),
        }
    }

    /// Non-boolean options consume the following token as their value.
    pub fn takes_value(&self) -> bool {
        self.value_type != ValueType::Bool
    }

    /// Usage placeholder, e.g. `[--page <page>]` or `[-b]`.
    pub fn usage(&self, short: bool) -> String {
        let (dash, name) = if short {
            ("-", &self.short_name)
        } else {
            ("--", &self.full_name)
        };
        if self.takes_value() {
            format!("[{}{} <{}>]", dash, name, name)
        } else {
            format!("[{}{}]", dash, name)
        }
    }
}

fn validate_name(kind: &'static str, name: &str) -> Result<(), RegistrationError> {
    if name.is_empty() {
        return Err(RegistrationError::EmptyOptionName { kind });
    }
    // `-x` as a short name would answer to `--x`.
    if name.starts_with('-') {
        return Err(RegistrationError::LeadingDash {
            kind,
            name: name.to_string(),
        });
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
        return Err(RegistrationError::InvalidOptionName {
            kind,
            name: name.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Reference to a registered option, by full name or by value.
#[derive(Debug, Clone)]
pub enum OptionRef {
    Name(String),
    Option(CmdOption),
}

impl OptionRef {
    pub fn full_name(&self) -> &str {
        match self {
            OptionRef::Name(name) => name,
            OptionRef::Option(opt) => opt.full_name(),
        }
    }
}

impl From<&str> for OptionRef {
    fn from(name: &str) -> Self {
        OptionRef::Name(name.to_string())
    }
}

impl From<String> for OptionRef {
    fn from(name: String) -> Self {
        OptionRef::Name(name)
    }
}

impl From<CmdOption> for OptionRef {
    fn from(opt: CmdOption) -> Self {
        OptionRef::Option(opt)
    }
}

impl From<&CmdOption> for OptionRef {
    fn from(opt: &CmdOption) -> Self {
        OptionRef::Option(opt.clone())
    }
}
