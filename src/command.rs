//! Commands, their positional parameters, and the invocation handed to callbacks.

use crate::error::{ParseError, RegistrationError};
use crate::option::CmdOption;
use crate::split::advance_split;
use crate::value::{Value, ValueType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Callback bound to a command.
pub type Callback<R> = Box<dyn Fn(&Invocation) -> anyhow::Result<R> + Send + Sync>;

/// A declared positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    value_type: ValueType,
    default: Option<Value>,
}

impl Param {
    /// A required parameter of the given type.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
        }
    }

    /// A parameter whose type is taken from its default.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            value_type: default.value_type(),
            default: Some(default),
        }
    }

    /// Attach a default. Checked against the declared type at registration.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueType {
        self.value_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// `<name>` when required, `[name]` when it has a default.
    pub fn usage(&self) -> String {
        if self.is_required() {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }

    /// Fit the default to the declared type.
    pub(crate) fn normalized(mut self) -> Result<Self, RegistrationError> {
        if let Some(default) = self.default.take() {
            let actual = default.value_type();
            let fitted = default.coerce_to(self.value_type).ok_or_else(|| {
                RegistrationError::DefaultTypeMismatch {
                    name: self.name.clone(),
                    expected: self.value_type,
                    actual,
                }
            })?;
            self.default = Some(fitted);
        }
        Ok(self)
    }
}

/// Split a route into its segments, rejecting routes that can never match.
pub fn route_segments(route: &str) -> Result<Vec<String>, RegistrationError> {
    let segments = advance_split(route, "/", true);
    if segments.is_empty() {
        return Err(RegistrationError::InvalidRoute {
            route: route.to_string(),
            reason: "route has no segments".to_string(),
        });
    }
    if let Some(seg) = segments.iter().find(|s| s.chars().any(char::is_whitespace)) {
        return Err(RegistrationError::InvalidRoute {
            route: route.to_string(),
            reason: format!("segment {:?} contains whitespace", seg),
        });
    }
    Ok(segments)
}

/// A registered command.
pub struct Command<R> {
    route: String,
    segments: Vec<String>,
    help: String,
    options: Vec<CmdOption>,
    params: Vec<Param>,
    callback: Callback<R>,
}

impl<R> Command<R> {
    pub(crate) fn new(
        route: String,
        segments: Vec<String>,
        help: String,
        options: Vec<CmdOption>,
        params: Vec<Param>,
        callback: Callback<R>,
    ) -> Self {
        Self {
            route,
            segments,
            help,
            options,
            params,
            callback,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn options(&self) -> &[CmdOption] {
        &self.options
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// True if the leading tokens equal this route's segments.
    pub fn matches_prefix<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.segments.len() <= tokens.len()
            && self
                .segments
                .iter()
                .zip(tokens)
                .all(|(seg, tok)| seg == tok.as_ref())
    }

    /// Assign positional candidates to the declared parameters, in order.
    pub(crate) fn bind_params(
        &self,
        candidates: &[String],
    ) -> Result<Vec<(String, Value)>, ParseError> {
        if candidates.len() > self.params.len() {
            return Err(ParseError::TooManyParameters {
                route: self.route.clone(),
                expected: self.params.len(),
                got: candidates.len(),
            });
        }

        let mut bound = Vec::with_capacity(self.params.len());
        for (idx, param) in self.params.iter().enumerate() {
            let value = match candidates.get(idx) {
                Some(raw) => param.kind().parse(raw).ok_or_else(|| ParseError::InvalidValue {
                    name: param.name().to_string(),
                    expected: param.kind(),
                    raw: raw.clone(),
                })?,
                None => param
                    .default()
                    .cloned()
                    .ok_or_else(|| ParseError::MissingParameter {
                        route: self.route.clone(),
                        param: param.name().to_string(),
                    })?,
            };
            bound.push((param.name().to_string(), value));
        }
        Ok(bound)
    }

    pub(crate) fn run(&self, invocation: &Invocation) -> anyhow::Result<R> {
        (self.callback)(invocation)
    }
}

impl<R> fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("route", &self.route)
            .field("help", &self.help)
            .field("options", &self.options)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Display for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Command {}>", self.route)
    }
}

impl<R> PartialEq for Command<R> {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route
    }
}

/// Decoded options and parameters passed to a command callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub route: String,
    /// Option values keyed by full name. Options with no default that were not
    /// given are absent.
    pub options: BTreeMap<String, Value>,
    /// Positional parameters in declaration order.
    pub params: Vec<(String, Value)>,
}

impl Invocation {
    pub fn option(&self, full_name: &str) -> Option<&Value> {
        self.options.get(full_name)
    }

    /// Boolean option value; `false` when unset or not boolean.
    pub fn flag(&self, full_name: &str) -> bool {
        self.option(full_name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(Value::as_str)
    }

    pub fn param_int(&self, name: &str) -> Option<i64> {
        self.param(name).and_then(Value::as_int)
    }

    pub fn param_float(&self, name: &str) -> Option<f64> {
        self.param(name).and_then(Value::as_float)
    }

    /// Parameter values alone, in declaration order.
    pub fn positional(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|(_, value)| value)
    }
}
