//! Command Router
//!
//! Holds the option and command registries, matches command text against the
//! registered routes, decodes options and positional parameters, and dispatches
//! to the bound callback.
//!
//! Routes are kept sorted by descending segment count, so `parent/sub` is always
//! tried before `parent` and a shorter route can never shadow a longer one that
//! shares its prefix.

use crate::command::{route_segments, Callback, Command, Invocation, Param};
use crate::error::{ParseError, RegistrationError, RouterError};
use crate::help;
use crate::option::{CmdOption, OptionRef, DEFAULT_HELP};
use crate::split::advance_split;
use crate::value::Value;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, trace};

pub const DEFAULT_SEPARATOR: &str = " ";

/// Registry of options and commands, producing results of type `R`.
pub struct CommandRouter<R> {
    options: Vec<CmdOption>,
    by_full: HashMap<String, usize>,
    by_short: HashMap<String, usize>,
    commands: Vec<Command<R>>,
    separator: String,
}

/// A command matched against input text, with its decoded invocation.
pub struct Resolved<'a, R> {
    pub command: &'a Command<R>,
    pub invocation: Invocation,
}

impl<R> fmt::Debug for Resolved<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("command", self.command)
            .field("invocation", &self.invocation)
            .finish()
    }
}

impl<R> Default for CommandRouter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> CommandRouter<R> {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            by_full: HashMap::new(),
            by_short: HashMap::new(),
            commands: Vec::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Use a different token separator for command text.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Register an option. Both its full and short name must be unused.
    pub fn register_option(&mut self, option: CmdOption) -> Result<CmdOption, RegistrationError> {
        if self.by_full.contains_key(option.full_name()) {
            return Err(RegistrationError::DuplicateOption {
                kind: "full",
                name: option.full_name().to_string(),
            });
        }
        if self.by_short.contains_key(option.short_name()) {
            return Err(RegistrationError::DuplicateOption {
                kind: "short",
                name: option.short_name().to_string(),
            });
        }

        let idx = self.options.len();
        self.by_full.insert(option.full_name().to_string(), idx);
        self.by_short.insert(option.short_name().to_string(), idx);
        self.options.push(option.clone());

        debug!(
            full_name = option.full_name(),
            short_name = option.short_name(),
            value_type = %option.kind(),
            "Registered option"
        );
        Ok(option)
    }

    /// Look up a registered option by full name.
    pub fn option(&self, full_name: &str) -> Option<&CmdOption> {
        self.by_full.get(full_name).map(|&idx| &self.options[idx])
    }

    pub fn options(&self) -> &[CmdOption] {
        &self.options
    }

    /// Start building a command for `route`.
    pub fn command(&mut self, route: impl Into<String>) -> CommandBuilder<'_, R> {
        CommandBuilder {
            router: self,
            route: route.into(),
            help: DEFAULT_HELP.to_string(),
            options: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Register a command in one call.
    pub fn register_command<F>(
        &mut self,
        route: &str,
        help: &str,
        options: Vec<OptionRef>,
        params: Vec<Param>,
        callback: F,
    ) -> Result<(), RegistrationError>
    where
        F: Fn(&Invocation) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        self.insert_command(route, help, options, params, Box::new(callback))
    }

    fn insert_command(
        &mut self,
        route: &str,
        help: &str,
        options: Vec<OptionRef>,
        params: Vec<Param>,
        callback: Callback<R>,
    ) -> Result<(), RegistrationError> {
        let segments = route_segments(route)?;

        let options = options
            .iter()
            .map(|opt| {
                self.option(opt.full_name())
                    .cloned()
                    .ok_or_else(|| RegistrationError::UnknownOption(opt.full_name().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.commands.iter().any(|c| c.segments() == segments.as_slice()) {
            return Err(RegistrationError::DuplicateRoute(route.to_string()));
        }

        let params = check_params(route, params)?;

        debug!(
            route,
            segments = segments.len(),
            options = options.len(),
            params = params.len(),
            "Registered command"
        );

        self.commands.push(Command::new(
            route.to_string(),
            segments,
            help.to_string(),
            options,
            params,
            callback,
        ));
        // Stable: equal-length routes keep registration order.
        self.commands.sort_by_key(|c| Reverse(c.segment_count()));
        Ok(())
    }

    /// Registered commands in match order.
    pub fn commands(&self) -> &[Command<R>] {
        &self.commands
    }

    pub fn get(&self, route: &str) -> Option<&Command<R>> {
        let segments = route_segments(route).ok()?;
        self.commands.iter().find(|c| c.segments() == segments.as_slice())
    }

    fn find_option(&self, token: &str) -> Option<&CmdOption> {
        self.options.iter().find(|opt| opt.matches(token))
    }

    /// Match `command_text` to a command and decode its options and parameters
    /// without running the callback.
    pub fn resolve(&self, command_text: &str) -> Result<Resolved<'_, R>, ParseError> {
        let tokens = advance_split(command_text, &self.separator, true);
        trace!(?tokens, "Tokenized command text");

        let command = self
            .commands
            .iter()
            .find(|c| c.matches_prefix(tokens.as_slice()))
            .ok_or_else(|| ParseError::CommandNotFound(command_text.trim().to_string()))?;

        let mut options: BTreeMap<String, Value> = command
            .options()
            .iter()
            .filter_map(|opt| Some((opt.full_name().to_string(), opt.default()?.clone())))
            .collect();
        let mut candidates = Vec::new();

        let mut rest = tokens[command.segment_count()..].iter();
        while let Some(token) = rest.next() {
            let option = match self.find_option(token) {
                Some(option) => option,
                None => {
                    candidates.push(token.clone());
                    continue;
                }
            };

            let value = if option.takes_value() {
                let raw = rest
                    .next()
                    .ok_or_else(|| ParseError::MissingOptionValue(option.full_name().to_string()))?;
                option
                    .kind()
                    .parse(raw)
                    .ok_or_else(|| ParseError::InvalidValue {
                        name: option.full_name().to_string(),
                        expected: option.kind(),
                        raw: raw.clone(),
                    })?
            } else {
                Value::Bool(true)
            };
            options.insert(option.full_name().to_string(), value);
        }

        let params = command.bind_params(&candidates)?;
        debug!(route = command.route(), "Matched command");

        Ok(Resolved {
            command,
            invocation: Invocation {
                route: command.route().to_string(),
                options,
                params,
            },
        })
    }

    /// Parse `command_text` and run the matched command's callback.
    pub fn execute(&self, command_text: &str) -> Result<R, RouterError> {
        let Resolved { command, invocation } = self.resolve(command_text)?;
        command
            .run(&invocation)
            .map_err(|source| RouterError::Callback {
                route: command.route().to_string(),
                source,
            })
    }

    /// One short block per command.
    pub fn short_help(&self) -> String {
        self.commands.iter().map(help::short_description).collect()
    }

    /// One verbose block per command, listing every option.
    pub fn full_help(&self) -> String {
        self.commands.iter().map(help::description).collect()
    }

    /// Verbose block for a single route.
    pub fn command_help(&self, route: &str) -> Option<String> {
        self.get(route).map(help::description)
    }
}

/// Normalize defaults and reject duplicate or misordered parameters.
fn check_params(route: &str, params: Vec<Param>) -> Result<Vec<Param>, RegistrationError> {
    let mut checked: Vec<Param> = Vec::with_capacity(params.len());
    for param in params {
        let param = param.normalized()?;
        if checked.iter().any(|p| p.name() == param.name()) {
            return Err(RegistrationError::DuplicateParameter {
                route: route.to_string(),
                param: param.name().to_string(),
            });
        }
        if param.is_required() && checked.iter().any(|p| !p.is_required()) {
            return Err(RegistrationError::RequiredAfterOptional {
                route: route.to_string(),
                param: param.name().to_string(),
            });
        }
        checked.push(param);
    }
    Ok(checked)
}

/// Builder returned by [`CommandRouter::command`].
pub struct CommandBuilder<'a, R> {
    router: &'a mut CommandRouter<R>,
    route: String,
    help: String,
    options: Vec<OptionRef>,
    params: Vec<Param>,
}

impl<'a, R> CommandBuilder<'a, R> {
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Bind a registered option, by full name or by value.
    pub fn option(mut self, option: impl Into<OptionRef>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OptionRef>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Declare the next positional parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn register<F>(self, callback: F) -> Result<(), RegistrationError>
    where
        F: Fn(&Invocation) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        self.router.insert_command(
            &self.route,
            &self.help,
            self.options,
            self.params,
            Box::new(callback),
        )
    }
}
