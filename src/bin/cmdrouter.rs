//! cmdrouter CLI Binary
//!
//! Runs command text against a small built-in command set, either from the
//! trailing command-line words or line by line from stdin.

use anyhow::Context;
use clap::Parser;
use cmdrouter::config::{AppEnv, ConfigLoader, ShellConfig};
use cmdrouter::logging::{init_logging, LoggingConfig};
use cmdrouter::{CmdOption, CommandRouter, ParseError, Param, RegistrationError, ValueType};
use owo_colors::OwoColorize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

/// Upper bound on the bytes `echo` may produce.
const MAX_ECHO_BYTES: usize = 1 << 20;

/// cmdrouter - run route-matched commands
#[derive(Parser, Debug)]
#[command(name = "cmdrouter")]
#[command(about = "Run route-matched commands from arguments or stdin")]
struct Cli {
    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path (overrides layered config loading)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Environment selecting config/{env}.toml
    #[arg(long, default_value = "dev")]
    env: AppEnv,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Disable logging
    #[arg(long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    log_format: Option<String>,

    /// Print the parsed invocation as JSON instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Write config/{env}.toml with default settings if it does not exist, then exit
    #[arg(long)]
    init_config: bool,

    /// Command words; read lines from stdin when empty
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

/// What a built-in command asks the shell to print.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Text(String),
    Help {
        route: Option<String>,
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if let Err(e) = init_logging(Some(&build_logging_config(&cli, &config))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }
    info!(env = %cli.env, "cmdrouter starting");

    if cli.init_config {
        let loader = ConfigLoader::new(&cli.workspace, cli.env.clone());
        match loader.write_template() {
            Ok(Some(path)) => println!("Wrote {}", path.display()),
            Ok(None) => println!("Configuration for '{}' already exists", cli.env),
            Err(e) => fail(&e),
        }
        return;
    }

    let router = match build_router(&config) {
        Ok(router) => router,
        Err(e) => fail(&e),
    };

    let ok = if cli.words.is_empty() {
        let stdin = std::io::stdin();
        let interactive = stdin.is_terminal();
        run_lines(
            &router,
            stdin.lock(),
            &mut std::io::stdout(),
            &config,
            cli.dry_run,
            interactive,
        )
    } else {
        let line = join_words(&cli.words, router.separator());
        report(run_line(&router, &line, cli.dry_run), &mut std::io::stdout())
    };

    if !ok {
        process::exit(1);
    }
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("{} {}", "error:".red().bold(), e);
    process::exit(1);
}

fn load_config(cli: &Cli) -> Result<ShellConfig, cmdrouter::ConfigError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::new(&cli.workspace, cli.env.clone()).load(),
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &ShellConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

/// Register the built-in commands.
fn build_router(config: &ShellConfig) -> Result<CommandRouter<Outcome>, RegistrationError> {
    let mut router = CommandRouter::new().with_separator(config.shell.separator.clone());

    let verbose = router.register_option(
        CmdOption::new("verbose", "v")?.help("Show every option of each command."),
    )?;
    router.register_option(CmdOption::new("upper", "u")?.help("Upper-case the text."))?;
    router.register_option(
        CmdOption::new("repeat", "r")?
            .help("Repeat the text this many times.")
            .value_type(ValueType::Int)
            .default_value(1)?,
    )?;

    router
        .command("help")
        .help("Show help for all commands or one route.")
        .option(&verbose)
        .param(Param::optional("command", ""))
        .register(|inv| {
            let route = inv.param_str("command").unwrap_or_default();
            Ok(Outcome::Help {
                route: (!route.is_empty()).then(|| route.replace(' ', "/")),
                verbose: inv.flag("verbose"),
            })
        })?;

    router
        .command("echo")
        .help("Print text.")
        .options(["upper", "repeat"])
        .param(Param::new("text", ValueType::Str))
        .register(|inv| {
            let text = inv.param_str("text").unwrap_or_default();
            let text = if inv.flag("upper") {
                text.to_uppercase()
            } else {
                text.to_string()
            };
            let times = inv.option("repeat").and_then(|v| v.as_int()).unwrap_or(1);
            if times < 0 {
                anyhow::bail!("repeat must not be negative, got {}", times);
            }
            let len = usize::try_from(times)
                .ok()
                .and_then(|n| n.checked_mul(text.len() + 1));
            match len {
                Some(len) if len <= MAX_ECHO_BYTES => {}
                _ => anyhow::bail!(
                    "repeat {} would exceed {} bytes of output",
                    times,
                    MAX_ECHO_BYTES
                ),
            }
            Ok(Outcome::Text(vec![text; times as usize].join(" ")))
        })?;

    router
        .command("sum")
        .help("Add two numbers.")
        .param(Param::new("a", ValueType::Float))
        .param(Param::optional("b", 0.0))
        .register(|inv| {
            let a = inv.param_float("a").unwrap_or_default();
            let b = inv.param_float("b").unwrap_or_default();
            Ok(Outcome::Text((a + b).to_string()))
        })?;

    let snapshot = config.clone();
    router
        .command("config/show")
        .help("Print the loaded configuration as TOML.")
        .register(move |_| Ok(Outcome::Text(toml::to_string_pretty(&snapshot)?)))?;

    Ok(router)
}

/// Re-quote words that would otherwise split differently once joined.
fn join_words(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|word| {
            if word.is_empty()
                || word.contains(separator)
                || word.contains(['"', '\'', '\\'])
            {
                format!("\"{}\"", word.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Resolve and run one command line, rendering its output.
fn run_line(router: &CommandRouter<Outcome>, line: &str, dry_run: bool) -> anyhow::Result<String> {
    if dry_run {
        let resolved = router.resolve(line)?;
        return serde_json::to_string_pretty(&resolved.invocation).with_context(|| {
            format!("Failed to serialize invocation of '{}'", resolved.invocation.route)
        });
    }

    match router.execute(line)? {
        Outcome::Text(text) => Ok(text),
        Outcome::Help { route: None, verbose } => Ok(if verbose {
            router.full_help()
        } else {
            router.short_help()
        }),
        Outcome::Help {
            route: Some(route),
            ..
        } => router
            .command_help(&route)
            .ok_or_else(|| ParseError::CommandNotFound(route).into()),
    }
}

/// Write a line's output; errors go to stderr. Returns false on failure.
fn report(result: anyhow::Result<String>, out: &mut impl Write) -> bool {
    match result {
        Ok(output) => writeln!(out, "{}", output.trim_end()).is_ok(),
        Err(e) => {
            debug!(error = %e, "Command failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            false
        }
    }
}

/// Execute `input` line by line, skipping blank lines. Returns false if any
/// line failed.
fn run_lines<W: Write>(
    router: &CommandRouter<Outcome>,
    input: impl BufRead,
    out: &mut W,
    config: &ShellConfig,
    dry_run: bool,
    interactive: bool,
) -> bool {
    let mut ok = true;

    let prompt = |out: &mut W| {
        if interactive {
            let _ = write!(out, "{}", config.shell.prompt);
            let _ = out.flush();
        }
    };

    prompt(&mut *out);
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return false;
            }
        };
        if !line.trim().is_empty() {
            if config.shell.echo {
                let _ = writeln!(out, "{}{}", config.shell.prompt, line);
            }
            ok &= report(run_line(router, &line, dry_run), &mut *out);
        }
        prompt(&mut *out);
    }
    ok
}
