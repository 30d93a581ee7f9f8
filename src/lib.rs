//! cmdrouter: route-matched command parsing
//!
//! Register typed options and `/`-separated command routes, each bound to a
//! callback with declared positional parameters, then parse a line of command
//! text into the matching command, its options and its parameters.
//!
//! ```
//! use cmdrouter::{CmdOption, CommandRouter, Param, ValueType};
//!
//! let mut router: CommandRouter<String> = CommandRouter::new();
//! router.register_option(
//!     CmdOption::new("page", "p")?
//!         .help("Page number")
//!         .value_type(ValueType::Int)
//!         .default_value(1)?,
//! )?;
//! router
//!     .command("help")
//!     .help("Show help info.")
//!     .option("page")
//!     .param(Param::optional("command_name", "help"))
//!     .register(|inv| {
//!         Ok(format!(
//!             "Show help info of command '{}'. (page: {})",
//!             inv.param_str("command_name").unwrap_or_default(),
//!             inv.option("page").map(|v| v.to_string()).unwrap_or_default(),
//!         ))
//!     })?;
//!
//! assert_eq!(
//!     router.execute("help test -p 1")?,
//!     "Show help info of command 'test'. (page: 1)"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod help;
pub mod logging;
pub mod option;
pub mod router;
pub mod split;
pub mod value;

pub use command::{Callback, Command, Invocation, Param};
pub use error::{ConfigError, ParseError, RegistrationError, RouterError};
pub use option::{CmdOption, OptionRef};
pub use router::{CommandBuilder, CommandRouter, Resolved};
pub use split::advance_split;
pub use value::{Value, ValueType};
