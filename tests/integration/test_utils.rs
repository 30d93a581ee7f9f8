//! Shared fixtures: the option and command set used across dispatch tests.

use cmdrouter::{CmdOption, CommandRouter, Invocation, Param, ValueType};

/// Render an invocation the way the fixture commands report it.
pub fn describe(inv: &Invocation) -> String {
    let options = inv
        .options
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    let params = inv
        .positional()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} '{}'. ({})", inv.route, params, options)
}

/// Router with `page`, `test1`, `test2`, `bool` options and the commands
/// `help`, `test`, `test1`, `test2`, `parent/sub`.
pub fn fixture_router() -> CommandRouter<String> {
    let mut router = CommandRouter::new();

    let page = router
        .register_option(
            CmdOption::new("page", "p")
                .unwrap()
                .help("Page number")
                .value_type(ValueType::Int)
                .default_value(1)
                .unwrap(),
        )
        .unwrap();
    let test1 = router
        .register_option(
            CmdOption::new("test1", "t1")
                .unwrap()
                .help("Test option 1")
                .value_type(ValueType::Str)
                .default_value("")
                .unwrap(),
        )
        .unwrap();
    let test2 = router
        .register_option(
            CmdOption::new("test2", "t2")
                .unwrap()
                .help("Test option 2")
                .value_type(ValueType::Str)
                .default_value("")
                .unwrap(),
        )
        .unwrap();
    let flag = router
        .register_option(CmdOption::new("bool", "b").unwrap().help("Test bool option"))
        .unwrap();

    router
        .command("help")
        .help("Show help info.")
        .option("page")
        .param(Param::optional("command_name", "help"))
        .register(|inv| {
            Ok(format!(
                "Show help info of command '{}'. (page: {})",
                inv.param_str("command_name").unwrap_or_default(),
                inv.option("page").map(ToString::to_string).unwrap_or_default()
            ))
        })
        .unwrap();

    router
        .command("test")
        .help("Test command.")
        .option(&page)
        .param(Param::optional("command_name", "test"))
        .register(|inv| Ok(describe(inv)))
        .unwrap();

    router
        .command("test1")
        .help("Test command 1.")
        .options([&page, &test1, &test2])
        .param(Param::optional("command_param1", "test1"))
        .param(Param::optional("command_param2", "test2"))
        .register(|inv| Ok(describe(inv)))
        .unwrap();

    router
        .command("test2")
        .help("Test command 2.")
        .option(&flag)
        .param(Param::optional("command_name", "test2"))
        .register(|inv| Ok(describe(inv)))
        .unwrap();

    router
        .command("parent/sub")
        .help("Test command 3.")
        .option(&flag)
        .param(Param::optional("command_name", "parent/sub"))
        .register(|inv| Ok(describe(inv)))
        .unwrap();

    router
}
