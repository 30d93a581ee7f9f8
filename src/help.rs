//! Usage lines and help blocks for registered commands.

use crate::command::Command;

/// One-line usage: route words, then option placeholders, then parameter
/// placeholders (e.g. `parent sub [--bool] [name]`).
pub fn usage<R>(command: &Command<R>, short: bool) -> String {
    command
        .segments()
        .iter()
        .cloned()
        .chain(command.options().iter().map(|opt| opt.usage(short)))
        .chain(command.params().iter().map(|param| param.usage()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short help block: short-form usage plus the description.
pub fn short_description<R>(command: &Command<R>) -> String {
    format!(
        "Command: {}\n  Description: {}\n",
        usage(command, true),
        command.help_text()
    )
}

/// Verbose help block: route, long-form usage, description and every option.
pub fn description<R>(command: &Command<R>) -> String {
    let mut out = format!(
        "Command: {}\n  Format: {}\n  Description: {}\n  Options:\n",
        command.route(),
        usage(command, false),
        command.help_text()
    );
    for option in command.options() {
        out.push_str(&format!(
            "    --{} (-{})\n        {}\n",
            option.full_name(),
            option.short_name(),
            option.help_text()
        ));
    }
    out
}
