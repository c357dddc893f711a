//! Command-line definition.

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};
use std::path::PathBuf;

/// Build the `progressvault-gate` command.
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("progressvault-gate")
        .about("ProgressVault access-code gate")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory holding the persisted access flag")
                .env("PROGRESSVAULT_DATA_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(Command::new("status").about("Print whether access is granted"))
        .subcommand(
            Command::new("unlock")
                .about("Verify an access code")
                .arg(Arg::new("code").help("Access code").required(true)),
        )
        .subcommand(Command::new("revoke").about("Revoke access"))
        .subcommand(
            Command::new("open")
                .about("Show what the gate renders for a path")
                .arg(Arg::new("path").help("Application path").default_value("/")),
        )
}
