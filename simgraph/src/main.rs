use commands::command_argument_builder;
use simgraph::handlers::{handle_degrees, handle_export, handle_init, handle_top, log_level};

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Logs go to stderr so `top` output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(quiet, chosen_command.subcommand_name()))
        .init();

    let result = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("degrees", primary_command)) => handle_degrees(primary_command),
        Some(("export", primary_command)) => handle_export(primary_command),
        Some(("top", primary_command)) => handle_top(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
