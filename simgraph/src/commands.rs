use crate::CLAP_STYLING;
use clap::{arg, command};
use simgraph::handlers::DEFAULT_DB_PATH;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("simgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("simgraph")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress progress and informational logging")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(--"db" <PATH>)
                .required(false)
                .global(true)
                .help("Location of the simgraph database")
                .default_value(DEFAULT_DB_PATH),
        )
        .subcommand_required(true)
        .subcommand(
            command!("init")
                .about("Creates the simgraph database schema on your filesystem")
                .arg(
                    arg!(-f --"force")
                        .help("Deletes any existing database at the location first")
                        .required(false),
                ),
        )
        .subcommand(
            command!("degrees")
                .about("Recomputes inbound/outbound similarity degrees for every artist"),
        )
        .subcommand(
            command!("export")
                .about(
                    "Recomputes degrees, then writes per-genre and combined GML graphs and \
                the top lists.",
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("TOML export configuration (default: built-in genre set)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Output directory, overrides the configured one")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("top")
                .about("Prints artists ranked by inbound similarity degree")
                .arg(
                    arg!(-g --"genre" <NAME>)
                        .required(false)
                        .help("Restrict to this genre, may be repeated (default: all artists)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"exclude")
                        .required(false)
                        .help("Rank artists outside the given genres instead")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Number of artists to print")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: csv, json")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                ),
        )
}
