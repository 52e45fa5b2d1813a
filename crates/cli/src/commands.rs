//! Clap command definition.

use clap::{Arg, ArgAction, Command};

/// Build the `lexset` command.
///
/// Actions are flags rather than subcommands so one invocation can drop,
/// load, search and count in that order.
pub fn build_cli() -> Command {
    Command::new("lexset")
        .about("Case-insensitive prefix search over a sorted-set index")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Use FILE as configuration file (default: lexset.toml)"),
        )
        .arg(
            Arg::new("drop-data")
                .long("drop-data")
                .help("Remove every entry from the index")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("init-data")
                .long("init-data")
                .help("Load the source directory into the index (adds to existing entries; combine with --drop-data to replace them)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TERM")
                .help("Search for entries starting with TERM (case-insensitive; a blank TERM is ignored)"),
        )
        .arg(
            Arg::new("get-length")
                .long("get-length")
                .help("Print the number of entries in the index")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
}
