//! lexset CLI: build and query a prefix-search index from the shell.
//!
//! Every invocation opens the configured store, runs the requested actions
//! in a fixed order (drop, load, search, count) and prints a timing line.
//! Errors print one `Error: ...` line to stderr and exit with the code
//! mapped from the error kind.

mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::ArgMatches;
use tracing::level_filters::LevelFilter;
use tracing::debug;

use lexset_engine::{
    normalize, open_index, CorpusLoader, LexsetConfig, LexsetResult, QueryEngine,
    CONFIG_FILE_NAME,
};

use commands::build_cli;
use format::{format_done, format_error, format_json, format_section, OutputMode, Section};

fn main() {
    let started = Instant::now();
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(&matches, mode) {
        Ok(sections) => {
            let elapsed = started.elapsed().as_secs_f64();
            match mode {
                OutputMode::Json => println!("{}", format_json(&sections, elapsed)),
                OutputMode::Human => println!("{}", format_done(elapsed)),
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(e.exit_code());
        }
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config named by `--config`, or `lexset.toml` in the working
/// directory. The default file is created from the template when absent;
/// an explicitly named file must exist.
fn load_config(matches: &ArgMatches) -> LexsetResult<LexsetConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => LexsetConfig::from_file(Path::new(path)),
        None => {
            let path = PathBuf::from(CONFIG_FILE_NAME);
            LexsetConfig::write_default_if_missing(&path)?;
            LexsetConfig::from_file(&path)
        }
    }
}

/// Run the requested actions in order.
///
/// In human mode each section is printed as soon as it completes, so a
/// later failure still leaves earlier output on screen.
fn run(matches: &ArgMatches, mode: OutputMode) -> LexsetResult<Vec<Section>> {
    let config = load_config(matches)?;
    debug!(
        target: "lexset::cli",
        backend = %config.store.backend,
        set = %config.store.set_name,
        source = %config.data.source_dir.display(),
        "Loaded configuration"
    );

    let drop_data = matches.get_flag("drop-data");
    let init_data = matches.get_flag("init-data");
    let search = matches.get_one::<String>("search");
    if search.is_some_and(|t| t.trim().is_empty()) {
        debug!(target: "lexset::cli", "Ignoring blank search term");
    }
    let search = search.filter(|t| !t.trim().is_empty());
    let get_length = matches.get_flag("get-length");

    let index = open_index(&config.store)?;
    let mut sections = Vec::new();
    let mut emit = |section: Section| {
        if mode == OutputMode::Human {
            let text = format_section(&section);
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        sections.push(section);
    };

    // With a load following, clearing waits until the source paths are validated
    if drop_data && !init_data {
        index.clear()?;
        emit(Section::Dropped);
    }

    if init_data {
        let mut options = config.data.load_options();
        options.clear_first = drop_data;
        let report = CorpusLoader::new(&index, options)
            .load_dir(&config.data.source_dir, &config.data.scratch_dir)?;
        if drop_data {
            emit(Section::Dropped);
        }
        emit(Section::Loaded(report));
    }

    if let Some(term) = search {
        let items = QueryEngine::new(&index).search(term)?;
        emit(Section::Search {
            query: normalize(term.trim()),
            items,
        });
    }

    if get_length {
        let n = QueryEngine::new(&index).count()?;
        emit(Section::Length(n));
    }

    Ok(sections)
}
