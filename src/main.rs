use std::path::PathBuf;
use std::process::exit;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing::info;

use variant::{init_tracing, process_files, BatchOptions, BuildMode, Preprocessor};

fn cli() -> Command {
    Command::new("variant_pp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite Lua sources in place, keeping the NORMAL or OPTIMIZED marker blocks")
        .arg(
            Arg::new("mode")
                .value_name("MODE")
                .help("OPTIMIZED strips debug code, comments and blank lines; anything else builds NORMAL")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("Files to rewrite, in order")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .index(2),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on unmatched or nested markers instead of leaving them in place")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    init_tracing();
    let matches = cli().get_matches();

    let mode = BuildMode::from_token(
        matches.get_one::<String>("mode").map(String::as_str).unwrap_or_default(),
    );
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let options = BatchOptions::new(mode).strict(matches.get_flag("strict"));

    let preprocessor = match Preprocessor::lua() {
        Ok(preprocessor) => preprocessor,
        Err(e) => {
            eprintln!("Failed to compile marker patterns: {}", e);
            exit(1);
        }
    };

    match process_files(&preprocessor, options, &files) {
        Ok(count) => {
            info!(count, mode = %mode, "all files rewritten");
        }
        Err(err) => {
            info!(path = %err.path().display(), "batch stopped, remaining files left untouched");
            eprintln!("ERROR");
            eprintln!("{}", err);
            exit(1);
        }
    }
}
