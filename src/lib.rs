pub mod canon;
pub mod cli;
pub mod frame;
pub mod geometry;
pub mod io_utils;
pub mod process;
pub mod rules;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands, RulesArgs};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("gtfs_canon", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Format(args) => process::execute(&args),
        Commands::Rules(args) => handle_rules(&args),
    }
}

fn handle_rules(args: &RulesArgs) -> Result<()> {
    if args.columns.is_empty() {
        for (label, names) in [
            ("time", rules::TIME_COLUMNS),
            ("date", rules::DATE_COLUMNS),
            ("zero-or-one", rules::ZERO_ONE_COLUMNS),
            ("integer", rules::INTEGER_COLUMNS),
            ("float", rules::FLOAT_COLUMNS),
        ] {
            for name in names {
                println!("{name}\t{label}");
            }
        }
        return Ok(());
    }
    for name in &args.columns {
        println!("{name}\t{}", rules::rule_for(name).label());
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
