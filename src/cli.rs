use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Canonicalize tabular transit data into GTFS flat-file text",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Format a delimited file into GTFS-compliant, fully quoted CSV
    Format(FormatArgs),
    /// Show which formatting rule applies to the given column names
    Rules(RulesArgs),
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Input file to format ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Input delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Output delimiter character (defaults to the input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Column names to look up; with no names, lists the builtin table
    pub columns: Vec<String>,
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    let token = raw.trim();
    let resolved = match token.to_ascii_lowercase().as_str() {
        "tab" | "\\t" => b'\t',
        "comma" => b',',
        "semicolon" => b';',
        "pipe" => b'|',
        _ => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => c as u8,
                _ => return Err(format!("Invalid delimiter '{raw}'")),
            }
        }
    };
    Ok(resolved)
}
