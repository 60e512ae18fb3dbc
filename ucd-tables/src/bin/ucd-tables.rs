/// CLI: turns `<data-dir>/<version>-<type>.txt` UCD files into JavaScript
/// tables under `<out-dir>/unicode-<version>/` and prints the manifest.
///
/// Usage:
///   ucd-tables --unicode-version 15.1.0
///   ucd-tables -u 15.1.0 --data-dir data --out-dir output --source scripts --source blocks
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use ucd_tables::{Config, SourceKind};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Unicode release to generate, e.g. 15.1.0
    #[clap(short = 'u', long, env = "UCD_VERSION")]
    unicode_version: String,

    /// Directory holding `<version>-<type>.txt` source files
    #[clap(long, env = "UCD_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Root of the generated `unicode-<version>` tree
    #[clap(long, env = "UCD_OUT_DIR", default_value = "output")]
    out_dir: PathBuf,

    /// Only process these sources (repeatable); all by default
    #[clap(long = "source", value_name = "TYPE", value_parser = parse_source)]
    sources: Vec<SourceKind>,

    /// More log output (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[clap(short, long)]
    quiet: bool,
}

fn parse_source(s: &str) -> Result<SourceKind, String> {
    SourceKind::parse(s).ok_or_else(|| {
        let known: Vec<&str> = SourceKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown source '{s}', expected one of: {}", known.join(", "))
    })
}

fn main() {
    let args = Args::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        version: args.unicode_version,
        data_dir: args.data_dir,
        out_dir: args.out_dir,
        sources: args.sources,
    };

    let manifest = ucd_tables::run(&config).unwrap_or_else(|e| {
        eprintln!("ucd-tables: {e}");
        std::process::exit(1);
    });

    if manifest.is_empty() {
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            version = %config.version,
            "no source files found, nothing written"
        );
    }

    let json = serde_json::to_string_pretty(&manifest).unwrap_or_else(|e| {
        eprintln!("ucd-tables: cannot serialize manifest: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}
