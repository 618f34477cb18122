use anyhow::Context;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use clang_format_all::exit_codes::exit;
use clang_format_all::{Config, RunSummary};

/// Format every C, C++ and Objective-C file under ./neutrino, ./example and ./test
/// in place with `clang-format -style=file`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding roots, extensions and the formatter command
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log each file and every formatter failure
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let summary = clang_format_all::run(&config, &cwd)?;
    Ok(summary)
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(summary) => {
            log::debug!("Run finished: {summary:?}");
            exit::success();
        }
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            exit::tool_error();
        }
    }
}
