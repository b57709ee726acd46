//! imgsig CLI - image patterns and signatures for imgsmlr similarity search.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use imgsig_core::Precision;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod exit_codes;
mod utils;

use config::Config;
use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error
  65  Unsupported or corrupt image
  66  Input file cannot be read

Environment:
  IMGSIG_PRECISION  Default digits after the decimal point (8)
  IMGSIG_OUTPUT     Default output format: text or json
  RUST_LOG          Log filter (default: warn)";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON object
    Json,
}

/// When to colour human-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Parser)]
#[command(name = "imgsig")]
#[command(author, version, about = "Image patterns and signatures for imgsmlr similarity search", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Print values only, without headers
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Colour output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

/// Rendering options shared by the value-producing commands.
#[derive(Args, Debug, Clone, Copy)]
struct RenderArgs {
    /// Digits after the decimal point [default: IMGSIG_PRECISION or 8]
    #[arg(short, long, value_name = "N")]
    precision: Option<Precision>,

    /// Output format [default: IMGSIG_OUTPUT or text]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the content type of a file from its magic bytes
    Classify {
        /// Path to the file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format [default: IMGSIG_OUTPUT or text]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the pattern of an image (shuffled unless --raw)
    Pattern {
        /// Path to the image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the pattern as decoded, before shuffling
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the signature of an image
    Signature {
        /// Path to the image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the shuffled pattern and signature of an image
    Fingerprint {
        /// Path to the image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
}

fn init_tracing(verbose: bool, ansi: bool) {
    let filter = if verbose {
        EnvFilter::new("imgsig=debug,imgsig_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Classify { file, format } => {
            commands::classify::execute(file, &config.with_overrides(None, format), quiet)
        }
        Commands::Pattern { file, raw, render } => {
            let config = config.with_overrides(render.precision, render.format);
            commands::pattern::execute(file, raw, &config, quiet)
        }
        Commands::Signature { file, render } => {
            let config = config.with_overrides(render.precision, render.format);
            commands::signature::execute(file, &config, quiet)
        }
        Commands::Fingerprint { file, render } => {
            let config = config.with_overrides(render.precision, render.format);
            commands::fingerprint::execute(file, &config, quiet)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the error path too
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            return ExitCode::error(code, err.to_string()).status();
        }
    };

    init_tracing(cli.verbose, cli.color != ColorMode::Never);
    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    match run(cli) {
        Ok(()) => ExitCode::success().status(),
        Err(err) => {
            let exit = ExitCode::from_anyhow(&err);
            if let Some(message) = &exit.message {
                eprintln!("{} {}", "Error:".red().bold(), message);
            }
            exit.status()
        }
    }
}
