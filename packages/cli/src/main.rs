mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, preview, validate, ApplyArgs, Context, InitArgs, PreviewArgs, ValidateArgs};
use std::path::PathBuf;

/// Page builder CLI - create, check and edit stored page layouts
#[derive(Parser, Debug)]
#[command(name = "pagebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layout store directory (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Storage key of the layout (overrides config)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and store a starting layout
    Init(InitArgs),

    /// Check (and optionally repair) a layout
    Validate(ValidateArgs),

    /// Print the stored layout as an outline
    Preview(PreviewArgs),

    /// Apply edits to the stored layout
    Apply(ApplyArgs),
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::load(&cwd, cli.store, cli.key)?;

    match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Validate(args) => validate(args, &ctx),
        Command::Preview(args) => preview(args, &ctx),
        Command::Apply(args) => apply(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
