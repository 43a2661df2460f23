use super::Context;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagebuilder_editor::{LayoutStats, Storage};
use pagebuilder_model::parse_and_validate;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Layout JSON file to check (defaults to the stored layout)
    pub input: Option<PathBuf>,

    /// Write the repaired layout back
    #[arg(long)]
    pub fix: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn validate(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let repository = ctx.repository();

    let (source, raw) = match &args.input {
        Some(path) => (path.display().to_string(), fs::read_to_string(path)?),
        None => {
            let path = repository.storage().path_for(repository.key());
            let raw = repository
                .storage()
                .get_item(repository.key())?
                .ok_or_else(|| anyhow!("Nothing stored under '{}'", repository.key()))?;
            (path.display().to_string(), raw)
        }
    };

    let result = parse_and_validate(&raw);
    let Some(layout) = result.layout else {
        let reason = result
            .reason
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        return Err(anyhow!("{} is invalid: {}", source, reason));
    };

    if args.format == OutputFormat::Json {
        println!("{}", layout.to_json_pretty()?);
    } else {
        let status = if result.repaired {
            "repaired".yellow().bold()
        } else {
            "valid".green().bold()
        };
        println!("🔍 {} is {}", source.bright_white(), status);

        let stats = LayoutStats::collect(&layout);
        println!(
            "   {} sections, {} rows, {} columns, {} components",
            stats.sections, stats.rows, stats.columns, stats.components
        );
        for (ty, count) in stats.by_type() {
            println!("     {:<12} {}", ty.to_string(), count);
        }
    }

    if args.fix && result.repaired {
        match &args.input {
            Some(path) => fs::write(path, layout.to_json_pretty()?)?,
            None => {
                if !repository.save_layout(&layout) {
                    return Err(anyhow!("Could not save repaired layout"));
                }
            }
        }
        if args.format == OutputFormat::Text {
            println!("   {} Wrote repaired layout", "✓".green());
        }
    }

    Ok(())
}
