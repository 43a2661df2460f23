use super::Context;
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagebuilder_editor::{Storage, DEFAULT_CONFIG_NAME};
use pagebuilder_model::{create_initial_layout, create_travel_landing_layout};
use std::fs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Template {
    /// One empty section
    Blank,

    /// The bundled travel landing page
    Travel,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Starting layout
    #[arg(short, long, value_enum, default_value = "blank")]
    pub template: Template,

    /// Overwrite an existing config and stored layout
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    println!(
        "{}",
        "📝 Initializing page builder project...".bright_blue().bold()
    );

    // Write config file
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_NAME);
    if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
    } else {
        let config_json = serde_json::to_string_pretty(&ctx.config)?;
        fs::write(&config_path, config_json)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    // Store starting layout
    let repository = ctx.repository();
    if repository.storage().get_item(repository.key())?.is_some() && !args.force {
        println!(
            "  {} A layout is already stored under '{}'",
            "⚠️".yellow(),
            repository.key()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let layout = match args.template {
        Template::Blank => create_initial_layout(),
        Template::Travel => create_travel_landing_layout()?,
    };
    if !repository.save_layout(&layout) {
        bail!(
            "Could not write layout to {}",
            repository.storage().path_for(repository.key()).display()
        );
    }
    println!(
        "  {} Stored {} layout in {}/",
        "✓".green(),
        format!("{:?}", args.template).to_lowercase(),
        ctx.config.storage.dir
    );

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagebuilder preview");
    println!("  2. Edit with: pagebuilder apply '{{\"kind\": \"addSection\"}}'");

    Ok(())
}
