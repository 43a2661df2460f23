use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::PreviewPage;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Only print the notice line, not the outline
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn preview(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let page = PreviewPage::from(ctx.repository().load_layout());

    match &page {
        PreviewPage::NothingStored => println!("{}", page.render().yellow()),
        PreviewPage::Invalid => println!("{}", page.render().red().bold()),
        PreviewPage::Ready { .. } => {
            if let Some(notice) = page.notice() {
                println!("{} {}", "⚠️".yellow(), notice.yellow());
            }
            if !args.quiet {
                print!("{}", page.render());
            }
        }
    }

    Ok(())
}
