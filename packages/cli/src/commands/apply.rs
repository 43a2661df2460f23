use super::Context;
use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::{EditSession, LayoutEdit};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Edits as JSON objects, e.g. '{"kind": "setTitle", "title": "Home"}'
    pub edits: Vec<String>,

    /// Read a JSON array of edits from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Apply but do not save
    #[arg(long)]
    pub dry_run: bool,
}

fn collect_edits(args: &ApplyArgs) -> Result<Vec<LayoutEdit>> {
    let mut edits = Vec::new();

    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let batch: Vec<LayoutEdit> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid edit list in {}", path.display()))?;
        edits.extend(batch);
    }

    for raw in &args.edits {
        let edit: LayoutEdit =
            serde_json::from_str(raw).with_context(|| format!("Invalid edit: {}", raw))?;
        edits.push(edit);
    }

    Ok(edits)
}

pub fn apply(args: ApplyArgs, ctx: &Context) -> Result<()> {
    let edits = collect_edits(&args)?;
    if edits.is_empty() {
        return Err(anyhow!("No edits given"));
    }

    let mut session = EditSession::new(ctx.repository(), &ctx.config.history);
    let outcome = session.load();
    if outcome.malformed {
        return Err(anyhow!(
            "Stored layout is malformed; run `pagebuilder validate` for details"
        ));
    }
    if outcome.is_empty() {
        return Err(anyhow!("No layout stored yet; run `pagebuilder init` first"));
    }

    let mut changed = 0;
    for edit in &edits {
        if session.apply(edit) {
            changed += 1;
            println!("  {} {}", "✓".green(), edit.name());
        } else {
            println!("  {} {} (no change)", "·".dimmed(), edit.name());
        }
    }

    if changed == 0 {
        println!("Nothing to save");
        return Ok(());
    }

    if args.dry_run {
        println!("{} edits applied (dry run, not saved)", changed);
        return Ok(());
    }

    if !session.save() {
        return Err(anyhow!("Could not save layout"));
    }
    println!(
        "{} {} of {} edits applied",
        "✅".green(),
        changed,
        edits.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(edits: &[&str], file: Option<PathBuf>) -> ApplyArgs {
        ApplyArgs {
            edits: edits.iter().map(|e| e.to_string()).collect(),
            file,
            dry_run: false,
        }
    }

    #[test]
    fn test_collect_edits_from_file_then_args() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edits.json");
        fs::write(&path, r#"[{ "kind": "addSection" }]"#).unwrap();

        let edits = collect_edits(&args(
            &[r#"{ "kind": "setTitle", "title": "Home" }"#],
            Some(path),
        ))
        .unwrap();

        assert_eq!(
            edits,
            vec![
                LayoutEdit::AddSection,
                LayoutEdit::SetTitle {
                    title: "Home".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_invalid_edit_is_reported() {
        let err = collect_edits(&args(&[r#"{ "kind": "explode" }"#], None)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid edit"));
    }

    #[test]
    fn test_apply_requires_stored_layout() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::load(dir.path(), None, None).unwrap();

        let result = apply(args(&[r#"{ "kind": "addSection" }"#], None), &ctx);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_saves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::load(dir.path(), None, None).unwrap();
        assert!(ctx
            .repository()
            .save_layout(&pagebuilder_model::create_initial_layout()));

        apply(
            args(
                &[
                    r#"{ "kind": "setTitle", "title": "Home" }"#,
                    r#"{ "kind": "deleteSection", "sectionId": "missing" }"#,
                ],
                None,
            ),
            &ctx,
        )
        .unwrap();

        let stored = ctx.repository().load_layout().layout.unwrap();
        assert_eq!(stored.title, "Home");
    }
}
