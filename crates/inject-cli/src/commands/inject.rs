//! Inject command implementation
//!
//! Rewrites every configured consumer file and reports what changed.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use similar::{ChangeTag, TextDiff};

use inject_core::{FileChange, InjectOptions, InjectionReport, Injector, RecordingSink, TracingSink};

use super::{Overrides, load_context};
use crate::error::{CliError, Result};

/// Run the inject command
pub fn run_inject(cwd: &Path, overrides: &Overrides, dry_run: bool, json: bool) -> Result<()> {
    let ctx = load_context(cwd, overrides)?;
    if ctx.sources().is_empty() {
        return Err(CliError::user(
            "No source files. Pass --src or list them under `src` in depinject.toml.",
        ));
    }

    let injector = Injector::new(InjectOptions {
        dry_run,
        ..Default::default()
    });
    let mut sinks = (RecordingSink::new(), TracingSink);
    let report = injector.inject_files(&ctx, &mut sinks)?;

    if json {
        let output = json!({
            "dry_run": report.dry_run,
            "has_changes": report.has_changes(),
            "updated": report.updated,
            "unchanged": report.unchanged,
            "events": sinks.0.events,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &InjectionReport) {
    if !report.has_changes() {
        println!("{} All files up to date.", "OK".green().bold());
        return;
    }

    if report.dry_run {
        for change in &report.updated {
            print_diff(change);
        }
        println!(
            "{} {} file(s) would change.",
            "DRY RUN".yellow().bold(),
            report.updated.len()
        );
        return;
    }

    println!("{} Injected dependencies:", "OK".green().bold());
    for change in &report.updated {
        println!(
            "   {} {} ({} reference(s) in {})",
            "+".green(),
            change.path,
            change.injected,
            change.blocks.join(", ")
        );
    }
    if !report.unchanged.is_empty() {
        println!("   {} file(s) already up to date", report.unchanged.len());
    }
}

/// Print a unified diff of one pending change.
fn print_diff(change: &FileChange) {
    println!("{}", format!("--- {}", change.path).bold());
    println!("{}", format!("+++ {}", change.path).bold());

    let diff = TextDiff::from_lines(&change.original, &change.content);
    for group in diff.grouped_ops(3) {
        for op in &group {
            for line in diff.iter_changes(op) {
                let text = line.value().trim_end_matches(['\r', '\n']);
                match line.tag() {
                    ChangeTag::Delete => println!("{}", format!("-{text}").red()),
                    ChangeTag::Insert => println!("{}", format!("+{text}").green()),
                    ChangeTag::Equal => println!(" {text}"),
                }
            }
        }
    }
}
