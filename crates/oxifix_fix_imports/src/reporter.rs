use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use colored::Colorize;
use log::debug;
use oxifix_core::relativize_to_cwd;

use crate::{
    config::Config,
    types::{Change, CheckResult, Diagnostic, Severity},
};

pub fn print_no_changes_message<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{} All imports are already normalized", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

/// Print every change grouped by file, followed by a summary.
pub fn print_changes<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    cfg: &Config,
) -> io::Result<()> {
    debug!("Printing {} changes", result.changes.len());
    let mut by_file: BTreeMap<&str, Vec<&Change>> = BTreeMap::new();
    for c in &result.changes {
        by_file.entry(c.file.as_str()).or_default().push(c);
    }

    let verb = if cfg.write { "Rewrote" } else { "Would rewrite" };
    writeln!(
        writer,
        "{} {} {} imports in {} files\n",
        "●".bright_blue(),
        verb,
        result.changes.len().to_string().cyan(),
        by_file.len().to_string().cyan()
    )?;

    for (file, changes) in &by_file {
        writeln!(writer, "{}", relativize_to_cwd(&result.root, file).blue())?;
        for (idx, change) in changes.iter().enumerate() {
            let prefix = if idx == changes.len() - 1 { "└──" } else { "├──" };
            writeln!(
                writer,
                "{}  {} {} {}",
                prefix.dimmed(),
                change.from.red(),
                "→".dimmed(),
                change.to.green()
            )?;
        }
        writeln!(writer)?;
    }

    print_summary(writer, result, cfg)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &CheckResult, cfg: &Config) -> io::Result<()> {
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Files scanned: {}", result.files_analyzed.to_string().cyan())?;
    writeln!(writer, "  Files with changes: {}", result.files_changed.to_string().yellow().bold())?;
    if cfg.write {
        writeln!(writer, "  Files written: {}", result.files_written.to_string().green().bold())?;
    } else if result.files_changed > 0 {
        writeln!(writer, "  Dry run: re-run with {} to apply these changes", "--write".bold())?;
    }
    Ok(())
}

/// Print diagnostics, one line each, sorted by file.
pub fn print_diagnostics<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} diagnostics", result.diagnostics.len());
    let mut sorted: Vec<&Diagnostic> = result.diagnostics.iter().collect();
    sorted.sort_by(|a, b| a.file.cmp(&b.file));

    let errors = sorted.iter().filter(|d| d.severity == Severity::Error).count();
    writeln!(
        writer,
        "{} {} import problems ({} errors, {} warnings)\n",
        "⚠".yellow().bold(),
        sorted.len().to_string().yellow(),
        errors.to_string().red(),
        (sorted.len() - errors).to_string().yellow()
    )?;

    for d in sorted {
        let marker = match d.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        let path = relativize_to_cwd(&result.root, &d.file);
        match &d.specifier {
            Some(spec) => writeln!(writer, "{}: {} '{}': {}", marker, path.blue(), spec, d.message)?,
            None => writeln!(writer, "{}: {}: {}", marker, path.blue(), d.message)?,
        }
    }

    writer.flush()?;
    Ok(())
}
