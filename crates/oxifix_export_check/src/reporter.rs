use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use oxifix_core::relativize_to_cwd;

use crate::types::CheckResult;

pub fn print_no_violations_message<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{} No re-exports outside of index files", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

/// Print each offending file with its re-export statements.
pub fn print_violations<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} violations", result.violations.len());
    if !result.violations.is_empty() {
        writeln!(
            writer,
            "{} {} re-exports in {} files (only index files may re-export)\n",
            "✗".red().bold(),
            result.statement_count().to_string().red(),
            result.violations.len().to_string().red()
        )?;
    }

    for v in &result.violations {
        writeln!(writer, "{}", relativize_to_cwd(&result.root, &v.file).blue())?;
        for (idx, stmt) in v.statements.iter().enumerate() {
            let prefix = if idx == v.statements.len() - 1 { "└──" } else { "├──" };
            // Keep multi-line declarations aligned under the tree prefix
            let stmt = stmt.replace('\n', "\n     ");
            writeln!(writer, "{}  {}", prefix.dimmed(), stmt.yellow())?;
        }
        writeln!(writer)?;
    }

    for e in &result.errors {
        let path = relativize_to_cwd(&result.root, &e.file);
        writeln!(writer, "{}: {}: {}", "error".red().bold(), path.blue(), e.message)?;
    }

    writer.flush()?;
    Ok(())
}
