//! Import specifier normalization for TypeScript projects.
//!
//! For every `import … '<path>'` / `from '<path>'` line in every source file,
//! this crate resolves the referenced module, rewrites the written extension
//! to the one found on disk and, for relative imports, switches to the
//! tsconfig path alias that covers the target.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use oxifix_fix_imports::{Config, run_fix_imports};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["fix-imports", "--root", "/path/to/project"]);
//!
//! let result = run_fix_imports(cfg.clone())?;
//!
//! if !result.changes.is_empty() {
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     oxifix_fix_imports::print_changes(&mut stdout, &result, &cfg)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod reporter;
mod rewriter;
mod types;

// Re-export public API
pub use checker::{fix_files, run_fix_imports};
pub use config::Config;
pub use reporter::{print_changes, print_diagnostics, print_no_changes_message};
pub use rewriter::{Rewrite, RewriteOptions, fix_specifier, rewrite_source};
pub use types::{Change, CheckResult, Diagnostic, DiagnosticKind, FileReport, Severity};
