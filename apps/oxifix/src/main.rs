use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "oxifix")]
#[command(about = "Keep TypeScript import specifiers and re-exports in shape", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize import extensions and rewrite relative imports to path aliases
    FixImports(oxifix_fix_imports::Config),
    /// Report re-exports outside of index files
    CheckExports(oxifix_export_check::Config),
    /// Fix imports, then check re-exports with the same root and ignores
    All(oxifix_fix_imports::Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    let mut stdout = BufWriter::new(std::io::stdout());
    let mut stderr = std::io::stderr();

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();

    let PassOutcome { failed, files } = run_command(&mut stdout, &mut stderr, cli.command)?;

    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        start.elapsed().as_millis().to_string().cyan(),
        files.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    stdout.flush()?;

    if failed {
        // Non-zero exit to fail CI
        std::process::exit(1);
    }
    Ok(())
}

/// Whether a pass failed, and how many files it looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PassOutcome {
    failed: bool,
    files: usize,
}

impl PassOutcome {
    /// Both passes ran over the same file list; either one failing fails the run.
    fn and_then(self, next: PassOutcome) -> PassOutcome {
        PassOutcome { failed: self.failed || next.failed, files: self.files.max(next.files) }
    }
}

fn run_command<W: Write, E: Write>(
    stdout: &mut W,
    stderr: &mut E,
    command: Commands,
) -> Result<PassOutcome> {
    match command {
        Commands::FixImports(cfg) => fix_imports(stdout, stderr, cfg),
        Commands::CheckExports(cfg) => check_exports(stdout, cfg),
        Commands::All(cfg) => {
            let export_cfg =
                oxifix_export_check::Config::new(cfg.root.clone(), cfg.file_ignore.clone());
            let imports = fix_imports(stdout, stderr, cfg)?;
            writeln!(stdout)?;
            let exports = check_exports(stdout, export_cfg)?;
            Ok(imports.and_then(exports))
        }
    }
}

fn fix_imports<W: Write, E: Write>(
    stdout: &mut W,
    stderr: &mut E,
    cfg: oxifix_fix_imports::Config,
) -> Result<PassOutcome> {
    info!("Running import fix (write: {})", cfg.write);
    let result = oxifix_fix_imports::run_fix_imports(cfg.clone())?;
    debug!("Found {} changes, {} diagnostics", result.changes.len(), result.diagnostics.len());

    if result.changes.is_empty() {
        oxifix_fix_imports::print_no_changes_message(stdout)?;
    } else {
        oxifix_fix_imports::print_changes(stdout, &result, &cfg)?;
    }
    if !result.diagnostics.is_empty() {
        stdout.flush()?;
        oxifix_fix_imports::print_diagnostics(stderr, &result)?;
    }

    Ok(PassOutcome { failed: result.is_failure(cfg.lenient), files: result.files_analyzed })
}

fn check_exports<W: Write>(
    stdout: &mut W,
    cfg: oxifix_export_check::Config,
) -> Result<PassOutcome> {
    info!("Running re-export check");
    let result = oxifix_export_check::run_export_check(cfg)?;

    if result.is_failure() {
        oxifix_export_check::print_violations(stdout, &result)?;
    } else {
        oxifix_export_check::print_no_violations_message(stdout)?;
    }

    Ok(PassOutcome {
        failed: result.is_failure(),
        files: result.files_analyzed + result.files_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "~/*": ["./src/*"] } } }"#,
        );
        create_test_file(root, "src/a.ts", "import b from '~/b.ts';\n");
        create_test_file(root, "src/b.ts", "export default 1;\n");
        temp_dir
    }

    fn run(args: &[&str]) -> PassOutcome {
        colored::control::set_override(false);
        let cli = Cli::parse_from(std::iter::once("oxifix").chain(args.iter().copied()));
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_command(&mut out, &mut err, cli.command).unwrap()
    }

    #[test]
    fn test_all_passes_on_clean_project() {
        let temp_dir = project();
        let root = temp_dir.path().to_string_lossy().to_string();

        let outcome = run(&["all", "--root", &root]);
        assert!(!outcome.failed);
        assert_eq!(outcome.files, 2);
    }

    #[test]
    fn test_re_export_fails_all_even_when_imports_are_clean() {
        let temp_dir = project();
        create_test_file(temp_dir.path(), "src/c.ts", "export * from '~/b.ts';\n");
        let root = temp_dir.path().to_string_lossy().to_string();

        assert!(!run(&["fix-imports", "--root", &root]).failed);
        assert!(run(&["check-exports", "--root", &root]).failed);
        assert!(run(&["all", "--root", &root]).failed);
    }

    #[test]
    fn test_import_problem_fails_all_even_when_exports_are_clean() {
        let temp_dir = project();
        create_test_file(temp_dir.path(), "src/c.ts", "import gone from './gone';\n");
        let root = temp_dir.path().to_string_lossy().to_string();

        assert!(!run(&["check-exports", "--root", &root]).failed);
        assert!(run(&["all", "--root", &root]).failed);
        assert!(!run(&["all", "--root", &root, "--lenient"]).failed);
    }

    #[test]
    fn test_outcomes_combine() {
        let clean = PassOutcome { failed: false, files: 3 };
        let failed = PassOutcome { failed: true, files: 3 };
        assert!(!clean.and_then(clean).failed);
        assert!(clean.and_then(failed).failed);
        assert!(failed.and_then(clean).failed);
    }
}
