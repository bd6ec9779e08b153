use anyhow::Result;
use log::{debug, info, trace, warn};
use oxifix_core::{AliasTable, CollectorConfig, collect_files};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    thread,
};

use crate::{
    config::Config,
    rewriter::{RewriteOptions, rewrite_source},
    types::{CheckResult, Diagnostic, FileReport},
};

pub fn run_fix_imports(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting import fix (write: {}, skip alias: {})", cfg.write, cfg.skip_alias);

    // Initialize config (resolve root, load path aliases)
    cfg.initialize()?;
    let root = cfg.root()?.clone();

    debug!("Collecting source files, ignoring: {:?}", cfg.file_ignore);
    let collector_cfg = CollectorConfig { root: root.clone(), file_ignore: cfg.file_ignore.clone() };
    let files = collect_files(&collector_cfg)?;
    if files.is_empty() {
        warn!("No source files found under {}", root.display());
    }
    info!("Found {} source files", files.len());

    Ok(fix_files(&files, &root, &cfg))
}

/// Rewrite `files` in parallel. Each file is handled independently; the
/// per-file reports are merged once every file is done.
pub fn fix_files(files: &[PathBuf], root: &Path, cfg: &Config) -> CheckResult {
    let opts =
        RewriteOptions { skip_alias: cfg.skip_alias, import_ignore: cfg.import_ignore.clone() };

    info!("Processing {} files in parallel", files.len());
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let thread_id = thread::current().id();
            debug!("Thread {:?} processing: {}", thread_id, file.display());
            fix_file(file, root, &cfg.aliases, &opts, cfg.write)
        })
        .collect();

    let empty = CheckResult { root: root.to_path_buf(), ..Default::default() };
    let result = reports.into_iter().fold(empty, CheckResult::merge);
    info!(
        "Import fix complete. {} changes in {} files, {} diagnostics",
        result.changes.len(),
        result.files_changed,
        result.diagnostics.len()
    );
    result
}

fn fix_file(
    file: &Path,
    root: &Path,
    aliases: &AliasTable,
    opts: &RewriteOptions,
    write: bool,
) -> FileReport {
    let display_name = file.strip_prefix(root).unwrap_or(file).to_string_lossy().to_string();

    let source = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to read {}: {}", file.display(), e);
            return FileReport {
                diagnostics: vec![Diagnostic::io(&display_name, format!("failed to read: {}", e))],
                ..Default::default()
            };
        }
    };

    let rewrite = rewrite_source(&source, file, &display_name, aliases, opts);
    let changed = rewrite.is_changed();
    let mut report =
        FileReport { changes: Vec::new(), diagnostics: rewrite.diagnostics, written: false };

    if changed && write {
        trace!("Writing {} changes to {}", rewrite.changes.len(), file.display());
        match fs::write(file, &rewrite.text) {
            Ok(()) => report.written = true,
            Err(e) => {
                warn!("Failed to write {}: {}", file.display(), e);
                report.diagnostics.push(Diagnostic::io(&display_name, format!("failed to write: {}", e)));
            }
        }
    }

    report.changes = rewrite.changes;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosticKind, Severity};
    use clap::Parser;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "~/*": ["./src/*"] } } }"#,
        );
        create_test_file(root, "src/a.ts", "import x from \"./b\"\n");
        create_test_file(root, "src/b.ts", "export default 1;\n");
        temp_dir
    }

    fn config(root: &Path, args: &[&str]) -> Config {
        let mut cfg = Config::parse_from(std::iter::once("fix-imports").chain(args.iter().copied()));
        cfg.root = Some(root.to_path_buf());
        cfg
    }

    #[test]
    fn test_dry_run_reports_but_does_not_write() {
        let temp_dir = project();
        let root = temp_dir.path();

        let result = run_fix_imports(config(root, &[])).unwrap();
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].to, "~/b.ts");
        assert_eq!(result.files_changed, 1);
        assert_eq!(result.files_written, 0);
        assert_eq!(fs::read_to_string(root.join("src/a.ts")).unwrap(), "import x from \"./b\"\n");
    }

    #[test]
    fn test_write_mode_persists_changes() {
        let temp_dir = project();
        let root = temp_dir.path();

        let result = run_fix_imports(config(root, &["--write"])).unwrap();
        assert_eq!(result.files_written, 1);
        assert!(!result.is_failure(false));
        assert_eq!(
            fs::read_to_string(root.join("src/a.ts")).unwrap(),
            "import x from \"~/b.ts\"\n"
        );
    }

    #[test]
    fn test_skip_alias_in_write_mode() {
        let temp_dir = project();
        let root = temp_dir.path();

        run_fix_imports(config(root, &["--write", "--skip-alias"])).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("src/a.ts")).unwrap(),
            "import x from \"./b.ts\"\n"
        );
    }

    #[test]
    fn test_second_write_run_changes_nothing() {
        let temp_dir = project();
        let root = temp_dir.path();
        create_test_file(root, "src/nested/c.ts", "import a from '../a.js';\nimport b from '~/b';\n");

        let first = run_fix_imports(config(root, &["-w"])).unwrap();
        assert_eq!(first.files_written, 2);

        let second = run_fix_imports(config(root, &["-w"])).unwrap();
        assert!(second.changes.is_empty());
        assert_eq!(second.files_written, 0);
        assert_eq!(
            fs::read_to_string(root.join("src/nested/c.ts")).unwrap(),
            "import a from '~/a.ts';\nimport b from '~/b.ts';\n"
        );
    }

    #[test]
    fn test_file_ignore_excludes_files() {
        let temp_dir = project();
        let root = temp_dir.path();

        let result = run_fix_imports(config(root, &["-w", "-f", "src/a.ts"])).unwrap();
        assert!(result.changes.is_empty());
        assert_eq!(result.files_analyzed, 1);
        assert_eq!(fs::read_to_string(root.join("src/a.ts")).unwrap(), "import x from \"./b\"\n");
    }

    #[test]
    fn test_warnings_fail_unless_lenient() {
        let temp_dir = project();
        let root = temp_dir.path();
        create_test_file(root, "src/c.ts", "import gone from './gone';\n");

        let result = run_fix_imports(config(root, &[])).unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].file, Path::new("src").join("c.ts").to_string_lossy());
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ExtensionNotFound);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert!(result.is_failure(false));
        assert!(!result.is_failure(true));
    }

    #[test]
    fn test_problem_in_one_file_does_not_stop_others() {
        let temp_dir = project();
        let root = temp_dir.path();
        create_test_file(root, "src/c.ts", "import gone from '../gone';\n");

        let result = run_fix_imports(config(root, &["-w"])).unwrap();
        assert_eq!(result.files_analyzed, 3);
        assert_eq!(result.files_written, 1);
        // Neither an extension nor an alias could be found for '../gone'
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(
            fs::read_to_string(root.join("src/c.ts")).unwrap(),
            "import gone from '../gone';\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("src/a.ts")).unwrap(),
            "import x from \"~/b.ts\"\n"
        );
    }

    #[test]
    fn test_unreadable_file_is_an_error_diagnostic() {
        let temp_dir = project();
        let root = temp_dir.path();
        let bad = root.join("src/bad.ts");
        fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

        let cfg = config(root, &[]);
        let files = vec![bad];
        let result = fix_files(&files, root, &cfg);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Io);
        assert!(result.is_failure(true));
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "import x from './b';\n");

        assert!(run_fix_imports(config(root, &[])).is_err());
    }
}
