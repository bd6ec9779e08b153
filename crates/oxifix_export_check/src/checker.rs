use anyhow::Result;
use log::{debug, info, warn};
use oxifix_core::{CollectorConfig, collect_files};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    scanner::{is_entry_point, re_exports_in},
    types::{CheckResult, ScanError, Violation},
};

enum FileOutcome {
    Skipped,
    Clean,
    Violation(Violation),
    Failed(ScanError),
}

pub fn run_export_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting re-export check");
    cfg.initialize()?;
    let root = cfg.root()?.clone();

    let collector_cfg = CollectorConfig { root: root.clone(), file_ignore: cfg.file_ignore.clone() };
    let files = collect_files(&collector_cfg)?;
    info!("Found {} source files", files.len());

    Ok(check_files(&files, &root))
}

pub fn check_files(files: &[PathBuf], root: &Path) -> CheckResult {
    let outcomes: Vec<FileOutcome> = files.par_iter().map(|file| check_file(file, root)).collect();

    let mut result = CheckResult { root: root.to_path_buf(), ..Default::default() };
    for outcome in outcomes {
        match outcome {
            FileOutcome::Skipped => result.files_skipped += 1,
            FileOutcome::Clean => result.files_analyzed += 1,
            FileOutcome::Violation(v) => {
                result.files_analyzed += 1;
                result.violations.push(v);
            }
            FileOutcome::Failed(e) => {
                result.files_analyzed += 1;
                result.errors.push(e);
            }
        }
    }
    result.violations.sort_by(|a, b| a.file.cmp(&b.file));
    result.errors.sort_by(|a, b| a.file.cmp(&b.file));

    info!(
        "Re-export check complete. {} violations, {} errors",
        result.violations.len(),
        result.errors.len()
    );
    result
}

fn check_file(file: &Path, root: &Path) -> FileOutcome {
    if is_entry_point(file) {
        debug!("Skipping entry point: {}", file.display());
        return FileOutcome::Skipped;
    }
    let display_name = file.strip_prefix(root).unwrap_or(file).to_string_lossy().to_string();

    match re_exports_in(file) {
        Ok(statements) if statements.is_empty() => FileOutcome::Clean,
        Ok(statements) => FileOutcome::Violation(Violation { file: display_name, statements }),
        Err(e) => {
            warn!("{:#}", e);
            FileOutcome::Failed(ScanError { file: display_name, message: format!("{:#}", e) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn run(root: &Path, ignore: &[&str]) -> CheckResult {
        let cfg = Config::new(
            Some(root.to_path_buf()),
            ignore.iter().map(|s| s.to_string()).collect(),
        );
        run_export_check(cfg).unwrap()
    }

    #[test]
    fn test_index_files_may_re_export() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export * from './a';\n");
        create_test_file(root, "src/a.ts", "export const a = 1;\n");

        let result = run(root, &[]);
        assert!(!result.is_failure());
        assert_eq!(result.files_analyzed, 1);
        assert_eq!(result.files_skipped, 1);
    }

    #[test]
    fn test_re_export_outside_index_is_a_violation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/b.ts", "export const b = 2;\n");
        create_test_file(
            root,
            "src/a.ts",
            "export * from './b';\nexport { b as c } from './b';\nexport const a = 1;\n",
        );

        let result = run(root, &[]);
        assert!(result.is_failure());
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].file, Path::new("src").join("a.ts").to_string_lossy());
        assert_eq!(
            result.violations[0].statements,
            vec!["export * from './b';", "export { b as c } from './b';"]
        );
        assert_eq!(result.statement_count(), 2);
    }

    #[test]
    fn test_ignored_files_are_not_checked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/gen/api.ts", "export * from './models';\n");

        let result = run(root, &["src/gen"]);
        assert!(!result.is_failure());
        assert_eq!(result.files_analyzed, 0);
    }

    #[test]
    fn test_unparsable_file_is_reported_and_others_continue() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/bad.ts", "export * from './b'\n}}}{{{ const = ;\n");
        create_test_file(root, "src/a.ts", "export { x } from './x';\n");

        let result = run(root, &[]);
        assert_eq!(result.files_analyzed, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].file.ends_with("bad.ts"));
    }
}
