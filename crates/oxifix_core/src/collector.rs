use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::{BASE_IGNORE_DIRS, SOURCE_EXTENSIONS};

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Globs, relative to `root`, for files to leave alone
    pub file_ignore: Vec<String>,
}

/// Collect every JS/TS source file under the root, sorted by path.
///
/// `.git`, `node_modules` and `dist` directories are never entered. Ignore
/// files (`.gitignore` and friends) are not consulted; only the configured
/// globs filter the result.
pub fn collect_files(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let root = &cfg.root;
    let ignore_set = build_ignore_set(&cfg.file_ignore)?;

    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(|dent| {
            let is_dir = dent.file_type().is_some_and(|t| t.is_dir());
            !(is_dir
                && dent.depth() > 0
                && dent.file_name().to_str().is_some_and(|n| BASE_IGNORE_DIRS.contains(&n)))
        })
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res.with_context(|| format!("Failed to walk {}", root.display()))?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        let rel_path = p.strip_prefix(root).unwrap_or(p);
        if ignore_set.is_match(rel_path) {
            trace!("Ignoring file matched by --file-ignore: {}", rel_path.display());
            continue;
        }

        trace!("Found source file: {}", p.display());
        files.push(p.to_path_buf());
    }

    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}

/// Each pattern also matches everything below it, so `src/legacy` ignores the
/// whole directory.
fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for raw in patterns {
        let pattern = normalize_pattern(raw);
        if pattern.is_empty() {
            continue;
        }
        for candidate in [pattern.clone(), format!("{}/**", pattern)] {
            let glob = GlobBuilder::new(&candidate)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid file ignore glob: {:?}", raw))?;
            builder.add(glob);
        }
    }
    Ok(builder.build()?)
}

fn normalize_pattern(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    Path::new(trimmed).to_string_lossy().replace('\\', "/")
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

    fn rel_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collects_source_extensions_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "");
        create_test_file(root, "src/b.tsx", "");
        create_test_file(root, "src/c.mjs", "");
        create_test_file(root, "src/styles.css", "");
        create_test_file(root, "README.md", "");

        let cfg = CollectorConfig { root: root.to_path_buf(), file_ignore: vec![] };
        let files = collect_files(&cfg).unwrap();
        assert_eq!(rel_names(root, &files), vec!["src/a.ts", "src/b.tsx", "src/c.mjs"]);
    }

    #[test]
    fn test_skips_base_ignore_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "");
        create_test_file(root, "node_modules/pkg/index.js", "");
        create_test_file(root, "packages/web/node_modules/pkg/index.js", "");
        create_test_file(root, "dist/a.js", "");
        create_test_file(root, ".git/hooks/pre-commit.js", "");

        let cfg = CollectorConfig { root: root.to_path_buf(), file_ignore: vec![] };
        let files = collect_files(&cfg).unwrap();
        assert_eq!(rel_names(root, &files), vec!["src/a.ts"]);
    }

    #[test]
    fn test_includes_hidden_and_gitignored_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, ".gitignore", "generated/\n");
        create_test_file(root, "generated/api.ts", "");
        create_test_file(root, ".storybook/main.ts", "");

        let cfg = CollectorConfig { root: root.to_path_buf(), file_ignore: vec![] };
        let files = collect_files(&cfg).unwrap();
        assert_eq!(rel_names(root, &files), vec![".storybook/main.ts", "generated/api.ts"]);
    }

    #[test]
    fn test_user_ignore_globs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "");
        create_test_file(root, "src/a.test.ts", "");
        create_test_file(root, "src/legacy/old.ts", "");
        create_test_file(root, "scripts/build.js", "");

        let cfg = CollectorConfig {
            root: root.to_path_buf(),
            file_ignore: vec!["**/*.test.ts".into(), "./src/legacy/".into(), "scripts".into()],
        };
        let files = collect_files(&cfg).unwrap();
        assert_eq!(rel_names(root, &files), vec!["src/a.ts"]);
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let cfg =
            CollectorConfig { root: temp_dir.path().to_path_buf(), file_ignore: vec!["src/[".into()] };
        assert!(collect_files(&cfg).is_err());
    }
}
