use std::path::PathBuf;

/// A non-entry file containing re-exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the project root
    pub file: String,
    /// Exact source text of each offending declaration, in file order
    pub statements: Vec<String>,
}

/// A file that could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub root: PathBuf,
    pub violations: Vec<Violation>,
    pub errors: Vec<ScanError>,
    pub files_analyzed: usize,
    /// Entry points, which are never scanned
    pub files_skipped: usize,
}

impl CheckResult {
    pub fn statement_count(&self) -> usize {
        self.violations.iter().map(|v| v.statements.len()).sum()
    }

    pub fn is_failure(&self) -> bool {
        !self.violations.is_empty() || !self.errors.is_empty()
    }
}
