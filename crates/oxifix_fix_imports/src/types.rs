use oxifix_core::ResolveError;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Advisory: the specifier was left (partly) as written
    Warning,
    /// The file could not be processed or saved
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    ExtensionNotFound,
    NoAliasFound,
    Io,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// File path relative to the project root
    pub file: String,
    /// The specifier as written, None for file-level problems
    pub specifier: Option<String>,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn for_specifier(file: &str, specifier: &str, err: &ResolveError) -> Self {
        let kind = match err {
            ResolveError::NoAliasFound(_) => DiagnosticKind::NoAliasFound,
            _ => DiagnosticKind::ExtensionNotFound,
        };
        Diagnostic {
            file: file.to_string(),
            specifier: Some(specifier.to_string()),
            kind,
            severity: Severity::Warning,
            message: err.to_string(),
        }
    }

    pub(crate) fn io(file: &str, message: String) -> Self {
        Diagnostic {
            file: file.to_string(),
            specifier: None,
            kind: DiagnosticKind::Io,
            severity: Severity::Error,
            message,
        }
    }
}

/// One specifier rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub file: String,
    pub from: String,
    pub to: String,
}

/// Outcome of processing a single file
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub changes: Vec<Change>,
    pub diagnostics: Vec<Diagnostic>,
    pub written: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// Project root the file names are relative to
    pub root: PathBuf,
    pub changes: Vec<Change>,
    pub diagnostics: Vec<Diagnostic>,
    pub files_analyzed: usize,
    pub files_changed: usize,
    pub files_written: usize,
}

impl CheckResult {
    pub(crate) fn merge(mut self, report: FileReport) -> Self {
        self.files_analyzed += 1;
        if !report.changes.is_empty() {
            self.files_changed += 1;
        }
        if report.written {
            self.files_written += 1;
        }
        self.changes.extend(report.changes);
        self.diagnostics.extend(report.diagnostics);
        self
    }

    /// Whether the run should count as a failure. Any diagnostic fails it,
    /// unless `lenient` limits that to errors.
    pub fn is_failure(&self, lenient: bool) -> bool {
        if lenient {
            self.diagnostics.iter().any(|d| d.severity == Severity::Error)
        } else {
            !self.diagnostics.is_empty()
        }
    }
}
