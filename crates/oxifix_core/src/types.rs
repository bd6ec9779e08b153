use indexmap::IndexMap;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// How an import specifier is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// Starts with `./` or `../`
    Relative,
    /// Starts with one of the configured alias prefixes
    Alias,
    /// Bare package names and anything else; never rewritten
    Other,
}

impl SpecKind {
    pub fn classify(request: &str, aliases: &AliasTable) -> Self {
        if request.starts_with("./") || request.starts_with("../") {
            SpecKind::Relative
        } else if aliases.matching_alias(request).is_some() {
            SpecKind::Alias
        } else {
            SpecKind::Other
        }
    }
}

/// A path split into directory, stem and extension.
///
/// The base name is always derived from `stem` and `ext`, so changing the
/// extension can never leave a stale base name behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub dir: String,
    pub stem: String,
    pub ext: String,
}

impl ParsedPath {
    /// Split a `/`-separated path the way module specifiers are written.
    pub fn parse(path: &str) -> Self {
        let (dir, base) = match path.rfind('/') {
            Some(0) => ("/", &path[1..]),
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => ("", path),
        };
        let (stem, ext) = split_base(base);
        ParsedPath { dir: dir.to_string(), stem: stem.to_string(), ext: ext.to_string() }
    }

    /// Split a filesystem path using platform separators.
    pub fn from_path(path: &Path) -> Self {
        let dir = path.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
        let base = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let (stem, ext) = split_base(&base);
        ParsedPath { dir, stem: stem.to_string(), ext: ext.to_string() }
    }

    pub fn base(&self) -> String {
        format!("{}{}", self.stem, self.ext)
    }

    pub fn with_ext(&self, ext: &str) -> Self {
        ParsedPath { dir: self.dir.clone(), stem: self.stem.clone(), ext: ext.to_string() }
    }

    /// Filesystem path for this value (`dir` joined with the base name).
    pub fn to_path_buf(&self) -> PathBuf {
        Path::new(&self.dir).join(self.base())
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dir.is_empty() {
            write!(f, "{}", self.base())
        } else if self.dir.ends_with('/') {
            write!(f, "{}{}", self.dir, self.base())
        } else {
            write!(f, "{}/{}", self.dir, self.base())
        }
    }
}

fn split_base(base: &str) -> (&str, &str) {
    if base == ".." {
        return (base, "");
    }
    match base.rfind('.') {
        // A leading dot marks a hidden file, not an extension
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    }
}

/// Alias prefixes (wildcard stripped, e.g. `~/`) mapped to absolute target
/// directories, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: IndexMap<String, PathBuf>,
    // Indices into `entries`, longest alias first
    by_length: Vec<usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias. Re-registering a prefix keeps its position and
    /// replaces the target.
    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<PathBuf>) {
        self.entries.insert(alias.into(), target.into());
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&i| {
            std::cmp::Reverse(self.entries.get_index(i).map_or(0, |(k, _)| k.len()))
        });
        self.by_length = order;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, alias: &str) -> Option<&Path> {
        self.entries.get(alias).map(PathBuf::as_path)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Entries ordered from the longest alias prefix to the shortest
    pub fn by_specificity(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.by_length
            .iter()
            .filter_map(|&i| self.entries.get_index(i))
            .map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// The most specific alias prefixing `request`, if any
    pub fn matching_alias(&self, request: &str) -> Option<&str> {
        self.by_specificity().map(|(alias, _)| alias).find(|alias| request.starts_with(alias))
    }
}
