//! Pattern-based specifier rewriting.
//!
//! Specifiers are found with a line-anchored regex instead of a parser so the
//! text can be patched in place without disturbing formatting. Only a quoted
//! string that ends its line after `import …` or `from` is seen; imports
//! followed by a trailing comment are not matched.

use log::{debug, trace};
use oxifix_core::{
    AliasTable, ExtensionResolution, ParsedPath, ResolveError, SpecKind, alias_dir_for,
    resolve_extension, resolve_specifier,
};
use regex::Regex;
use std::{path::Path, sync::LazyLock};

use crate::types::{Change, Diagnostic};

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:\bimport\b[^\n]*?|\bfrom[ \t]*)(['"])([^'"\n]*)(['"])[ \t]*;?[ \t\r]*$"#)
        .unwrap()
});

/// Options that shape how a single specifier is rewritten
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub skip_alias: bool,
    pub import_ignore: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Rewrite {
    pub text: String,
    pub changes: Vec<Change>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rewrite {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Rewrite every matched specifier in `source`, which was read from `file`.
///
/// `display_name` is used for the file in changes and diagnostics.
pub fn rewrite_source(
    source: &str,
    file: &Path,
    display_name: &str,
    aliases: &AliasTable,
    opts: &RewriteOptions,
) -> Rewrite {
    let mut rewrite = Rewrite { text: String::with_capacity(source.len()), ..Default::default() };
    let mut last = 0;

    for caps in IMPORT_PATTERN.captures_iter(source) {
        let (Some(open), Some(path), Some(close)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            continue;
        };
        if open.as_str() != close.as_str() {
            continue;
        }

        let request = path.as_str();
        trace!("Found specifier '{}' in {}", request, display_name);

        let (fixed, issues) = fix_specifier(request, file, aliases, opts);
        rewrite
            .diagnostics
            .extend(issues.iter().map(|e| Diagnostic::for_specifier(display_name, request, e)));

        if fixed != request {
            debug!("{}: '{}' -> '{}'", display_name, request, fixed);
            rewrite.text.push_str(&source[last..path.start()]);
            rewrite.text.push_str(&fixed);
            last = path.end();
            rewrite.changes.push(Change {
                file: display_name.to_string(),
                from: request.to_string(),
                to: fixed,
            });
        }
    }

    rewrite.text.push_str(&source[last..]);
    rewrite
}

/// Compute the normalized form of one specifier along with any problems met
/// on the way. The returned string equals `request` when nothing changes.
pub fn fix_specifier(
    request: &str,
    file: &Path,
    aliases: &AliasTable,
    opts: &RewriteOptions,
) -> (String, Vec<ResolveError>) {
    let kind = SpecKind::classify(request, aliases);
    if kind == SpecKind::Other {
        return (request.to_string(), Vec::new());
    }
    if opts.import_ignore.iter().any(|s| request.contains(s.as_str())) {
        trace!("Skipping ignored import '{}'", request);
        return (request.to_string(), Vec::new());
    }

    let resolved = resolve_specifier(request, file, aliases);
    let mut spec = ParsedPath::parse(request);

    // Directory imports have no file name to normalize
    if matches!(spec.stem.as_str(), "" | "." | "..") {
        let err = ResolveError::ExtensionNotFound {
            path: resolved,
            tried: "a file name".to_string(),
        };
        return (request.to_string(), vec![err]);
    }

    let mut issues = Vec::new();
    let target = ParsedPath::from_path(&resolved);
    match resolve_extension(&target) {
        Ok(ExtensionResolution::Resolved(ext)) => spec = spec.with_ext(ext),
        Ok(ExtensionResolution::Unchanged) => {}
        Err(e) => issues.push(e),
    }

    if kind == SpecKind::Relative && !opts.skip_alias {
        let target_file = target.with_ext(&spec.ext).to_path_buf();
        match alias_dir_for(&target_file, aliases) {
            Ok(dir) => spec.dir = dir,
            Err(e) => issues.push(e),
        }
    }

    (spec.to_string(), issues)
}
