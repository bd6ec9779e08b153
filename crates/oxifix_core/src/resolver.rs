use log::trace;
use path_clean::clean;
use std::path::{Component, Path, PathBuf};

use crate::{
    constants::{CANDIDATE_EXTENSIONS, LOOKUP_EXTENSIONS},
    error::ResolveError,
    types::{AliasTable, ParsedPath},
};

/// Outcome of extension normalization for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionResolution {
    /// The written extension is not a lookup extension; keep it as is
    Unchanged,
    /// The extension that matches the file on disk
    Resolved(&'static str),
}

/// Absolute path a specifier refers to, extension not yet normalized.
///
/// The most specific matching alias wins; anything else is resolved against
/// the directory of `from_file`. Bare package names must be filtered out by
/// the caller.
pub fn resolve_specifier(request: &str, from_file: &Path, aliases: &AliasTable) -> PathBuf {
    for (alias, target_dir) in aliases.by_specificity() {
        if let Some(remainder) = request.strip_prefix(alias) {
            trace!("Matched alias '{}' for request '{}'", alias, request);
            return PathBuf::from(clean(target_dir.join(remainder)));
        }
    }

    let base = from_file.parent().unwrap_or_else(|| Path::new("."));
    trace!("Resolving '{}' relative to {}", request, base.display());
    PathBuf::from(clean(base.join(request)))
}

/// Work out which extension the on-disk file behind `target` has.
///
/// Only lookup extensions (none, `.js`, `.jsx`, `.ts`, `.tsx`) are rewritten;
/// the candidates `.ts`, `.tsx` and `.d.ts` are probed in that order.
pub fn resolve_extension(target: &ParsedPath) -> Result<ExtensionResolution, ResolveError> {
    if !LOOKUP_EXTENSIONS.contains(&target.ext.as_str()) {
        trace!("Keeping non-lookup extension '{}' for {}", target.ext, target);
        return Ok(ExtensionResolution::Unchanged);
    }

    if !target.stem.is_empty() {
        for candidate in CANDIDATE_EXTENSIONS {
            let probe = target.with_ext(candidate).to_path_buf();
            trace!("Probing {}", probe.display());
            if probe.is_file() {
                return Ok(ExtensionResolution::Resolved(*candidate));
            }
        }
    }

    Err(ResolveError::ExtensionNotFound {
        path: target.to_path_buf(),
        tried: CANDIDATE_EXTENSIONS.join(", "),
    })
}

/// Directory component, in alias form, for a file covered by an alias.
///
/// Aliases are tried in declaration order; the first whose target directory
/// contains `target` wins.
pub fn alias_dir_for(target: &Path, aliases: &AliasTable) -> Result<String, ResolveError> {
    for (alias, alias_dir) in aliases.iter() {
        let Some(rel) = relative_path(target, alias_dir) else {
            continue;
        };
        if matches!(rel.components().next(), Some(Component::ParentDir)) {
            trace!("{} escapes alias '{}'", target.display(), alias);
            continue;
        }

        let rel_str = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        let aliased = ParsedPath::parse(&format!("{}{}", alias, rel_str));
        trace!("{} is covered by alias '{}' as '{}'", target.display(), alias, aliased);
        return Ok(aliased.dir);
    }

    Err(ResolveError::NoAliasFound(target.to_path_buf()))
}

/// Create a relative path from `base` to `target`.
///
/// Returns `None` when the two paths do not share a root.
pub fn relative_path(target: &Path, base: &Path) -> Option<PathBuf> {
    let target_parts: Vec<Component> =
        target.components().filter(|c| !matches!(c, Component::CurDir)).collect();
    let base_parts: Vec<Component> =
        base.components().filter(|c| !matches!(c, Component::CurDir)).collect();

    if target_parts.first() != base_parts.first() {
        return None;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base_parts[common..] {
        result.push("..");
    }
    for component in &target_parts[common..] {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

/// Express a root-relative path relative to the current directory, so the
/// terminal can turn it into a link. Falls back to the root-relative form.
pub fn relativize_to_cwd(root: &Path, relative_to_root: &str) -> String {
    let Ok(cwd) = std::env::current_dir() else {
        trace!("Failed to get current directory");
        return relative_to_root.to_string();
    };
    match relative_path(&root.join(relative_to_root), &cwd) {
        Some(rel_path) => rel_path.to_string_lossy().to_string(),
        None => relative_to_root.to_string(),
    }
}
