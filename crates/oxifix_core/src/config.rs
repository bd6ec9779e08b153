use indexmap::IndexMap;
use log::{debug, trace};
use path_clean::clean;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{constants::CONFIG_FILE_NAMES, error::ResolveError, types::AliasTable};

#[derive(Debug, Deserialize)]
struct TsConfig {
    extends: Option<serde_json::Value>,

    #[serde(rename = "compilerOptions")]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Deserialize)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,

    // IndexMap keeps the declaration order of the aliases
    paths: Option<IndexMap<String, serde_json::Value>>,
}

struct LoadedConfig {
    aliases: AliasTable,
    base_url: Option<PathBuf>,
}

/// Find the nearest `tsconfig.json` (or `jsconfig.json`) in `start` or any of
/// its ancestors.
pub fn find_config(start: &Path) -> Result<PathBuf, ResolveError> {
    debug!("Searching for project config from: {:?}", start);
    let mut current = Some(start);

    while let Some(dir) = current {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            trace!("Checking for config at: {:?}", candidate);
            if candidate.is_file() {
                debug!("Found project config at: {:?}", candidate);
                return Ok(candidate);
            }
        }
        current = dir.parent();
    }

    debug!("No project config found above {:?}", start);
    Err(ResolveError::ConfigNotFound(start.to_path_buf()))
}

/// Load the alias table from the config nearest to `root`.
pub fn load_alias_table(root: &Path) -> Result<AliasTable, ResolveError> {
    let config_path = find_config(root)?;
    read_alias_table(&config_path)
}

/// Read the alias table from a specific config file, following `extends`.
///
/// Only `"<alias>/*": ["<dir>/*", ...]` entries become aliases; everything
/// else in `paths` is skipped.
pub fn read_alias_table(config_path: &Path) -> Result<AliasTable, ResolveError> {
    let mut visited = HashSet::new();
    let loaded = load_recursive(config_path, &mut visited)?;
    debug!("Loaded {} path aliases from {:?}", loaded.aliases.len(), config_path);
    Ok(loaded.aliases)
}

fn load_recursive(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<LoadedConfig, ResolveError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        return Err(ResolveError::ExtendsCycle(canonical));
    }
    trace!("Reading config at: {:?}", canonical);

    let content = fs::read_to_string(&canonical).map_err(|e| ResolveError::ConfigParse {
        path: canonical.clone(),
        message: e.to_string(),
    })?;
    let config: TsConfig = serde_json::from_str(&strip_json_comments(&content)).map_err(|e| {
        ResolveError::ConfigParse { path: canonical.clone(), message: e.to_string() }
    })?;

    let config_dir = canonical.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    // Parents first so that entries declared here override inherited ones
    let mut loaded = LoadedConfig { aliases: AliasTable::new(), base_url: None };
    for parent in extends_paths(config.extends.as_ref(), &config_dir) {
        let inherited = load_recursive(&parent, visited)?;
        for (alias, target) in inherited.aliases.iter() {
            loaded.aliases.insert(alias, target);
        }
        if inherited.base_url.is_some() {
            loaded.base_url = inherited.base_url;
        }
    }

    let Some(options) = config.compiler_options else {
        return Ok(loaded);
    };

    if let Some(base_url) = &options.base_url {
        loaded.base_url = Some(PathBuf::from(clean(config_dir.join(base_url))));
    }
    let base_path = loaded.base_url.clone().unwrap_or_else(|| config_dir.clone());

    for (key, targets) in options.paths.iter().flatten() {
        let first_target = targets
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|t| t.as_str())
            .or_else(|| targets.as_str());

        match (key.strip_suffix('*'), first_target.and_then(|t| t.strip_suffix('*'))) {
            (Some(alias), Some(target)) if alias.ends_with('/') && target.ends_with('/') => {
                let target_dir = PathBuf::from(clean(base_path.join(target)));
                trace!("Found path alias: '{}' -> {:?}", alias, target_dir);
                loaded.aliases.insert(alias, target_dir);
            }
            _ => {
                trace!("Skipping non-prefix path mapping: '{}' -> {}", key, targets);
            }
        }
    }

    Ok(loaded)
}

/// Relative `extends` entries resolved against the config directory.
/// Package references are not followed.
fn extends_paths(extends: Option<&serde_json::Value>, config_dir: &Path) -> Vec<PathBuf> {
    let raw: Vec<&str> = match extends {
        Some(serde_json::Value::String(s)) => vec![s.as_str()],
        Some(serde_json::Value::Array(items)) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .filter_map(|entry| {
            if !(entry.starts_with('.') || entry.starts_with('/')) {
                debug!("Not following package extends: '{}'", entry);
                return None;
            }
            let candidate = config_dir.join(entry);
            if candidate.is_file() {
                return Some(candidate);
            }
            let with_json = config_dir.join(format!("{}.json", entry));
            if with_json.is_file() {
                return Some(with_json);
            }
            debug!("Extended config not found: {:?}", candidate);
            None
        })
        .collect()
}

/// Remove `//` and `/* */` comments and trailing commas so the text parses as
/// plain JSON. String contents (e.g. `"@/*"`) are left alone.
pub(crate) fn strip_json_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    if c == '\n' {
                        out.push('\n');
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    strip_trailing_commas(&out)
}

fn strip_trailing_commas(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = content.chars().collect();

    for (idx, &ch) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}
