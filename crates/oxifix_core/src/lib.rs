//! Core utilities for oxifix tools.
//!
//! This crate provides the pieces shared by the import fixer and the export
//! checker:
//! - Collecting source files from a project
//! - Loading path aliases from the nearest tsconfig/jsconfig
//! - Resolving specifiers to files, normalizing extensions and finding the
//!   alias that covers a file

mod collector;
mod config;
mod constants;
mod error;
mod resolver;
mod types;

// Re-export public API
pub use collector::{CollectorConfig, collect_files};
pub use config::{find_config, load_alias_table, read_alias_table};
pub use constants::{
    BASE_IGNORE_DIRS, CANDIDATE_EXTENSIONS, CONFIG_FILE_NAMES, LOOKUP_EXTENSIONS,
    SOURCE_EXTENSIONS,
};
pub use error::ResolveError;
pub use resolver::{
    ExtensionResolution, alias_dir_for, relative_path, relativize_to_cwd, resolve_extension,
    resolve_specifier,
};
pub use types::{AliasTable, ParsedPath, SpecKind};
