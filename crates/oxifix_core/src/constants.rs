//! Constants for file extensions and project layout.
//!
//! ## Extension sets
//!
//! - [`SOURCE_EXTENSIONS`]: files the tool visits at all.
//! - [`LOOKUP_EXTENSIONS`]: extensions a specifier may be written with while
//!   actually pointing at a TypeScript source. A specifier carrying one of these
//!   gets its extension normalized.
//! - [`CANDIDATE_EXTENSIONS`]: the real on-disk extensions probed, in priority
//!   order, when normalizing.

/// File extensions for JavaScript/TypeScript files that should be visited
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];

/// Extensions (with leading dot, empty for none) that resolve to a TS source
pub const LOOKUP_EXTENSIONS: &[&str] = &["", ".js", ".jsx", ".ts", ".tsx"];

/// Real extensions to probe on disk (in priority order)
pub const CANDIDATE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts"];

/// Directories never walked, wherever they appear in the tree
pub const BASE_IGNORE_DIRS: &[&str] = &[".git", "node_modules", "dist"];

/// Config files holding `compilerOptions.paths`, in lookup priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];
