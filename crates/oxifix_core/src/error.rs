use std::path::PathBuf;

/// Errors produced while loading the alias table or resolving a specifier.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no tsconfig.json or jsconfig.json found in {} or any parent folder", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("circular extends chain at {}", .0.display())]
    ExtendsCycle(PathBuf),

    #[error("no file found for {} (tried {tried})", path.display())]
    ExtensionNotFound { path: PathBuf, tried: String },

    #[error("no alias covers {}", .0.display())]
    NoAliasFound(PathBuf),
}
