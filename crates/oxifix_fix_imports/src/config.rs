use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use oxifix_core::AliasTable;
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "fix-imports")]
#[command(about = "Normalize import extensions and rewrite relative imports to path aliases")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Write changes to disk (default is a dry run)
    #[arg(short, long)]
    pub write: bool,

    /// Keep relative imports relative; only fix extensions
    #[arg(long)]
    pub skip_alias: bool,

    /// Glob of files to leave untouched, relative to the root (repeatable)
    #[arg(short = 'f', long = "file-ignore", value_name = "PATTERN")]
    pub file_ignore: Vec<String>,

    /// Skip imports containing this string (repeatable)
    #[arg(short = 'i', long = "import-ignore", value_name = "STRING")]
    pub import_ignore: Vec<String>,

    /// Only fail on errors; missing files and aliases are still reported
    #[arg(long)]
    pub lenient: bool,

    #[clap(skip)]
    pub aliases: AliasTable,
}

impl Config {
    /// Initialize the config by resolving the root directory and loading the alias table
    pub fn initialize(&mut self) -> Result<()> {
        let root = match self.root.take() {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                r
            }
            None => {
                debug!("No root provided, using the current directory");
                env::current_dir()?
            }
        };
        let root = root.canonicalize().unwrap_or(root);
        info!("Using root directory: {}", root.display());

        debug!("Loading path aliases");
        self.aliases = oxifix_core::load_alias_table(&root)?;
        debug!("Found {} path aliases", self.aliases.len());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}
