use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "check-exports")]
#[command(about = "Report re-exports outside of index entry points")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Glob of files to skip, relative to the root (repeatable)
    #[arg(short = 'f', long = "file-ignore", value_name = "PATTERN")]
    pub file_ignore: Vec<String>,
}

impl Config {
    pub fn new(root: Option<PathBuf>, file_ignore: Vec<String>) -> Self {
        Config { root, file_ignore }
    }

    /// Resolve the root directory
    pub fn initialize(&mut self) -> Result<()> {
        let root = match self.root.take() {
            Some(r) => r,
            None => {
                debug!("No root provided, using the current directory");
                env::current_dir()?
            }
        };
        let root = root.canonicalize().unwrap_or(root);
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}
