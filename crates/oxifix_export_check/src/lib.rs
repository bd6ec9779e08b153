//! Re-export lint: only `index` entry points may contain
//! `export … from` declarations.

mod checker;
mod config;
mod reporter;
mod scanner;
mod types;

pub use checker::{check_files, run_export_check};
pub use config::Config;
pub use reporter::{print_no_violations_message, print_violations};
pub use scanner::{is_entry_point, re_exports_in};
pub use types::{CheckResult, ScanError, Violation};
