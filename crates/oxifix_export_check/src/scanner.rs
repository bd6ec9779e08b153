use anyhow::{Context, Result, bail};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::{SourceType, Span};
use oxifix_core::ParsedPath;
use std::{fs, path::Path};

/// Entry points (`index.ts`, `index.tsx`, ...) are allowed to re-export.
pub fn is_entry_point(file: &Path) -> bool {
    ParsedPath::from_path(file).stem == "index"
}

/// Source text of every re-export declaration (`export * from`,
/// `export { x } from`, `export type { T } from`) in `file`.
pub fn re_exports_in(file: &Path) -> Result<Vec<String>> {
    trace!("Parsing file for re-exports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let re_exports = scan_source(&src, source_type_for(file))
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    debug!("Found {} re-exports in {}", re_exports.len(), file.display());
    Ok(re_exports)
}

fn scan_source(src: &str, st: SourceType) -> Result<Vec<String>> {
    let allocator = Allocator::default();
    let ParserReturn { program, panicked, errors, .. } = OxcParser::new(&allocator, src, st).parse();
    if panicked || !errors.is_empty() {
        let first = errors.first().map(|e| e.to_string()).unwrap_or_default();
        bail!("syntax error: {}", first);
    }

    let mut found = Vec::new();
    for stmt in &program.body {
        let span = match stmt {
            Statement::ExportAllDeclaration(decl) => decl.span,
            Statement::ExportNamedDeclaration(decl) if decl.source.is_some() => decl.span,
            _ => continue,
        };
        found.push(span_text(src, span).to_string());
    }
    Ok(found)
}

fn span_text(src: &str, span: Span) -> &str {
    src.get(span.start as usize..span.end as usize).unwrap_or_default()
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let typescript = matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts"));

    // Re-exports only exist in modules, so always parse with the module goal.
    // Plain JS files commonly hold JSX; TS files only allow it in `.tsx`.
    SourceType::default()
        .with_module(true)
        .with_jsx(!typescript || ext == Some("tsx"))
        .with_typescript(typescript)
}
