//! Source hygiene budgets for `src/`.
//!
//! Production sources are scanned line by line for patterns that crash the
//! page or swallow errors. Sibling `*_test.rs` files and the shared test
//! helpers are excluded. Budgets only ever go down.

use std::fs;
use std::path::Path;

/// (pattern, budget). `.ok()` counts as a silent discard: DOM lookups that
/// may legitimately fail go through `browser::page::selected` or `dyn_ref`
/// so a rejected call is logged instead.
const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    (".ok()", 0),
    ("#[allow(dead_code)]", 0),
];

struct SourceFile {
    path: String,
    content: String,
}

fn is_production(path: &str) -> bool {
    !path.ends_with("_test.rs") && !path.ends_with("test_helpers.rs")
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_some_and(|e| e == "rs") && is_production(&path_str) {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn scan_finds_production_sources() {
    let files = sources();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")));
    assert!(files.iter().all(|f| is_production(&f.path)));
}

#[test]
fn pattern_budgets_hold() {
    let files = sources();
    let mut failures = Vec::new();
    for &(pattern, budget) in BUDGETS {
        let found = hits(&files, pattern);
        let total: usize = found.iter().map(|(_, c)| c).sum();
        if total > budget {
            let detail: Vec<String> = found.iter().map(|(p, c)| format!("  {p}: {c}")).collect();
            failures.push(format!("`{pattern}`: found {total}, max {budget}\n{}", detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
