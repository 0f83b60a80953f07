//! Architectural Enforcement
//!
//! Source scanners shared by the integration tests in `tests/`:
//! - No sleep() calls in production code (wait on I/O or deadlines instead)
//! - No blocking I/O inside async functions
//!
//! The scanners are line based. They are not a parser, so they only need to
//! be right about the way this workspace is formatted (rustfmt defaults).

use std::path::{Path, PathBuf};

/// Production source trees, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["discovery/core/src", "tui/src"];

/// Workspace root (two levels above this crate)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Every `.rs` file under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// The part of a line before any `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Header of the function a line sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosingFn {
    /// Declared `async fn`
    pub is_async: bool,
    /// Marked `#[test]`/`#[tokio::test]`, or inside a `#[cfg(test)]` module
    pub is_test: bool,
}

/// Whether a trimmed line opens a function (any visibility, async or not)
pub fn is_fn_header(trimmed: &str) -> bool {
    let rest = strip_visibility(trimmed);
    let rest = rest.strip_prefix("const ").unwrap_or(rest);
    let rest = rest.strip_prefix("async ").unwrap_or(rest);
    rest.starts_with("fn ")
}

fn strip_visibility(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("pub ") {
        return rest;
    }
    if line.starts_with("pub(") {
        if let Some(close) = line.find(") ") {
            return &line[close + 2..];
        }
    }
    line
}

/// Find the function enclosing `lines[idx]`, scanning backwards
///
/// Returns `None` when the scan reaches a module or impl boundary first.
pub fn enclosing_fn(lines: &[&str], idx: usize) -> Option<EnclosingFn> {
    let fn_idx = (0..=idx).rev().find_map(|i| {
        let line = lines[i].trim();
        if is_fn_header(line) {
            Some(Ok(i))
        } else if i < idx && (line.starts_with("mod ") || line.starts_with("impl")) {
            Some(Err(()))
        } else {
            None
        }
    })?;
    let fn_idx = fn_idx.ok()?;

    let header = strip_visibility(lines[fn_idx].trim());
    let is_async = header.starts_with("async fn ") || header.starts_with("const async fn ");

    Some(EnclosingFn {
        is_async,
        is_test: has_test_marker(lines, fn_idx) || in_test_module(lines, fn_idx),
    })
}

/// Attributes directly above the function at `fn_idx`
fn has_test_marker(lines: &[&str], fn_idx: usize) -> bool {
    for line in lines[..fn_idx].iter().rev().map(|l| l.trim()) {
        if line.starts_with("#[test]") || line.starts_with("#[tokio::test") {
            return true;
        }
        if !(line.starts_with("#[") || line.starts_with("///")) {
            break;
        }
    }
    false
}

/// Whether a `#[cfg(test)]` module opens anywhere above `idx`
///
/// Test modules sit at the bottom of each file, so anything after the marker
/// counts as test code.
fn in_test_module(lines: &[&str], idx: usize) -> bool {
    lines[..idx]
        .windows(2)
        .any(|pair| pair[0].trim() == "#[cfg(test)]" && pair[1].trim_start().starts_with("mod "))
}

/// Format one violation for the failure report
pub fn violation(path: &Path, line_number: usize, what: &str, line: &str) -> String {
    let shown = path
        .strip_prefix(workspace_root())
        .unwrap_or(path)
        .display()
        .to_string();
    format!("{shown}:{line_number} - {what}: {}", line.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_headers_with_visibility() {
        assert!(is_fn_header("fn main() {"));
        assert!(is_fn_header("pub fn load() -> Self {"));
        assert!(is_fn_header("pub async fn settle(&mut self) {"));
        assert!(is_fn_header("pub(crate) fn helper() {"));
        assert!(is_fn_header("async fn fetch(&self) {"));
        assert!(!is_fn_header("let f = fn_pointer;"));
        assert!(!is_fn_header("// fn commented()"));
    }

    #[test]
    fn test_enclosing_async_fn() {
        let code = [
            "impl Discovery {",
            "    pub async fn poll(&mut self) -> bool {",
            "        let x = 1;",
            "    }",
        ];
        assert_eq!(
            enclosing_fn(&code, 2),
            Some(EnclosingFn {
                is_async: true,
                is_test: false
            })
        );
    }

    #[test]
    fn test_enclosing_sync_fn() {
        let code = [
            "pub fn load_config_from_path(path: Option<PathBuf>) {",
            "    let s = std::fs::read_to_string(path)?;",
            "}",
        ];
        assert_eq!(
            enclosing_fn(&code, 1),
            Some(EnclosingFn {
                is_async: false,
                is_test: false
            })
        );
    }

    #[test]
    fn test_test_function_detection() {
        let code = [
            "#[tokio::test(start_paused = true)]",
            "async fn test_something() {",
            "    tokio::time::sleep(Duration::from_millis(5)).await;",
            "}",
        ];
        assert!(enclosing_fn(&code, 2).is_some_and(|f| f.is_test));
    }

    #[test]
    fn test_cfg_test_module_detection() {
        let code = [
            "#[cfg(test)]",
            "mod tests {",
            "    async fn helper() {",
            "        tokio::time::sleep(Duration::from_millis(5)).await;",
            "    }",
            "}",
        ];
        assert!(enclosing_fn(&code, 3).is_some_and(|f| f.is_test));
    }

    #[test]
    fn test_impl_boundary_stops_scan() {
        let code = ["impl Foo {", "    const X: u32 = 1;"];
        assert_eq!(enclosing_fn(&code, 1), None);
    }
}
