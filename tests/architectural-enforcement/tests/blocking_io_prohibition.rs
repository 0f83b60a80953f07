//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async functions in the discovery core and the TUI MUST NOT use
//! blocking I/O. Catalog and counter-store traffic goes through `reqwest`
//! futures; terminal input comes from crossterm's `EventStream`.
//! **Exceptions**: non-async functions (config loading and logging setup run
//! before the event loop), test code

use std::fs;
use std::path::Path;

use architectural_enforcement::{
    code_part, enclosing_fn, rust_files, violation, PRODUCTION_DIRS,
};

/// Test that production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_production_code() {
    let violations: Vec<String> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| rust_files(dir))
        .flat_map(|path| blocking_io_violations(&path))
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O calls found in async code!\n");

        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n❌ FORBIDDEN blocking I/O in async fns:");
        eprintln!("  - std::fs::read(), std::fs::write(), std::fs::File");
        eprintln!("  - std::net::TcpStream, std::net::TcpListener");
        eprintln!("  - std::process::Command::output()");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("  - std::thread::sleep()");
        eprintln!("\n✅ ACCEPTABLE blocking I/O:");
        eprintln!("  - Non-async functions (config and logging setup)");
        eprintln!("  - Test code");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

fn blocking_io_violations(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.lines().collect();

    let mut violations = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let Some(what) = blocking_call(code_part(line)) else {
            continue;
        };
        if in_async_production_fn(&lines, idx) {
            violations.push(violation(path, idx + 1, what, line));
        }
    }
    violations
}

/// Classify a blocking call on a line of code
fn blocking_call(code: &str) -> Option<&'static str> {
    if code.contains("std::fs::") {
        Some("Blocking file I/O")
    } else if code.contains("std::net::") {
        Some("Blocking network I/O")
    } else if code.contains("std::process::Command") {
        Some("Blocking process I/O")
    } else if code.contains("reqwest::blocking") {
        Some("Blocking HTTP client")
    } else if code.contains("std::thread::sleep") {
        Some("Blocking thread sleep")
    } else {
        None
    }
}

/// Inside an async fn that is not test code
///
/// `use` lines at module level have no enclosing fn and are not flagged on
/// their own; the call sites are.
fn in_async_production_fn(lines: &[&str], idx: usize) -> bool {
    enclosing_fn(lines, idx).is_some_and(|f| f.is_async && !f.is_test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_io_detection() {
        let code = [
            "async fn bad_function() {",
            "    let contents = std::fs::read_to_string(\"file.txt\")?;",
            "}",
        ];

        assert_eq!(blocking_call(code[1]), Some("Blocking file I/O"));
        assert!(in_async_production_fn(&code, 1));
    }

    #[test]
    fn test_non_async_function_is_allowed() {
        let code = [
            "pub fn load_config_from_path(path: Option<PathBuf>) {",
            "    let contents = std::fs::read_to_string(path)?;",
            "}",
        ];

        assert!(blocking_call(code[1]).is_some());
        assert!(!in_async_production_fn(&code, 1));
    }

    #[test]
    fn test_test_function_is_allowed() {
        let code = [
            "#[tokio::test]",
            "async fn test_something() {",
            "    let contents = std::fs::read_to_string(\"test.txt\").unwrap();",
            "}",
        ];

        assert!(!in_async_production_fn(&code, 2));
    }

    #[test]
    fn test_async_io_is_not_flagged() {
        assert_eq!(blocking_call("    let body = response.text().await?;"), None);
        assert_eq!(
            blocking_call("    let s = tokio::fs::read_to_string(p).await?;"),
            None
        );
    }
}
