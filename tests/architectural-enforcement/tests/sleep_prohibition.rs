//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the discovery core and the TUI MUST NOT call
//! sleep methods. Debounce windows wait on `sleep_until` a known deadline, the
//! frame loop waits on `tokio::time::interval`, and results arrive over
//! channels.
//! **Exceptions**: test code

use std::fs;
use std::path::Path;

use architectural_enforcement::{
    code_part, enclosing_fn, rust_files, violation, PRODUCTION_DIRS,
};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations: Vec<String> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| rust_files(dir))
        .flat_map(|path| sleep_violations(&path))
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n✅ ACCEPTABLE:");
        eprintln!("  - tokio::time::sleep_until(deadline) for a debounce window");
        eprintln!("  - tokio::time::interval() for the frame tick");
        eprintln!("  - Test code (#[test], #[tokio::test], #[cfg(test)] modules)");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep in polling loops");
        eprintln!("  - Sleep as poor man's synchronization");
        eprintln!("  - Sleep to 'wait' for a response (await the channel!)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// The production trees are actually being scanned
#[test]
fn test_production_dirs_exist() {
    for dir in PRODUCTION_DIRS {
        assert!(
            !rust_files(dir).is_empty(),
            "no Rust sources found under {dir}"
        );
    }
}

fn sleep_violations(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.lines().collect();

    lines
        .iter()
        .enumerate()
        .filter(|(idx, line)| is_sleep_call(line) && !is_test_code(&lines, *idx))
        .map(|(idx, line)| violation(path, idx + 1, "Sleep call", line))
        .collect()
}

fn is_sleep_call(line: &str) -> bool {
    let code = code_part(line);
    code.contains("::sleep(") || code.contains(".sleep(")
}

fn is_test_code(lines: &[&str], idx: usize) -> bool {
    enclosing_fn(lines, idx).is_some_and(|f| f.is_test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_detection() {
        assert!(is_sleep_call(
            "    tokio::time::sleep(Duration::from_millis(10)).await;"
        ));
        assert!(is_sleep_call("    std::thread::sleep(delay);"));
        assert!(!is_sleep_call(
            "    tokio::time::sleep_until(deadline).await;"
        ));
        assert!(!is_sleep_call("    // tokio::time::sleep(d).await;"));
    }

    #[test]
    fn test_sleep_in_test_is_allowed() {
        let code = [
            "#[tokio::test(start_paused = true)]",
            "async fn test_slow_catalog() {",
            "    tokio::time::sleep(Duration::from_millis(100)).await;",
            "}",
        ];
        assert!(is_test_code(&code, 2));
    }

    #[test]
    fn test_sleep_in_production_fn_is_flagged() {
        let code = [
            "impl Discovery {",
            "    pub async fn poll(&mut self) {",
            "        tokio::time::sleep(Duration::from_millis(10)).await;",
            "    }",
            "}",
        ];
        assert!(is_sleep_call(code[2]));
        assert!(!is_test_code(&code, 2));
    }
}
