//! Output formatting and progress spinners for CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for long-running solver work
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{key}:"), value);
}

/// Render actions the way the game prompt does: `{(0), (2)}`
pub fn format_actions<T: std::fmt::Display>(actions: &[T]) -> String {
    let parts: Vec<String> = actions.iter().map(ToString::to_string).collect();
    format!("{{{}}}", parts.join(", "))
}
