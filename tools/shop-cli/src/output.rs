//! Output formatting for the CLI.

use std::future::Future;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::cart::{Notification, NotificationLevel, Notifier};
use shop_commerce::catalog::{Product, MAX_RATING};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self {
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{msg}");
    }

    /// Print a step in a process.
    pub fn step(&self, num: u8, total: u8, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Await `fut` behind a spinner.
    pub async fn while_loading<F: Future>(&self, msg: &str, fut: F) -> F::Output {
        let spinner = self.spinner(msg);
        let out = fut.await;
        spinner.finish_and_clear();
        out
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

impl Notifier for Output {
    fn notify(&self, notification: &Notification) {
        match notification.level() {
            NotificationLevel::Success => self.success(&notification.to_string()),
            NotificationLevel::Info => self.info(&notification.to_string()),
        }
    }
}

/// Stock line, colored by availability.
pub fn stock_badge(product: &Product) -> String {
    let status = product.stock_status();
    if product.is_in_stock() {
        style(status).green().to_string()
    } else {
        style(status).red().to_string()
    }
}

/// Rating as stars, e.g. `★★★★☆ 4.5`.
pub fn stars(rating: f32) -> String {
    let full = rating.round().clamp(0.0, MAX_RATING) as usize;
    let empty = MAX_RATING as usize - full;
    format!(
        "{}{} {:.1}",
        style("★".repeat(full)).yellow(),
        style("☆".repeat(empty)).dim(),
        rating
    )
}

/// Wrap text on word boundaries to at most `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(20);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shorten `text` to `max` characters, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        let lines = wrap(
            "Adjustable lamp with a weighted base and a warm LED that is easy on the eyes",
            24,
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 24));
        assert_eq!(lines.join(" "), "Adjustable lamp with a weighted base and a warm LED that is easy on the eyes");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Desk Lamp", 20), "Desk Lamp");
        assert_eq!(truncate("Ergonomic Office Chair", 10), "Ergonomic…");
    }

    #[test]
    fn test_stars_counts() {
        console::set_colors_enabled(false);
        assert_eq!(stars(4.6), "★★★★★ 4.6");
        assert_eq!(stars(3.2), "★★★☆☆ 3.2");
    }
}
