//! Terminal output for the shelf CLI.
//!
//! Human output goes through `console` styling; with `--json` every
//! decorative line is suppressed and commands print a single JSON document.

use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Kind of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warn,
}

impl Tone {
    fn symbol(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
        }
    }
}

/// Output handler shared by all commands.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn note(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        match tone {
            // Warnings go to stderr.
            Tone::Warn => eprintln!("{} {}", tone.symbol(), msg),
            _ => println!("{} {}", tone.symbol(), msg),
        }
    }

    pub fn info(&self, msg: &str) {
        self.note(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.note(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.note(Tone::Warn, msg);
    }

    /// Print an error. In JSON mode this is an `{"error": ...}` object on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    /// Screen title.
    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn subtitle(&self, text: &str) {
        if !self.json && !text.is_empty() {
            println!("{}", style(text).dim());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print one row of a fixed-width table.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let cells: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", cells.join("  "));
    }

    /// Spinner shown while the gateway is fetching. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Pad to `width` visible columns; escape codes do not count.
fn pad(col: &str, width: usize) -> String {
    let visible = console::measure_text_width(col);
    format!("{}{}", col, " ".repeat(width.saturating_sub(visible)))
}

pub fn availability_badge(available: bool) -> String {
    if available {
        style("verfügbar").green().to_string()
    } else {
        style("nicht verfügbar").dim().to_string()
    }
}

/// Heart for favorites, a blank cell otherwise.
pub fn favorite_marker(favorite: bool) -> String {
    if favorite {
        style("♥").red().to_string()
    } else {
        " ".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_ignores_escape_codes() {
        let styled = style("abc").green().force_styling(true).to_string();
        let padded = pad(&styled, 5);
        assert_eq!(console::measure_text_width(&padded), 5);
        assert_eq!(pad("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_favorite_marker_keeps_column_width() {
        assert_eq!(console::measure_text_width(&favorite_marker(true)), 1);
        assert_eq!(console::measure_text_width(&favorite_marker(false)), 1);
    }
}
