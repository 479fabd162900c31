//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the askweb CLI.

use crate::types::{Answer, SearchResult, ToolCallRecord};
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print rendered answer text, followed by its sources and tool calls.
    pub fn answer(&self, text: &str, answer: Option<&Answer>) {
        println!("{}", text);

        let Some(answer) = answer else {
            return;
        };
        if !answer.sources.is_empty() {
            self.header("Sources");
            for (i, source) in answer.sources.iter().enumerate() {
                self.source_line(i + 1, source);
            }
        }
        if !answer.tool_calls.is_empty() {
            self.header("Tool calls");
            for record in &answer.tool_calls {
                self.tool_call(record);
            }
        }
    }

    /// Print full search results, one block per hit
    pub fn search_results(&self, results: &[SearchResult]) {
        for (i, result) in results.iter().enumerate() {
            self.source_line(i + 1, result);
            if let Some(date) = &result.published_date {
                self.kv("published", date);
            }
            self.kv("score", &format!("{:.3}", result.score));
            println!("      {}", result.text);
        }
    }

    fn source_line(&self, index: usize, source: &SearchResult) {
        if self.colored {
            println!(
                "  {} {} {}",
                format!("[{}]", index).dimmed(),
                source.title.bright_white().bold(),
                source.url.cyan().underline()
            );
        } else {
            println!("  [{}] {} {}", index, source.title, source.url);
        }
    }

    fn tool_call(&self, record: &ToolCallRecord) {
        let status = if record.success { "ok" } else { "failed" };
        if self.colored {
            let status = if record.success {
                status.green().to_string()
            } else {
                status.red().to_string()
            };
            println!(
                "    {} {}({}) {} {}",
                "•".blue(),
                record.name.bright_white(),
                record.arguments.dimmed(),
                status,
                format!("{}ms", record.duration_ms).dimmed()
            );
        } else {
            println!(
                "    - {}({}) {} {}ms",
                record.name, record.arguments, status, record.duration_ms
            );
        }
    }
}
