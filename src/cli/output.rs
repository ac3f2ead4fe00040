//! Console output for parsum
//!
//! Results go to stdout; diagnostics go to stderr. Styling is dropped
//! automatically when the stream is not a terminal.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a verbose breakdown item
    pub fn verbose_breakdown(&self, label: &str, value: &str) {
        if self.verbose && !self.quiet {
            println!(
                "  {} {} {}",
                style("•").cyan(),
                style(label).dim(),
                style(value).yellow().bold()
            );
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a labelled result line; always shown, even in quiet mode
    pub fn result(&self, label: &str, value: i64) {
        println!("{} result: {}", style(label).bold(), value);
    }

    /// Print an elapsed time line; always shown, even in quiet mode
    pub fn elapsed(&self, seconds: f64) {
        println!("time: {} seconds", seconds);
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {} {}", style(key).dim(), styled_value);
        }
    }

    /// Print a critical error with enhanced styling
    pub fn critical(&self, message: &str) {
        // Always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red().bold(), style(message).red().bold());
    }
}
