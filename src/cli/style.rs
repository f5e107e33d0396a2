//! Terminal styling helpers
//!
//! Colors are applied only when stdout supports them; output goes through
//! `anstream`, which strips anything left over for dumb terminals and pipes.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};

/// Success mark
pub const CHECK: &str = "✓";
/// Failure mark
pub const CROSS: &str = "✗";
/// Pending mark
pub const BULLET: &str = "•";
/// Unknown mark
pub const QUESTION: &str = "?";

fn paint<T: std::fmt::Display>(value: &T, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |v| v.style(style))
        .to_string()
}

/// Semantic styles for report output
pub trait Stylize {
    /// Bold green
    fn success(&self) -> String;
    /// Bold red
    fn error(&self) -> String;
    /// Bold yellow
    fn warn(&self) -> String;
    /// Dimmed
    fn muted(&self) -> String;
    /// Bold
    fn emphasis(&self) -> String;
    /// Blue
    fn accent(&self) -> String;
    /// Black on green, for the final banner
    fn success_badge(&self) -> String;
    /// White on red, for the final banner
    fn error_badge(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn success(&self) -> String {
        paint(self, Style::new().green().bold())
    }

    fn error(&self) -> String {
        paint(self, Style::new().red().bold())
    }

    fn warn(&self) -> String {
        paint(self, Style::new().yellow().bold())
    }

    fn muted(&self) -> String {
        paint(self, Style::new().dimmed())
    }

    fn emphasis(&self) -> String {
        paint(self, Style::new().bold())
    }

    fn accent(&self) -> String {
        paint(self, Style::new().blue())
    }

    fn success_badge(&self) -> String {
        paint(self, Style::new().black().on_green().bold())
    }

    fn error_badge(&self) -> String {
        paint(self, Style::new().white().on_red().bold())
    }
}

/// Render `url` as a clickable link when the terminal supports it
pub fn hyperlink(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner style shared by long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner().tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", CHECK])
}
