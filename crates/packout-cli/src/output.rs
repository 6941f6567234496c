//! Output management and formatting.
//!
//! Renders go to stdout; status lines and reported errors go to stderr so
//! that `packout render pack > all.hcl` captures only rendered content.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use packout_core::application::ports::Presenter;
use packout_core::domain::{ErrorContext, Render};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    out: Term,
    err: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message on stdout; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.out.write_line(msg)
    }

    /// Success indicator on stderr: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.err.write_line(&line)
    }

    /// Warning indicator on stderr: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.err.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.out.write_line(&line)
    }
}

impl Presenter for OutputManager {
    /// Renders are the command's product and are shown even in quiet mode.
    fn present(&mut self, render: &Render) -> io::Result<()> {
        self.out.write_str(&format_render(render, !self.no_color))?;
        self.out.flush()
    }

    fn report(
        &mut self,
        message: &str,
        error: &dyn std::error::Error,
        context: &ErrorContext,
    ) -> io::Result<()> {
        self.err
            .write_str(&format_report(message, error, context, !self.no_color))?;
        self.err.flush()
    }
}

/// `<name>:`, a blank line, then the content.
pub fn format_render(render: &Render, color: bool) -> String {
    let header = format!("{}:", render.name);
    let header = if color {
        header.bold().to_string()
    } else {
        header
    };

    let mut out = format!("{header}\n\n{}", render.content);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out
}

/// `! message: error` followed by the aligned context lines.
pub fn format_report(
    message: &str,
    error: &dyn std::error::Error,
    context: &ErrorContext,
    color: bool,
) -> String {
    let mut out = if color {
        format!(
            "{} {}: {}\n",
            "!".red().bold(),
            message.red().bold(),
            error.to_string().red()
        )
    } else {
        format!("! {message}: {error}\n")
    };

    if !context.is_empty() {
        let width = context
            .entries()
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);

        if color {
            out.push_str(&format!("\n  {}\n", "Context:".dimmed()));
        } else {
            out.push_str("\n  Context:\n");
        }
        for (label, value) in context.entries() {
            let label = format!("{label:<width$}");
            if color {
                out.push_str(&format!("    {}: {}\n", label.dimmed(), value));
            } else {
                out.push_str(&format!("    {label}: {value}\n"));
            }
        }
    }

    out.push('\n');
    out
}

// ── tests ─────────────────────────────────────────────────────────────────────
