//! Progress rendering for the reconcile and teardown workflows.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Renders service progress through an [`OutputContext`].
///
/// Glyphs take their color from the context's stylesheet, so plain
/// output under `--no-color` or a pipe extends to progress lines too.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    fn line(&self, glyph: impl std::fmt::Display, message: &str) {
        if !self.ctx.quiet {
            println!("  {glyph} {message}");
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.line("→".style(self.ctx.styles.info), message);
    }

    fn success(&self, message: &str) {
        self.line("✓".style(self.ctx.styles.success), message);
    }

    fn warn(&self, message: &str) {
        self.line("!".style(self.ctx.styles.warning), message);
    }
}
