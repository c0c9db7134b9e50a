//! Colored terminal output on stderr.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Plain message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Green.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green, msg);
    }

    /// Yellow.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow, msg);
    }

    /// Red.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red, msg);
    }

    /// Cyan bold, for section headers and the dry run banner.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.cyan_bold, msg);
    }

    /// Dimmed, for detail lines.
    pub(crate) fn detail(&self, msg: &str) {
        self.line(&self.dim, msg);
    }
}
