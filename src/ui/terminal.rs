//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{JedTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Results and status go to stdout, errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: JedTheme,
    mode: OutputMode,
    use_color: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, use_color: bool) -> Self {
        let theme = if use_color {
            JedTheme::new()
        } else {
            JedTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            use_color,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn colors_enabled(&self) -> bool {
        self.use_color
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the UI for the current process.
pub fn create_ui(mode: OutputMode, use_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, use_color))
}
