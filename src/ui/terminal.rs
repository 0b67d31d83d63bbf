//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, should_use_colors, CampTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    Prompt, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: CampTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            theme: CampTheme::for_colors(!no_color && should_use_colors()),
            mode,
        }
    }

    /// The theme in use.
    pub fn theme(&self) -> &CampTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn show_step(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}", self.theme.format_step(title)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_skipped(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if !matches!(self.mode, OutputMode::Silent) {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            writeln!(self.term, "  {}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the UI for this run.
///
/// Falls back to [`NonInteractiveUI`] when `interactive` is false or stdout
/// is not a terminal.
pub fn create_ui(interactive: bool, mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, no_color))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_non_interactive_is_not_interactive() {
        let ui = create_ui(false, OutputMode::Normal, false);
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn no_color_forces_plain_theme() {
        let ui = TerminalUI::new(OutputMode::Normal, true);
        assert_eq!(ui.theme().format_success("ok"), "✓ ok");
    }
}
