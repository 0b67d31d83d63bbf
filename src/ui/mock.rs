//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use basecamp::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("git_user_name", "Ada Lovelace");
//!
//! ui.message("Starting setup");
//! let name = ui.prompt(&Prompt::input("git_user_name", "Name")).unwrap();
//!
//! assert!(ui.has_message("Starting setup"));
//! assert_eq!(name, "Ada Lovelace");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{BootstrapError, Result};

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// How a mock spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Skipped,
    Cleared,
}

type SpinnerLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    steps: Vec<String>,
    successes: Vec<String>,
    skips: Vec<String>,
    details: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    spinner_log: SpinnerLog,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    ///
    /// Prompts without a response fall back to their default, and fail like
    /// the non-interactive UI when there is none.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    /// Detail lines, recorded whatever the mode.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Messages of every spinner that was started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Keys of prompts that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Final spinner lines with the status they finished with.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_log.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Whether a success line containing `msg` was shown, directly or as a
    /// finished spinner.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self.spinner_finished(SpinnerStatus::Success, msg)
    }

    /// Whether a skipped line containing `msg` was shown, directly or as a
    /// finished spinner.
    pub fn has_skip(&self, msg: &str) -> bool {
        self.skips.iter().any(|m| m.contains(msg))
            || self.spinner_finished(SpinnerStatus::Skipped, msg)
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    fn spinner_finished(&self, status: SpinnerStatus, msg: &str) -> bool {
        self.spinner_log
            .borrow()
            .iter()
            .any(|(s, m)| *s == status && m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn show_step(&mut self, title: &str) {
        self.steps.push(title.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .ok_or_else(|| BootstrapError::PromptUnavailable {
                key: prompt.key.clone(),
            })?;

        Ok(response.trim().to_string())
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_log),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that reports its final line to the owning [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    log: SpinnerLog,
}

impl MockSpinner {
    fn record(&self, status: SpinnerStatus, msg: &str) {
        self.log.borrow_mut().push((status, msg.to_string()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.record(SpinnerStatus::Success, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.record(SpinnerStatus::Skipped, msg);
    }

    fn clear(&mut self) {
        self.record(SpinnerStatus::Cleared, "");
    }
}
