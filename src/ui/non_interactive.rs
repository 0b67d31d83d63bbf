//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{BootstrapError, Result};

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "BASECAMP_PROMPT_";

/// Plain-text UI for logs and pipes.
///
/// Prompts are answered from `BASECAMP_PROMPT_<KEY>` variables, then from
/// the prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading overrides from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn show_step(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n:: {}", title);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("○ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if !matches!(self.mode, OutputMode::Silent) {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("  {}", msg);
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref());
        if let Some(answer) = answer {
            return Ok(answer.trim().to_string());
        }

        Err(BootstrapError::PromptUnavailable {
            key: prompt.key.clone(),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("  {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n⛺ {}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the final line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("○ {}", msg);
        }
    }

    fn clear(&mut self) {}
}
