//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{BootstrapError, Result};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> BootstrapError {
    BootstrapError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style(String::new()),
        ..ColorfulTheme::default()
    }
}

/// Ask the user on `term`.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);
    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }

    let answer = input.interact_text_on(term).map_err(map_dialoguer_err)?;
    Ok(answer.trim().to_string())
}
