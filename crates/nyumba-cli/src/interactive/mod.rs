//! Interactive prompts

use crate::error::{CliError, Result};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Prompts shown only when attached to a terminal
pub struct Prompter {
    theme: ColorfulTheme,
    interactive: bool,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive: Term::stdout().is_term(),
        }
    }

    /// Ask for the M-Pesa phone number that should receive the payment prompt
    pub fn phone_number(&self) -> Result<String> {
        if !self.interactive {
            return Err(CliError::interactive(
                "--phone is required when not running in a terminal",
            ));
        }

        let phone: String = Input::with_theme(&self.theme)
            .with_prompt("M-Pesa phone number (e.g. 254712345678)")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Phone number is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(|e| CliError::interactive(format!("Input failed: {e}")))?;

        Ok(phone.trim().to_string())
    }

    /// Confirm a destructive action; `assume_yes` skips the prompt
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<()> {
        if assume_yes {
            return Ok(());
        }
        if !self.interactive {
            return Err(CliError::interactive(
                "Refusing to continue without confirmation; pass --yes",
            ));
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| CliError::interactive(format!("Confirmation failed: {e}")))?;

        if confirmed {
            Ok(())
        } else {
            Err(CliError::interactive("Cancelled"))
        }
    }
}
