//! Prompt Module
//! Line-based prompts that re-ask until the answer is one of the allowed options.
//!
//! Answers are trimmed of surrounding whitespace and lower-cased before the
//! exact match, so `" Monday "` selects `monday`.

use crate::config::title_case;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Input closed before a valid option was entered")]
    InputClosed,
}

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for everything printed during the session.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Next answer, trimmed and lower-cased. `None` at end of input.
    fn read_answer(&mut self) -> Result<Option<String>, PromptError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Ask for one of `options` until a valid one is typed.
    pub fn choose(&mut self, label: &str, options: &[&str]) -> Result<String, PromptError> {
        let listing = options
            .iter()
            .map(|o| title_case(o))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            self.output,
            "\nWhich specific {label} would you like to view statistics on?\nYour options are: {listing}."
        )?;

        loop {
            let Some(answer) = self.read_answer()? else {
                return Err(PromptError::InputClosed);
            };

            if options.contains(&answer.as_str()) {
                writeln!(self.output, "You selected {label}: {}", title_case(&answer))?;
                return Ok(answer);
            }

            tracing::debug!("Rejected {} answer {:?}", label, answer);
            writeln!(
                self.output,
                "\nOops. That's not one of the options.\nYour options are: {listing}."
            )?;
        }
    }

    /// Ask a yes/no question. Only `yes` counts as agreement; end of input counts as no.
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        writeln!(self.output, "\n{question} Enter yes or no.")?;
        Ok(self.read_answer()?.as_deref() == Some("yes"))
    }
}
