//! Interactive prompts for values not given on the command line.
//!
//! The prompter re-asks until it gets a usable answer and only fails when the
//! input stream closes or an I/O error occurs.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use tax_core::FilingStatusCode;
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_decimal;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before a value was entered")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    fn read_line(
        &mut self,
        prompt: &str,
    ) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Asks for a non-negative dollar amount. Empty input counts as zero.
    pub fn amount(
        &mut self,
        prompt: &str,
    ) -> Result<Decimal, PromptError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_decimal(&line) {
                Ok(amount) if amount >= Decimal::ZERO => return Ok(amount),
                Ok(_) => writeln!(self.output, "Amount must not be negative.")?,
                Err(e) => {
                    debug!(input = %line, "rejected amount");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    /// Shows the filing status menu and asks for 1 or 2.
    pub fn filing_status(&mut self) -> Result<FilingStatusCode, PromptError> {
        writeln!(self.output, "Select your filing status:")?;
        for status in FilingStatusCode::ALL {
            writeln!(self.output, "{}. {}", status.id(), status.label())?;
        }

        loop {
            let line = self.read_line("Enter 1 for Single or 2 for Married: ")?;
            let choice = line.parse::<i32>().ok().map(FilingStatusCode::from_id);
            match choice {
                Some(Ok(status)) => return Ok(status),
                Some(Err(e)) => writeln!(self.output, "{e}; please enter 1 or 2.")?,
                None => writeln!(self.output, "Please enter 1 or 2.")?,
            }
        }
    }
}
