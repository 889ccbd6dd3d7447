//! Text menus for the two record keepers.
//!
//! Both shells run on a [`Console`], which is generic over its reader and
//! writer so whole sessions can be scripted. Every failure except a broken
//! console is printed and the menu comes back.

pub mod bank;
pub mod employees;

use crate::features::{AccountError, EmployeeError};
use rust_decimal::prelude::*;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Input the shell could not make sense of.
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Invalid option.")]
    UnknownOption,

    #[error("Invalid option. Please enter a number from the menu.")]
    UnknownMenuNumber,

    #[error("Invalid choice.")]
    UnknownChoice,

    #[error("Invalid amount.")]
    InvalidAmount,

    #[error("Invalid account number.")]
    InvalidAccountNumber,

    #[error("Invalid ID.")]
    InvalidId,

    #[error("Invalid salary.")]
    InvalidSalary,

    #[error("Invalid number.")]
    InvalidNumber,
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Employee(#[from] EmployeeError),

    #[error("Not found.")]
    NotFound,

    #[error("{action} failed: {source}")]
    Rejected {
        action: &'static str,
        source: AccountError,
    },

    #[error("console unavailable: {0}")]
    Io(#[from] io::Error),
}

pub type ShellResult<T = ()> = Result<T, ShellError>;

/// Line-oriented prompt/response channel.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `label` without a newline and reads one trimmed line.
    /// `None` once the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Like [`Console::prompt`], but end of input reads as a blank line.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints a failed operation and hands control back to the menu.
    /// Only console errors escape.
    fn settle(&mut self, outcome: ShellResult) -> anyhow::Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(ShellError::Io(e)) => Err(e.into()),
            Err(e) => {
                warn!("{e}");
                self.say(&e)?;
                Ok(())
            }
        }
    }
}

/// Blank means zero; negatives are refused.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Decimal::ZERO);
    }
    match Decimal::from_str(input) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(InputError::InvalidAmount),
    }
}

pub(crate) fn parse_salary(input: &str) -> Result<Decimal, InputError> {
    Decimal::from_str(input.trim()).map_err(|_| InputError::InvalidSalary)
}

pub(crate) fn parse_number<T: FromStr>(input: &str, invalid: InputError) -> Result<T, InputError> {
    input.trim().parse().map_err(|_| invalid)
}
