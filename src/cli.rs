pub mod command;
pub mod run;

pub use run::run_app;

use std::io::{BufRead, Write};

use crate::prelude::{AppError, Contact};
use command::MenuCommand;

/// Line-oriented terminal I/O for the session.
///
/// Reads return `None` once the input is exhausted.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // OUTPUT FUNCTIONS
    pub fn say(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn show_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output)?;
        for (key, label) in MenuCommand::MENU {
            writeln!(self.output, "{key}. {label}")?;
        }
        self.caret()
    }

    pub fn confirm_action(&mut self, action: &str) -> Result<(), AppError> {
        writeln!(self.output, "\nAre you sure you want to {action}\n? (y/n)")?;
        self.caret()
    }

    pub fn list_contacts(&mut self, contacts: &[&Contact]) -> Result<(), AppError> {
        if contacts.is_empty() {
            return self.say("No contacts found.");
        }

        for (i, contact) in contacts.iter().enumerate() {
            writeln!(self.output, "\n{}", display_contact(i + 1, contact))?;
        }
        Ok(())
    }

    fn caret(&mut self) -> Result<(), AppError> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    // INPUT FUNCTIONS
    pub fn get_input(&mut self) -> Result<Option<String>, AppError> {
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn get_input_to_lower(&mut self) -> Result<Option<String>, AppError> {
        Ok(self.get_input()?.map(|input| input.trim().to_lowercase()))
    }

    /// Prints `question` and reads one answer.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>, AppError> {
        writeln!(self.output, "\n{question}\n* to go back: ")?;
        self.caret()?;
        self.get_input()
    }
}

pub fn display_contact(position: usize, contact: &Contact) -> String {
    format!(
        "{position:>3}. Name: {}\n     Number: {}",
        contact.name(),
        contact.number()
    )
}
