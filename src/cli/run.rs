use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use clap::Parser;
use dotenv::dotenv;
use tracing::{debug, info, warn};

use crate::{
    cli::Prompt,
    prelude::{
        AppError, Contact, ContactStore,
        command::{Cli, MenuCommand},
    },
    validation::{NAME_REQ, NUMBER_REQ, validate_name, validate_number},
};

pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    let store = ContactStore::with_empty_query(cli.empty_query.into());
    debug!(empty_query = ?store.empty_query(), "store created");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, Prompt::new(stdin.lock(), stdout.lock()));

    session.run()
}

enum Flow {
    Continue,
    Exit,
}

enum Reply {
    Text(String),
    Back,
    Closed,
}

/// The menu loop over a [`ContactStore`].
///
/// The session never reads the store's change events directly: a listener
/// flips `changed`, and the loop re-renders the summary once per command.
pub struct Session<R, W> {
    store: ContactStore,
    prompt: Prompt<R, W>,
    changed: Rc<Cell<bool>>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(mut store: ContactStore, prompt: Prompt<R, W>) -> Self {
        let changed = Rc::new(Cell::new(false));

        let flag = Rc::clone(&changed);
        store.subscribe(move |_, contacts| {
            debug!(total = contacts.len(), "contact list changed");
            flag.set(true);
        });

        Session {
            store,
            prompt,
            changed,
        }
    }

    pub fn into_parts(self) -> (ContactStore, W) {
        (self.store, self.prompt.into_output())
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        info!("session started");
        self.prompt.say("\n--- PHONEBOOK ---")?;

        loop {
            self.prompt.show_menu()?;

            let Some(action) = self.prompt.get_input()? else {
                break;
            };

            match MenuCommand::parse(&action).and_then(|command| self.dispatch(command)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "input rejected");
                    self.prompt.say(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }

            self.render_if_changed()?;
        }

        self.prompt.say("\nBye!")?;
        info!(contacts = self.store.len(), "session ended");
        Ok(())
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<Flow, AppError> {
        match command {
            MenuCommand::AddContact => self.add_contact(),
            MenuCommand::ListContacts => {
                let contacts: Vec<&Contact> = self.store.contacts().iter().collect();
                self.prompt.list_contacts(&contacts)?;
                Ok(Flow::Continue)
            }
            MenuCommand::SearchContacts => self.search_contacts(),
            MenuCommand::DeleteContact => self.delete_contact(),
            MenuCommand::Exit => Ok(Flow::Exit),
        }
    }

    fn add_contact(&mut self) -> Result<Flow, AppError> {
        let name = match self.ask_until("Enter contact name", validate_name, NAME_REQ)? {
            Reply::Text(name) => name,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };

        let number = match self.ask_until("Enter contact number", validate_number, NUMBER_REQ)? {
            Reply::Text(number) => number,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };

        self.store.add(name, number);
        self.prompt.say("Contact added successfully!")?;
        Ok(Flow::Continue)
    }

    fn search_contacts(&mut self) -> Result<Flow, AppError> {
        let query = match self.ask("Search by name or number")? {
            Reply::Text(query) => query,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };

        let found = self.store.search(&query);
        self.prompt.list_contacts(&found)?;
        Ok(Flow::Continue)
    }

    fn delete_contact(&mut self) -> Result<Flow, AppError> {
        let query = match self.ask("Search contact to DELETE by name or number")? {
            Reply::Text(query) => query,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };

        let found: Vec<Contact> = self.store.search(&query).into_iter().cloned().collect();
        if found.is_empty() {
            self.prompt.say("No contacts found.")?;
            return Ok(Flow::Continue);
        }
        self.prompt.list_contacts(&found.iter().collect::<Vec<_>>())?;

        let selection = match self.ask("Enter the number of the contact to delete")? {
            Reply::Text(selection) => selection,
            Reply::Back => return Ok(Flow::Continue),
            Reply::Closed => return Ok(Flow::Exit),
        };
        let position = selection.trim().parse::<usize>()?;

        let contact = position
            .checked_sub(1)
            .and_then(|i| found.get(i))
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        self.prompt
            .confirm_action(&format!("delete this contact from your phonebook\n{contact}"))?;
        let Some(consent) = self.prompt.get_input_to_lower()? else {
            return Ok(Flow::Exit);
        };
        if consent != "y" {
            self.prompt.say("Delete cancelled.")?;
            return Ok(Flow::Continue);
        }

        self.store.remove(contact);
        self.prompt.say("Contact deleted successfully!")?;
        Ok(Flow::Continue)
    }

    fn ask(&mut self, question: &str) -> Result<Reply, AppError> {
        Ok(match self.prompt.ask(question)? {
            None => Reply::Closed,
            Some(input) if input.trim() == "*" => Reply::Back,
            Some(input) => Reply::Text(input),
        })
    }

    fn ask_until(
        &mut self,
        question: &str,
        valid: fn(&str) -> bool,
        requirement: &str,
    ) -> Result<Reply, AppError> {
        loop {
            match self.ask(question)? {
                Reply::Text(input) if !valid(&input) => {
                    let err = AppError::Validation(requirement.to_string());
                    warn!(error = %err, "input rejected");
                    self.prompt.say(&err.to_string())?;
                }
                reply => return Ok(reply),
            }
        }
    }

    fn render_if_changed(&mut self) -> Result<(), AppError> {
        if self.changed.replace(false) {
            let total = self.store.len();
            self.prompt
                .say(&format!("Phonebook now holds {total} contact(s)."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::prelude::EmptyQuery;

    use super::*;

    fn run_session(store: ContactStore, input: &str) -> Result<(ContactStore, String), AppError> {
        let prompt = Prompt::new(Cursor::new(input.to_string()), Vec::new());
        let mut session = Session::new(store, prompt);
        session.run()?;

        let (store, output) = session.into_parts();
        Ok((store, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn adds_and_lists_contact() -> Result<(), AppError> {
        let (store, output) = run_session(ContactStore::new(), "1\nAlice\n555-1000\n2\n5\n")?;

        assert_eq!(store.len(), 1);
        assert!(output.contains("Contact added successfully!"));
        assert!(output.contains("Phonebook now holds 1 contact(s)."));
        assert!(output.contains("1. Name: Alice"));
        assert!(output.trim_end().ends_with("Bye!"));
        Ok(())
    }

    #[test]
    fn blank_name_is_asked_again() -> Result<(), AppError> {
        let (store, output) = run_session(ContactStore::new(), "1\n   \nBob\n555-2000\n5\n")?;

        assert!(output.contains("Validation failed: Name must not be empty"));
        assert_eq!(store.contacts()[0].name(), "Bob");
        Ok(())
    }

    #[test]
    fn star_goes_back_without_adding() -> Result<(), AppError> {
        let (store, output) = run_session(ContactStore::new(), "1\nAlice\n*\n5\n")?;

        assert!(store.is_empty());
        assert!(!output.contains("Contact added successfully!"));
        Ok(())
    }

    #[test]
    fn search_filters_case_insensitively() -> Result<(), AppError> {
        let mut store = ContactStore::new();
        store.add("Alice", "555-1000");
        store.add("Bob", "555-2000");

        let (_, output) = run_session(store, "3\nBOB\n5\n")?;

        assert!(output.contains("1. Name: Bob"));
        assert!(!output.contains("Name: Alice"));
        Ok(())
    }

    #[test]
    fn empty_search_follows_store_policy() -> Result<(), AppError> {
        let mut store = ContactStore::with_empty_query(EmptyQuery::None);
        store.add("Alice", "555-1000");

        let (_, output) = run_session(store, "3\n\n5\n")?;

        assert!(output.contains("No contacts found."));
        Ok(())
    }

    #[test]
    fn delete_requires_confirmation() -> Result<(), AppError> {
        let mut store = ContactStore::new();
        store.add("Ann", "111");
        store.add("Anna", "222");

        let (store, output) = run_session(store, "4\nann\n2\nn\n4\nann\n2\ny\n5\n")?;

        assert!(output.contains("Delete cancelled."));
        assert!(output.contains("Contact deleted successfully!"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.contacts()[0].name(), "Ann");
        Ok(())
    }

    #[test]
    fn bad_selection_is_reported() -> Result<(), AppError> {
        let mut store = ContactStore::new();
        store.add("Alice", "555-1000");

        let (store, output) = run_session(store, "4\nalice\n7\n4\nalice\nfirst\n5\n")?;

        assert!(output.contains("Contact Not found"));
        assert!(output.contains("Invalid number format"));
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_command_keeps_session_alive() -> Result<(), AppError> {
        let (_, output) = run_session(ContactStore::new(), "9\n2\n5\n")?;

        assert!(output.contains("Unrecognized command: '9'"));
        assert!(output.contains("No contacts found."));
        Ok(())
    }

    #[test]
    fn typed_text_reaches_store_unchanged() -> Result<(), AppError> {
        let mut store = ContactStore::new();
        store.add("Ann Lee", "111");
        store.add("Bob", "222");

        let (store, output) = run_session(store, "1\n  Zed  \n 9 \n3\n \n5\n")?;

        let zed = &store.contacts()[2];
        assert_eq!(zed.name(), "  Zed  ");
        assert_eq!(zed.number(), " 9 ");

        // a single space is a real query, not the empty one
        let results = output
            .rsplit_once("Search by name or number")
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        assert!(results.contains("Name: Ann Lee"));
        assert!(results.contains("Name:   Zed  "));
        assert!(!results.contains("Name: Bob"));
        Ok(())
    }

    #[test]
    fn end_of_input_ends_session() -> Result<(), AppError> {
        let (store, output) = run_session(ContactStore::new(), "1\nAlice\n")?;

        assert!(store.is_empty());
        assert!(output.trim_end().ends_with("Bye!"));
        Ok(())
    }
}
