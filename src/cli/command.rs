use clap::{Parser, ValueEnum};

use crate::prelude::{AppError, EmptyQuery};

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Simple in-memory phonebook")]
pub struct Cli {
    /// What an empty search returns (all contacts or none)
    #[arg(long, env = "PHONEBOOK_EMPTY_QUERY", value_enum, default_value_t = EmptyQueryArg::All)]
    pub empty_query: EmptyQueryArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmptyQueryArg {
    All,
    None,
}

impl From<EmptyQueryArg> for EmptyQuery {
    fn from(arg: EmptyQueryArg) -> Self {
        match arg {
            EmptyQueryArg::All => EmptyQuery::All,
            EmptyQueryArg::None => EmptyQuery::None,
        }
    }
}

/// Entries of the session menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddContact,
    ListContacts,
    SearchContacts,
    DeleteContact,
    Exit,
}

impl MenuCommand {
    pub const MENU: [(&'static str, &'static str); 5] = [
        ("1", "Add Contact"),
        ("2", "List Contacts"),
        ("3", "Search Contacts"),
        ("4", "Delete Contact"),
        ("5", "Exit"),
    ];

    pub fn parse(action: &str) -> Result<Self, AppError> {
        match action.trim() {
            "1" => Ok(MenuCommand::AddContact),
            "2" => Ok(MenuCommand::ListContacts),
            "3" => Ok(MenuCommand::SearchContacts),
            "4" => Ok(MenuCommand::DeleteContact),
            "5" => Ok(MenuCommand::Exit),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}
