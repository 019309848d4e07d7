use std::fmt;

use uuid::Uuid;

/// A name and phone number with an identifier fixed at creation.
///
/// Contacts are values: to change one, build a new record. Equality covers
/// the id as well as the text fields, so two contacts created with the same
/// name and number are still different contacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    id: Uuid,
    name: String,
    number: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Contact {
            id: Uuid::new_v4(),
            name: name.into(),
            number: number.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_id(id: Uuid, name: impl Into<String>, number: impl Into<String>) -> Self {
        Contact {
            id,
            name: name.into(),
            number: number.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}\nNumber: {}", self.name, self.number)
    }
}
