use crate::prelude::Contact;

/// What `search("")` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyQuery {
    /// Every contact, unfiltered.
    #[default]
    All,
    /// Nothing.
    None,
}

/// Case-insensitive substring test against the contact's name or number.
///
/// `folded_query` must already be lowercased.
pub fn matches(contact: &Contact, folded_query: &str) -> bool {
    contact.name().to_lowercase().contains(folded_query)
        || contact.number().to_lowercase().contains(folded_query)
}

pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    query: &str,
    empty_query: EmptyQuery,
) -> Vec<&'a Contact> {
    if query.is_empty() {
        return match empty_query {
            EmptyQuery::All => contacts.iter().collect(),
            EmptyQuery::None => Vec::new(),
        };
    }

    let folded_query = query.to_lowercase();

    contacts
        .iter()
        .filter(|&contact| matches(contact, &folded_query))
        .collect()
}
