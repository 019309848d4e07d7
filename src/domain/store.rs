use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::search::{self, EmptyQuery};
use crate::prelude::Contact;

/// What happened to the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<'a> {
    Added(&'a Contact),
    Removed(&'a [Contact]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change<'_>, &[Contact])>;

struct Listener {
    id: SubscriptionId,
    callback: Callback,
}

/// The in-memory list of contacts.
///
/// Contacts keep insertion order. The list can only change through
/// [`ContactStore::add`], [`ContactStore::remove`] and
/// [`ContactStore::remove_by_id`]; every change that actually alters the
/// list is reported to the registered listeners, in registration order,
/// after it has been applied.
#[derive(Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    listeners: Vec<Listener>,
    next_subscription: u64,
    empty_query: EmptyQuery,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_query(empty_query: EmptyQuery) -> Self {
        Self {
            empty_query,
            ..Self::default()
        }
    }

    pub fn empty_query(&self) -> EmptyQuery {
        self.empty_query
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    pub fn add(&mut self, name: impl Into<String>, number: impl Into<String>) -> Contact {
        let contact = Contact::new(name, number);
        self.contacts.push(contact.clone());

        debug!(id = %contact.id(), total = self.contacts.len(), "contact added");
        notify(
            &mut self.listeners,
            &Change::Added(&contact),
            &self.contacts,
        );

        contact
    }

    /// Removes every stored contact equal to `contact` (id, name and number).
    ///
    /// Returns `false` and leaves the list untouched when nothing matches.
    pub fn remove(&mut self, contact: &Contact) -> bool {
        let mut removed = Vec::new();
        self.contacts.retain(|c| {
            if c == contact {
                removed.push(c.clone());
                false
            } else {
                true
            }
        });

        self.after_removal(&removed)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Option<Contact> {
        let position = self.contacts.iter().position(|c| c.id() == id)?;
        let removed = self.contacts.remove(position);

        self.after_removal(std::slice::from_ref(&removed));
        Some(removed)
    }

    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let found = search::filter_contacts(&self.contacts, query, self.empty_query);
        trace!(query, found = found.len(), "searched contacts");
        found
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Change<'_>, &[Contact]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push(Listener {
            id,
            callback: Box::new(callback),
        });

        debug!(subscription = id.0, "listener registered");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);

        let dropped = self.listeners.len() != before;
        if dropped {
            debug!(subscription = id.0, "listener dropped");
        }
        dropped
    }

    fn after_removal(&mut self, removed: &[Contact]) -> bool {
        if removed.is_empty() {
            trace!("remove matched nothing");
            return false;
        }

        debug!(
            removed = removed.len(),
            total = self.contacts.len(),
            "contact removed"
        );
        notify(
            &mut self.listeners,
            &Change::Removed(removed),
            &self.contacts,
        );
        true
    }
}

fn notify(listeners: &mut [Listener], change: &Change<'_>, contacts: &[Contact]) {
    for listener in listeners.iter_mut() {
        (listener.callback)(change, contacts);
    }
}
