pub mod contact;
pub mod search;
pub mod store;

pub use contact::Contact;
pub use search::EmptyQuery;
pub use store::{Change, ContactStore, SubscriptionId};
