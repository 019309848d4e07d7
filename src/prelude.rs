pub use crate::cli::{command, run_app};
pub use crate::domain::{
    contact::{self, Contact},
    search::{EmptyQuery, filter_contacts},
    store::{self, Change, ContactStore, SubscriptionId},
};
pub use crate::errors::AppError;
