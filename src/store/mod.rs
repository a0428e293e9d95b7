//! Account preference store.
//!
//! Account records live in an external preference store whose keys may not
//! contain `.`, so every lookup goes through a normalized [`AccountKey`].

mod account;
mod prefs;
mod traits;

pub use account::{AccountKey, AccountRecord, DOT_PLACEHOLDER};
pub use prefs::PrefsStore;
pub use traits::AccountStore;
