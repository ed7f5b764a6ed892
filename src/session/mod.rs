//! Client-Side Session Management
//!
//! The active conversation, completed session records, and the store that
//! coordinates them with the relay and durable storage.

pub mod store;
pub mod types;

pub use store::SessionStore;
pub use types::{Role, SessionRecord, Turn};
