//! ---
//! agri_section: "03-session-persistence"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Durable client storage and session handling."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Session persistence for the AgriSmart client.
//!
//! [`ClientStorage`] is the durable key-value store standing in for the
//! browser's local storage; [`SessionStore`] owns the authenticated session
//! (token plus user record) on top of it and keeps the role resolver in
//! sync with the session's backend role.

pub mod storage;
pub mod store;

pub use storage::{ClientStorage, StorageError, ROLE_KEY, TOKEN_KEY, USER_KEY};
pub use store::{SessionStore, StoredUser, UserPatch};
