// Signup and login against the flat-file credential store.
// Login only verifies credentials; no session or token is issued.

pub mod handlers;
pub mod store;
