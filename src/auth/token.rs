//! Token secrets, issued access tokens, and the per-session token store.

pub mod record;
pub mod secret;
pub mod store;
