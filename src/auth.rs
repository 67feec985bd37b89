//! Credentials, token models, and the OAuth session that keeps them fresh.

pub mod credentials;
pub mod session;
pub mod token;

pub use credentials::*;
pub use session::*;
pub use token::{record::*, secret::*, store::*};
