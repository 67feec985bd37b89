//! Validated application credentials.

// self
use crate::{_prelude::*, auth::token::secret::Secret, error::ValidationError};

/// Application credentials used for every grant and content request.
#[derive(Clone)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
	user_agent: String,
}
impl Credentials {
	/// Validates and wraps the credential triple; every field must be non-empty.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		user_agent: impl Into<String>,
	) -> Result<Self, ValidationError> {
		let client_id = client_id.into();
		let client_secret = Secret::new(client_secret);
		let user_agent = user_agent.into();

		if client_id.is_empty() {
			return Err(ValidationError::EmptyClientId);
		}
		if client_secret.is_empty() {
			return Err(ValidationError::EmptyClientSecret);
		}
		if user_agent.is_empty() {
			return Err(ValidationError::EmptyUserAgent);
		}

		Ok(Self { client_id, client_secret, user_agent })
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}

	/// User-Agent sent with every request.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("user_agent", &self.user_agent)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_fields_are_rejected_in_order() {
		assert_eq!(Credentials::new("", "", "").unwrap_err(), ValidationError::EmptyClientId);
		assert_eq!(Credentials::new("id", "", "").unwrap_err(), ValidationError::EmptyClientSecret);
		assert_eq!(Credentials::new("id", "secret", "").unwrap_err(), ValidationError::EmptyUserAgent);
	}

	#[test]
	fn debug_output_hides_secret() {
		let credentials =
			Credentials::new("id", "top-secret", "agent/1.0").expect("Credentials should validate.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("agent/1.0"));
		assert!(!rendered.contains("top-secret"));
		assert_eq!(credentials.client_secret().expose(), "top-secret");
	}
}
