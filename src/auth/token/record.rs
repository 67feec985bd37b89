//! Issued access tokens and their builder.

// self
use crate::{_prelude::*, auth::token::secret::Secret, error::AuthError};

/// Access token issued by the identity endpoint.
///
/// Values are replaced wholesale on every (re)authentication; nothing mutates a token in place
/// except filling in a carried-over refresh token before it is stored.
#[derive(Clone)]
pub struct AccessToken {
	/// Bearer secret attached to content API calls.
	pub access_token: Secret,
	/// Token type reported by the provider (Reddit sends `bearer`).
	pub token_type: String,
	/// Refresh secret, if the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Instant the token response was processed.
	pub issued_at: OffsetDateTime,
	/// Instant the provider considers the token expired.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Returns a builder for a freshly issued token.
	pub fn builder() -> AccessTokenBuilder {
		AccessTokenBuilder::default()
	}

	/// Returns `true` once `instant + margin` reaches the expiry instant.
	pub fn is_expiring_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		instant + margin >= self.expires_at
	}

	/// Time left before expiry at the provided instant (negative once expired).
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`AccessToken`].
#[derive(Clone, Debug, Default)]
pub struct AccessTokenBuilder {
	access_token: Option<Secret>,
	token_type: Option<String>,
	refresh_token: Option<Secret>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl AccessTokenBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(Secret::new(token));

		self
	}

	/// Provides the token type label.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(token));

		self
	}

	/// Sets the issued-at instant (defaults to the current clock).
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets the lifetime relative to the issued-at instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces an [`AccessToken`].
	///
	/// A token without a lifetime expires at its issue instant, so the first guarded request
	/// treats it as expiring.
	pub fn build(self) -> Result<AccessToken, AuthError> {
		let access_token = self
			.access_token
			.filter(|secret| !secret.is_empty())
			.ok_or(AuthError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = issued_at + self.expires_in.unwrap_or(Duration::ZERO);

		Ok(AccessToken {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| "bearer".into()),
			refresh_token: self.refresh_token.filter(|secret| !secret.is_empty()),
			issued_at,
			expires_at,
		})
	}
}
