//! Session token store: the current access token plus the optional session cookie.

// self
use crate::{_prelude::*, auth::token::record::AccessToken};

/// Lifecycle status of a session's token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// No token has been obtained yet.
	Unauthenticated,
	/// Token is usable beyond the safety margin.
	Valid,
	/// Token is inside the safety margin and a refresh token is available.
	Expiring,
	/// Token is inside the safety margin and cannot be refreshed.
	Unrefreshable,
}

/// Cookie captured from the token endpoint and replayed on content API calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie {
	/// Cookie name.
	pub name: String,
	/// Cookie value.
	pub value: String,
}
impl SessionCookie {
	/// Name of the load-balancer cookie Reddit sets on token responses.
	pub const EDGEBUCKET: &'static str = "edgebucket";

	/// Creates a cookie from its name and value.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}

	/// Parses the `name=value` pair at the front of a `Set-Cookie` header value.
	pub fn parse_set_cookie(header: &str) -> Option<Self> {
		let pair = header.split(';').next()?;
		let (name, value) = pair.split_once('=')?;
		let name = name.trim();

		if name.is_empty() {
			return None;
		}

		Some(Self::new(name, value.trim()))
	}

	/// Finds the [`Self::EDGEBUCKET`] cookie among `Set-Cookie` header values.
	pub fn find_edgebucket<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
		headers
			.into_iter()
			.filter_map(Self::parse_set_cookie)
			.find(|cookie| cookie.name == Self::EDGEBUCKET)
	}

	/// Renders the cookie as a `Cookie` request header value.
	pub fn header_value(&self) -> String {
		format!("{}={}", self.name, self.value)
	}
}

/// Token and cookie owned by one session.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
	token: Option<AccessToken>,
	cookie: Option<SessionCookie>,
}
impl TokenStore {
	/// Replaces both the token and the cookie; a missing cookie clears the previous one.
	pub fn replace(&mut self, token: AccessToken, cookie: Option<SessionCookie>) {
		self.token = Some(token);
		self.cookie = cookie;
	}

	/// Current token, if the session has logged in.
	pub fn token(&self) -> Option<&AccessToken> {
		self.token.as_ref()
	}

	/// Current session cookie, if the token endpoint set one.
	pub fn cookie(&self) -> Option<&SessionCookie> {
		self.cookie.as_ref()
	}

	/// Refresh secret of the current token, if any.
	pub fn refresh_token(&self) -> Option<&str> {
		self.token.as_ref()?.refresh_token.as_ref().map(|secret| secret.expose())
	}

	/// Computes the lifecycle status at `instant` with the given safety margin.
	pub fn status_at(&self, instant: OffsetDateTime, margin: Duration) -> TokenStatus {
		let Some(token) = self.token.as_ref() else {
			return TokenStatus::Unauthenticated;
		};

		if !token.is_expiring_at(instant, margin) {
			TokenStatus::Valid
		} else if token.refresh_token.is_some() {
			TokenStatus::Expiring
		} else {
			TokenStatus::Unrefreshable
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn token(refresh: Option<&str>) -> AccessToken {
		let mut builder = AccessToken::builder()
			.access_token("access")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::hours(1));

		if let Some(refresh) = refresh {
			builder = builder.refresh_token(refresh);
		}

		builder.build().expect("Token fixture should build.")
	}

	#[test]
	fn status_walks_the_token_lifecycle() {
		let margin = Duration::seconds(5);
		let early = macros::datetime!(2025-01-01 00:30 UTC);
		let late = macros::datetime!(2025-01-01 00:59:56 UTC);
		let mut store = TokenStore::default();

		assert_eq!(store.status_at(early, margin), TokenStatus::Unauthenticated);

		store.replace(token(Some("refresh")), None);

		assert_eq!(store.status_at(early, margin), TokenStatus::Valid);
		assert_eq!(store.status_at(late, margin), TokenStatus::Expiring);

		store.replace(token(None), None);

		assert_eq!(store.status_at(late, margin), TokenStatus::Unrefreshable);
	}

	#[test]
	fn replace_swaps_cookie_wholesale() {
		let mut store = TokenStore::default();

		store.replace(token(None), Some(SessionCookie::new("edgebucket", "abc")));

		assert_eq!(store.cookie().map(|cookie| cookie.value.as_str()), Some("abc"));

		store.replace(token(None), None);

		assert!(store.cookie().is_none());
	}

	#[test]
	fn edgebucket_is_found_among_set_cookie_headers() {
		let cookie = SessionCookie::find_edgebucket([
			"session_tracker=xyz; Domain=reddit.com; Path=/",
			"edgebucket=Qe8GdQ; Domain=reddit.com; Max-Age=63071999; Path=/;  secure",
		])
		.expect("edgebucket cookie should be found.");

		assert_eq!(cookie, SessionCookie::new("edgebucket", "Qe8GdQ"));
		assert_eq!(cookie.header_value(), "edgebucket=Qe8GdQ");
		assert!(SessionCookie::find_edgebucket(["other=1"]).is_none());
		assert!(SessionCookie::parse_set_cookie("=novalue").is_none());
	}
}
