//! Client configuration: endpoints, throttle, token safety margin, paging, and body limits.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default identity endpoint for the client-credentials and refresh grants.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://www.reddit.com/api/v1/access_token";
/// Default base URL of the OAuth content API.
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
/// Largest page the listing endpoints serve.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Default cap applied to response bodies (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;
/// Default margin before expiry at which a token is refreshed.
pub const DEFAULT_SAFETY_MARGIN: StdDuration = StdDuration::from_secs(5);

/// Settings applied when a [`RedditClient`](crate::client::RedditClient) connects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Token endpoint override; `None` uses [`DEFAULT_TOKEN_ENDPOINT`].
	pub token_endpoint: Option<Url>,
	/// Content API base override; `None` uses [`DEFAULT_API_BASE`].
	pub api_base: Option<Url>,
	/// Minimum interval between outbound requests; `None` or zero disables throttling.
	pub throttle: Option<StdDuration>,
	/// Margin before expiry at which the token counts as expiring.
	pub safety_margin: StdDuration,
	/// Records requested per page during multi-page fetches (clamped to 1..=100).
	pub page_size: u32,
	/// Cap applied to token and content response bodies.
	pub max_body_bytes: usize,
}
impl ClientConfig {
	/// Overrides the token endpoint.
	pub fn with_token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the content API base.
	pub fn with_api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Sets the minimum interval between requests; zero disables throttling.
	pub fn with_throttle(mut self, interval: StdDuration) -> Self {
		self.throttle = (!interval.is_zero()).then_some(interval);

		self
	}

	/// Sets the token safety margin.
	pub fn with_safety_margin(mut self, margin: StdDuration) -> Self {
		self.safety_margin = margin;

		self
	}

	/// Sets the page size used by multi-page fetches.
	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;

		self
	}

	/// Sets the response body cap.
	pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
		self.max_body_bytes = limit;

		self
	}

	/// Resolved token endpoint.
	pub fn token_endpoint_url(&self) -> Result<Url, ConfigError> {
		match &self.token_endpoint {
			Some(url) => Ok(url.clone()),
			None => Url::parse(DEFAULT_TOKEN_ENDPOINT)
				.map_err(|source| ConfigError::InvalidEndpoint { source }),
		}
	}

	/// Resolved content API base; must be able to carry path segments.
	pub fn api_base_url(&self) -> Result<Url, ConfigError> {
		let url = match &self.api_base {
			Some(url) => url.clone(),
			None => Url::parse(DEFAULT_API_BASE)
				.map_err(|source| ConfigError::InvalidEndpoint { source })?,
		};

		if url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: url.to_string() });
		}

		Ok(url)
	}

	/// Page size clamped to the range the listing endpoints accept.
	pub fn page_size(&self) -> u32 {
		self.page_size.clamp(1, MAX_PAGE_SIZE)
	}

	/// Safety margin as a signed duration, saturating on overflow.
	pub fn safety_margin(&self) -> Duration {
		Duration::try_from(self.safety_margin).unwrap_or(Duration::MAX)
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			token_endpoint: None,
			api_base: None,
			throttle: None,
			safety_margin: DEFAULT_SAFETY_MARGIN,
			page_size: MAX_PAGE_SIZE,
			max_body_bytes: DEFAULT_MAX_BODY_BYTES,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_resolve_to_reddit_endpoints() {
		let config = ClientConfig::default();

		assert_eq!(
			config.token_endpoint_url().expect("Default token endpoint should parse.").as_str(),
			DEFAULT_TOKEN_ENDPOINT
		);
		assert_eq!(
			config.api_base_url().expect("Default API base should parse.").host_str(),
			Some("oauth.reddit.com")
		);
		assert_eq!(config.safety_margin(), Duration::seconds(5));
		assert_eq!(config.page_size(), 100);
		assert_eq!(config.max_body_bytes, 1 << 20);
	}

	#[test]
	fn zero_throttle_disables_and_page_size_clamps() {
		let config = ClientConfig::default().with_throttle(StdDuration::ZERO).with_page_size(500);

		assert_eq!(config.throttle, None);
		assert_eq!(config.page_size(), 100);
		assert_eq!(config.with_page_size(0).page_size(), 1);
	}

	#[test]
	fn api_base_must_carry_paths() {
		let config = ClientConfig::default()
			.with_api_base(Url::parse("mailto:someone@example.com").expect("URL should parse."));

		assert!(matches!(config.api_base_url(), Err(ConfigError::CannotBeABase { .. })));
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"page_size":25,"throttle":{"secs":2,"nanos":0}}"#)
				.expect("Partial config should deserialize.");

		assert_eq!(config.page_size(), 25);
		assert_eq!(config.throttle, Some(StdDuration::from_secs(2)));
		assert_eq!(config.safety_margin, DEFAULT_SAFETY_MARGIN);
	}
}
