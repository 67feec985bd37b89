//! Client-level error types shared across the session, transport, and listing layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// None of these are retried internally; retry and backoff are left to the caller.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller supplied an empty or unknown input.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Token endpoint failure or an unusable session.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Content endpoint answered with a non-2xx status.
	#[error("Content endpoint returned HTTP status {status}.")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Content endpoint response could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Caller-side input problems, detected before any network traffic.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Client identifier is empty.
	#[error("Client identifier must not be empty.")]
	EmptyClientId,
	/// Client secret is empty.
	#[error("Client secret must not be empty.")]
	EmptyClientSecret,
	/// User agent is empty.
	#[error("User agent must not be empty.")]
	EmptyUserAgent,
	/// Subreddit name is empty.
	#[error("Subreddit must not be empty.")]
	EmptySubreddit,
	/// Author name is empty.
	#[error("Author must not be empty.")]
	EmptyAuthor,
	/// Sort value is not one of the recognized popularity sorts.
	#[error("Unknown popularity sort `{value}`.")]
	UnknownSort {
		/// Rejected input.
		value: String,
	},
	/// Age value is not one of the recognized time windows.
	#[error("Unknown age window `{value}`.")]
	UnknownAge {
		/// Rejected input.
		value: String,
	},
	/// Region value is not one of the recognized geography codes.
	#[error("Unknown region `{value}`.")]
	UnknownRegion {
		/// Rejected input.
		value: String,
	},
}

/// Token endpoint and session lifecycle failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered with a status outside 200-299.
	#[error("Token endpoint rejected the grant with HTTP status {status}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// OAuth `error`/`error_description` payload, when the provider sent one.
		reason: Option<String>,
	},
	/// Token endpoint answered with something other than JSON.
	#[error("Token endpoint returned an unexpected content type: {content_type:?}.")]
	UnexpectedContentType {
		/// Media type reported by the server, if any.
		content_type: Option<String>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned a response the OAuth client could not interpret.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Description of the failure.
		message: String,
	},
	/// Token response parsed but carried an empty access token.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// Token response exceeded the body cap.
	#[error("Token endpoint response exceeds the {limit} byte limit.")]
	BodyTooLarge {
		/// Configured cap in bytes.
		limit: usize,
	},
	/// Token is expiring and no refresh token is available; the session cannot recover.
	#[error("Token expired and no refresh token is available.")]
	NoRefreshToken,
	/// No token has been obtained yet.
	#[error("Session has not logged in.")]
	NotAuthenticated,
}

/// Content endpoint payload failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Content type was missing or not `application/json`.
	#[error("Content endpoint returned an unexpected content type: {content_type:?}.")]
	UnexpectedContentType {
		/// Media type reported by the server, if any.
		content_type: Option<String>,
	},
	/// Body could not be decompressed.
	#[error("Content endpoint body could not be decompressed.")]
	TransportFailure {
		/// Underlying decoder failure.
		#[source]
		source: std::io::Error,
	},
	/// Body is not the expected JSON shape.
	#[error("Content endpoint returned malformed JSON.")]
	MalformedPayload {
		/// Structured parsing failure carrying the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Body exceeded the cap, either on the wire or after decompression.
	#[error("Content endpoint body exceeds the {limit} byte limit.")]
	BodyTooLarge {
		/// Configured cap in bytes.
		limit: usize,
	},
}

/// Configuration and validation failures raised while wiring the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL is invalid.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The API base URL cannot carry path segments.
	#[error("API base URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// A header value contains characters HTTP does not allow.
	#[error("Header `{header}` has an invalid value.")]
	InvalidHeaderValue {
		/// Header name.
		header: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Which endpoint was being called.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling {endpoint}: {message}.")]
	Other {
		/// Which endpoint was being called.
		endpoint: &'static str,
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}
