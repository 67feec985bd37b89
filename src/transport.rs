//! Authenticated GET against the content API with response validation and decoding.

// std
use std::io::Read;
// crates.io
use flate2::read::{GzDecoder, ZlibDecoder};
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		HeaderMap, HeaderValue, Method, Request,
		header::{
			ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONNECTION, CONTENT_ENCODING, CONTENT_TYPE,
			COOKIE, USER_AGENT,
		},
	},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenStore,
	error::{AuthError, ConfigError, DecodeError},
	http::{self, ResponseMetadataSlot, TokenHttpClient},
};

const ENDPOINT: &str = "content endpoint";

/// Signs, sends, and validates content API requests.
pub struct Transport<C>
where
	C: ?Sized + TokenHttpClient,
{
	http_client: Arc<C>,
	user_agent: HeaderValue,
	max_body_bytes: usize,
}
impl<C> Transport<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a transport sharing the session's HTTP client.
	pub fn new(
		http_client: impl Into<Arc<C>>,
		user_agent: &str,
		max_body_bytes: usize,
	) -> Result<Self, ConfigError> {
		let user_agent = HeaderValue::from_str(user_agent)
			.map_err(|_| ConfigError::InvalidHeaderValue { header: "user-agent" })?;

		Ok(Self { http_client: http_client.into(), user_agent, max_body_bytes })
	}

	/// Issues a GET signed with the stored token and cookie, returning the decoded body bytes.
	///
	/// The caller must have run [`AuthSession::ensure_valid`](crate::auth::AuthSession::ensure_valid)
	/// first; this layer never refreshes or retries.
	pub async fn get(&self, url: &Url, store: &TokenStore) -> Result<Vec<u8>> {
		let request = self.build_request(url, store)?;
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone(), self.max_body_bytes);

		crate::obs::obs_event!(debug, url = %url, "Sending GET request.");

		let response = match handle.call(request).await {
			Ok(response) => response,
			Err(err) => {
				if slot.take().is_some_and(|meta| meta.body_limit_exceeded) {
					return Err(DecodeError::BodyTooLarge { limit: self.max_body_bytes }.into());
				}

				return Err(http::map_client_error(ENDPOINT, err));
			},
		};
		let status = response.status();

		if !status.is_success() {
			return Err(Error::Http {
				status: status.as_u16(),
				retry_after: http::parse_retry_after(response.headers()),
			});
		}

		let content_type =
			response.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok());

		if !http::is_json_content_type(content_type) {
			return Err(DecodeError::UnexpectedContentType {
				content_type: content_type.map(str::to_owned),
			}
			.into());
		}

		let encoding = content_encoding(response.headers());

		Ok(decompress(encoding.as_deref(), response.into_body(), self.max_body_bytes)?)
	}

	fn build_request(&self, url: &Url, store: &TokenStore) -> Result<HttpRequest> {
		let token = store.token().ok_or(AuthError::NotAuthenticated)?;
		let authorization = HeaderValue::from_str(&format!("bearer {}", token.access_token.expose()))
			.map_err(|_| ConfigError::InvalidHeaderValue { header: "authorization" })?;
		let mut builder = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(ACCEPT, "*/*")
			.header(ACCEPT_ENCODING, "gzip, deflate")
			.header(AUTHORIZATION, authorization);

		if let Some(cookie) = store.cookie() {
			let cookie = HeaderValue::from_str(&cookie.header_value())
				.map_err(|_| ConfigError::InvalidHeaderValue { header: "cookie" })?;

			builder = builder.header(COOKIE, cookie);
		}

		let request = builder
			.header(CONNECTION, "keep-alive")
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(USER_AGENT, self.user_agent.clone())
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}

/// Deserializes a decoded body, reporting the JSON path of any mismatch.
pub fn decode_json<T>(body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::MalformedPayload { source })
}

fn content_encoding(headers: &HeaderMap) -> Option<String> {
	headers
		.get(CONTENT_ENCODING)
		.and_then(|value| value.to_str().ok())
		.map(|value| value.trim().to_ascii_lowercase())
}

fn decompress(encoding: Option<&str>, body: Vec<u8>, limit: usize) -> Result<Vec<u8>, DecodeError> {
	match encoding {
		Some("gzip" | "x-gzip") => read_capped(GzDecoder::new(body.as_slice()), limit),
		Some("deflate") => read_capped(ZlibDecoder::new(body.as_slice()), limit),
		None | Some("" | "identity") if body.len() <= limit => Ok(body),
		None | Some("" | "identity") => Err(DecodeError::BodyTooLarge { limit }),
		Some(other) => Err(DecodeError::TransportFailure {
			source: std::io::Error::new(
				std::io::ErrorKind::InvalidData,
				format!("unsupported content encoding `{other}`"),
			),
		}),
	}
}

fn read_capped(reader: impl Read, limit: usize) -> Result<Vec<u8>, DecodeError> {
	let mut decoded = Vec::new();

	reader
		.take(limit as u64 + 1)
		.read_to_end(&mut decoded)
		.map_err(|source| DecodeError::TransportFailure { source })?;

	if decoded.len() > limit {
		return Err(DecodeError::BodyTooLarge { limit });
	}

	Ok(decoded)
}
