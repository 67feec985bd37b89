//! Transport primitives shared by the token endpoint and the content API.
//!
//! The module exposes [`TokenHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so downstream crates can plug in custom HTTP clients
//! without losing the session's response inspection. Implementations call
//! [`ResponseMetadataSlot::take`] before dispatching a request and
//! [`ResponseMetadataSlot::store`] once the status and headers are known; the token
//! facade reads the slot after `oauth2` resolves to classify failures.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		HeaderMap, StatusCode,
		header::{CONTENT_TYPE, RETRY_AFTER, SET_COOKIE},
	},
};
#[cfg(feature = "reqwest")] use oauth2::HttpResponse;
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	auth::SessionCookie,
	error::{ConfigError, TransportError},
};

/// Media type both endpoints must answer with.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Abstraction over HTTP transports capable of executing token grants and content API
/// calls while publishing response metadata to the session.
///
/// The trait is the crate's only dependency on an HTTP stack. Callers provide an
/// implementation (shared behind `Arc<T>`) and the client requests short-lived
/// [`AsyncHttpClient`] handles that each carry a clone of a [`ResponseMetadataSlot`].
/// Handles must own whatever state they need so their request futures stay `Send` for
/// the lifetime of the in-flight call.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// # Metadata Contract
	///
	/// - Call [`ResponseMetadataSlot::take`] before submitting the request so stale data never
	///   leaks across calls.
	/// - Once the response head is known, save it with [`ResponseMetadataSlot::store`]
	///   ([`ResponseMetadata::capture`] builds the value from status + headers).
	/// - Stop reading once the body grows past `body_limit` bytes, set
	///   [`ResponseMetadata::body_limit_exceeded`], and fail the call with
	///   [`HttpClientError::Other`].
	fn with_metadata(&self, slot: ResponseMetadataSlot, body_limit: usize) -> Self::Handle;
}

/// Metadata from the most recent HTTP response.
///
/// Additional fields may be added in future releases, so construct values with
/// [`ResponseMetadata::capture`] or field names instead of struct update syntax.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response head arrived.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Raw `Content-Type` header value.
	pub content_type: Option<String>,
	/// `edgebucket` cookie from the `Set-Cookie` headers.
	pub session_cookie: Option<SessionCookie>,
	/// Set when the body was abandoned for exceeding the configured cap.
	pub body_limit_exceeded: bool,
}
impl ResponseMetadata {
	/// Captures the fields the client inspects from a response head.
	pub fn capture(status: StatusCode, headers: &HeaderMap) -> Self {
		Self {
			status: Some(status.as_u16()),
			retry_after: parse_retry_after(headers),
			content_type: headers
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned),
			session_cookie: SessionCookie::find_edgebucket(
				headers.get_all(SET_COOKIE).iter().filter_map(|value| value.to_str().ok()),
			),
			body_limit_exceeded: false,
		}
	}
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Flags the stored metadata as having exceeded the body cap.
	pub fn mark_body_limit_exceeded(&self) {
		self.0.lock().get_or_insert_with(ResponseMetadata::default).body_limit_exceeded = true;
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Neither endpoint should be followed through redirects; [`RedditClient::connect`]
/// builds a client with redirects disabled, and custom clients should do the same.
///
/// [`RedditClient::connect`]: crate::client::RedditClient::connect
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with redirects disabled.
	pub fn without_redirects() -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	pub(crate) fn instrumented(
		&self,
		slot: ResponseMetadataSlot,
		body_limit: usize,
	) -> InstrumentedHandle {
		InstrumentedHandle::new(self.0.clone(), slot, body_limit)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot, body_limit: usize) -> Self::Handle {
		self.instrumented(slot, body_limit)
	}
}

#[cfg(feature = "reqwest")]
struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
	body_limit: usize,
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
#[cfg(feature = "reqwest")]
impl InstrumentedHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot, body_limit: usize) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, slot, body_limit }))
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let mut response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata::capture(status, &headers));

			let mut body = Vec::new();

			while let Some(chunk) = response.chunk().await.map_err(Box::new)? {
				if body.len() + chunk.len() > client.body_limit {
					client.slot.mark_body_limit_exceeded();

					return Err(HttpClientError::Other(format!(
						"response body exceeds the {} byte limit",
						client.body_limit
					)));
				}

				body.extend_from_slice(&chunk);
			}

			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Parses a `Retry-After` header expressed either in seconds or as an RFC 2822 date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

/// Returns `true` when the media type (parameters stripped, case-insensitive) is JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
	content_type
		.and_then(|value| value.split(';').next())
		.is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

pub(crate) fn map_client_error<E>(endpoint: &'static str, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(endpoint, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { endpoint, message }.into(),
		_ => TransportError::Other { endpoint, message: "unrecognized HTTP client failure".into() }
			.into(),
	}
}
