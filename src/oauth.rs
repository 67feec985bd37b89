//! Token endpoint facade over the `oauth2` crate.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	HttpRequest, RefreshToken, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
	http::{
		HeaderMap, HeaderValue,
		header::{ACCEPT, CONNECTION, USER_AGENT},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, SessionCookie},
	error::{AuthError, ConfigError},
	http::{self, ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

const ENDPOINT: &str = "token endpoint";

/// Token plus the session cookie the token endpoint set alongside it.
#[derive(Clone, Debug)]
pub struct TokenGrant {
	/// Freshly issued token.
	pub token: AccessToken,
	/// `edgebucket` cookie, when the response carried one.
	pub cookie: Option<SessionCookie>,
}

pub(crate) struct TokenFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	headers: HeaderMap,
	max_body_bytes: usize,
}
impl<C> TokenFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	pub(crate) fn new(
		credentials: &Credentials,
		token_endpoint: &Url,
		http_client: impl Into<Arc<C>>,
		max_body_bytes: usize,
	) -> Result<Self, ConfigError> {
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_token_uri(TokenUrl::from_url(token_endpoint.clone()));

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			headers: standard_headers(credentials.user_agent())?,
			max_body_bytes,
		})
	}

	pub(crate) fn exchange_client_credentials(&self) -> FacadeFuture<'_, TokenGrant> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let handle = self.signed_handle(meta.clone());
			let result =
				self.oauth_client.exchange_client_credentials().request_async(&handle).await;

			finish(meta.take(), result, self.max_body_bytes)
		})
	}

	pub(crate) fn exchange_refresh_token<'a>(
		&'a self,
		refresh_token: &'a str,
	) -> FacadeFuture<'a, TokenGrant> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let handle = self.signed_handle(meta.clone());
			let refresh_secret = RefreshToken::new(refresh_token.to_owned());
			let result =
				self.oauth_client.exchange_refresh_token(&refresh_secret).request_async(&handle).await;

			finish(meta.take(), result, self.max_body_bytes)
		})
	}

	fn signed_handle(&self, slot: ResponseMetadataSlot) -> StandardHeaders<C::Handle> {
		StandardHeaders {
			inner: self.http_client.with_metadata(slot, self.max_body_bytes),
			headers: self.headers.clone(),
		}
	}
}

/// Overrides the headers `oauth2` sets with the ones every token request carries.
struct StandardHeaders<H> {
	inner: H,
	headers: HeaderMap,
}
impl<'c, H> AsyncHttpClient<'c> for StandardHeaders<H>
where
	H: AsyncHttpClient<'c>,
{
	type Error = H::Error;
	type Future = H::Future;

	fn call(&'c self, mut request: HttpRequest) -> Self::Future {
		for (name, value) in self.headers.iter() {
			request.headers_mut().insert(name.clone(), value.clone());
		}

		self.inner.call(request)
	}
}

fn standard_headers(user_agent: &str) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::new();

	headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
	headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
	headers.insert(
		USER_AGENT,
		HeaderValue::from_str(user_agent)
			.map_err(|_| ConfigError::InvalidHeaderValue { header: "user-agent" })?,
	);

	Ok(headers)
}

fn finish<E>(
	meta: Option<ResponseMetadata>,
	result: Result<BasicTokenResponse, BasicRequestTokenError<HttpClientError<E>>>,
	limit: usize,
) -> Result<TokenGrant>
where
	E: 'static + Send + Sync + StdError,
{
	let meta = meta.unwrap_or_default();

	if meta.body_limit_exceeded {
		return Err(AuthError::BodyTooLarge { limit }.into());
	}
	if let Some(status) = meta.status {
		if !(200..300).contains(&status) {
			let reason = match &result {
				Err(RequestTokenError::ServerResponse(response)) => Some(describe(response)),
				_ => None,
			};

			return Err(AuthError::Rejected { status, reason }.into());
		}
		if !http::is_json_content_type(meta.content_type.as_deref()) {
			return Err(AuthError::UnexpectedContentType { content_type: meta.content_type }.into());
		}
	}

	let response = result.map_err(map_request_error)?;
	let token = map_token_response(&response)?;

	crate::obs::obs_event!(
		debug,
		token_type = %token.token_type,
		expires_at = %token.expires_at,
		"Obtained access token."
	);

	Ok(TokenGrant { token, cookie: meta.session_cookie })
}

fn map_token_response(response: &BasicTokenResponse) -> Result<AccessToken> {
	let mut builder = AccessToken::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(response.token_type().as_ref())
		.issued_at(OffsetDateTime::now_utc());

	if let Some(expires_in) = response.expires_in() {
		let expires_in = Duration::try_from(expires_in).map_err(|_| {
			AuthError::UnexpectedResponse { message: "expires_in is out of range".into() }
		})?;

		builder = builder.expires_in(expires_in);
	}
	if let Some(refresh) = response.refresh_token() {
		builder = builder.refresh_token(refresh.secret().to_owned());
	}

	Ok(builder.build()?)
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) =>
			AuthError::UnexpectedResponse { message: describe(&response) }.into(),
		RequestTokenError::Request(error) => http::map_client_error(ENDPOINT, error),
		RequestTokenError::Parse(source, _body) => AuthError::MalformedResponse { source }.into(),
		RequestTokenError::Other(message) => AuthError::UnexpectedResponse { message }.into(),
	}
}

fn describe(response: &BasicErrorResponse) -> String {
	match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn token_json(body: &str) -> BasicTokenResponse {
		serde_json::from_str(body).expect("Token fixture should parse.")
	}

	fn meta(status: u16, content_type: &str) -> ResponseMetadata {
		ResponseMetadata {
			status: Some(status),
			content_type: Some(content_type.into()),
			..Default::default()
		}
	}

	#[test]
	fn rejected_status_wins_over_parse_failures() {
		let err = finish::<std::io::Error>(
			Some(meta(401, "application/json")),
			Err(RequestTokenError::Other("server returned empty error response".into())),
			1024,
		)
		.expect_err("401 must be rejected.");

		assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 401, reason: None })));
	}

	#[test]
	fn body_limit_is_reported_before_status() {
		let mut meta = meta(StatusCode::OK.as_u16(), "application/json");

		meta.body_limit_exceeded = true;

		let err = finish::<std::io::Error>(
			Some(meta),
			Err(RequestTokenError::Request(HttpClientError::Other("too large".into()))),
			16,
		)
		.expect_err("Oversized bodies must fail.");

		assert!(matches!(err, Error::Auth(AuthError::BodyTooLarge { limit: 16 })));
	}

	#[test]
	fn non_json_success_is_rejected() {
		let err = finish::<std::io::Error>(
			Some(meta(200, "text/html")),
			Ok(token_json(r#"{"access_token":"a","token_type":"bearer"}"#)),
			1024,
		)
		.expect_err("HTML responses must be rejected.");

		assert!(matches!(err, Error::Auth(AuthError::UnexpectedContentType { .. })));
	}

	#[test]
	fn successful_grant_carries_cookie_and_lifetime() {
		let mut meta = meta(200, "application/json; charset=UTF-8");

		meta.session_cookie = Some(SessionCookie::new("edgebucket", "abc"));

		let grant = finish::<std::io::Error>(
			Some(meta),
			Ok(token_json(
				r#"{"access_token":"a","token_type":"bearer","expires_in":86400,"scope":"*"}"#,
			)),
			1024,
		)
		.expect("Grant should succeed.");

		assert_eq!(grant.token.access_token.expose(), "a");
		assert_eq!(grant.token.expires_at - grant.token.issued_at, Duration::days(1));
		assert_eq!(grant.cookie, Some(SessionCookie::new("edgebucket", "abc")));
	}

	#[test]
	fn empty_access_token_is_rejected() {
		let err = finish::<std::io::Error>(
			Some(meta(200, "application/json")),
			Ok(token_json(r#"{"access_token":"","token_type":"bearer","expires_in":60}"#)),
			1024,
		)
		.expect_err("Empty access tokens must be rejected.");

		assert!(matches!(err, Error::Auth(AuthError::MissingAccessToken)));
	}
}
