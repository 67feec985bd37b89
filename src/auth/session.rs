//! OAuth session: client-credentials login, refresh-token rotation, and the pre-request
//! validity guard.
//!
//! A session owns exactly one [`TokenStore`]. Login and refresh replace the stored
//! token/cookie pair wholesale; nothing refreshes in the background, so expiry is only
//! noticed by [`AuthSession::ensure_valid`] right before an outbound call.

mod metrics;

pub use metrics::{RefreshMetrics, RefreshSnapshot};

// self
use crate::{
	_prelude::*,
	auth::{
		credentials::Credentials,
		token::{
			secret::Secret,
			store::{TokenStatus, TokenStore},
		},
	},
	config::ClientConfig,
	error::AuthError,
	http::TokenHttpClient,
	oauth::TokenFacade,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Token lifecycle owner for one client.
pub struct AuthSession<C>
where
	C: ?Sized + TokenHttpClient,
{
	facade: TokenFacade<C>,
	store: TokenStore,
	safety_margin: Duration,
	refresh_metrics: Arc<RefreshMetrics>,
}
impl<C> AuthSession<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates an unauthenticated session; call [`AuthSession::login`] before use.
	pub fn new(
		credentials: &Credentials,
		config: &ClientConfig,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let token_endpoint = config.token_endpoint_url()?;
		let facade =
			TokenFacade::new(credentials, &token_endpoint, http_client, config.max_body_bytes)?;

		Ok(Self {
			facade,
			store: TokenStore::default(),
			safety_margin: config.safety_margin(),
			refresh_metrics: Default::default(),
		})
	}

	/// Runs the client-credentials grant and replaces the stored token and cookie.
	pub async fn login(&mut self) -> Result<()> {
		const KIND: FlowKind = FlowKind::Login;

		let span = FlowSpan::new(KIND, "login");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		match span.instrument(self.facade.exchange_client_credentials()).await {
			Ok(grant) => {
				self.store.replace(grant.token, grant.cookie);
				obs::record_flow_outcome(KIND, FlowOutcome::Success);

				Ok(())
			},
			Err(err) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Runs the refresh-token grant with the stored refresh token.
	///
	/// Fails with [`AuthError::NoRefreshToken`] without touching the network when the store
	/// holds no refresh token. A response without a new refresh token keeps the old one.
	pub async fn refresh(&mut self) -> Result<()> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		self.refresh_metrics.record_attempt();

		let result = span
			.instrument(async {
				let refresh_token =
					self.store.refresh_token().map(str::to_owned).ok_or(AuthError::NoRefreshToken)?;
				let mut grant = self.facade.exchange_refresh_token(&refresh_token).await?;

				if grant.token.refresh_token.is_none() {
					grant.token.refresh_token = Some(Secret::new(refresh_token));
				}

				Ok::<_, Error>(grant)
			})
			.await;

		match result {
			Ok(grant) => {
				self.store.replace(grant.token, grant.cookie);
				self.refresh_metrics.record_success(OffsetDateTime::now_utc());
				obs::record_flow_outcome(KIND, FlowOutcome::Success);

				Ok(())
			},
			Err(err) => {
				self.refresh_metrics.record_failure();
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Guarantees a usable token before an outbound call, refreshing at most once.
	pub async fn ensure_valid(&mut self) -> Result<()> {
		match self.status() {
			TokenStatus::Valid => Ok(()),
			TokenStatus::Expiring => {
				obs::obs_event!(debug, "Access token is inside the safety margin; refreshing.");

				self.refresh().await
			},
			TokenStatus::Unrefreshable => Err(AuthError::NoRefreshToken.into()),
			TokenStatus::Unauthenticated => Err(AuthError::NotAuthenticated.into()),
		}
	}

	/// Current lifecycle status.
	pub fn status(&self) -> TokenStatus {
		self.store.status_at(OffsetDateTime::now_utc(), self.safety_margin)
	}

	/// Token and cookie currently held by the session.
	pub fn store(&self) -> &TokenStore {
		&self.store
	}

	/// Margin subtracted from the expiry instant when deciding to refresh.
	pub fn safety_margin(&self) -> Duration {
		self.safety_margin
	}

	/// Shared refresh counters.
	pub fn refresh_metrics(&self) -> Arc<RefreshMetrics> {
		self.refresh_metrics.clone()
	}
}
impl<C> Debug for AuthSession<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthSession")
			.field("store", &self.store)
			.field("safety_margin", &self.safety_margin)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
	// self
	use super::*;
	use crate::http::ResponseMetadataSlot;

	#[derive(Default)]
	struct OfflineClient {
		calls: Arc<AtomicUsize>,
	}
	impl TokenHttpClient for OfflineClient {
		type Handle = OfflineHandle;
		type TransportError = std::io::Error;

		fn with_metadata(&self, _: ResponseMetadataSlot, _: usize) -> Self::Handle {
			OfflineHandle { calls: self.calls.clone() }
		}
	}

	struct OfflineHandle {
		calls: Arc<AtomicUsize>,
	}
	impl<'c> AsyncHttpClient<'c> for OfflineHandle {
		type Error = HttpClientError<std::io::Error>;
		type Future =
			Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

		fn call(&'c self, _: HttpRequest) -> Self::Future {
			self.calls.fetch_add(1, Ordering::SeqCst);

			Box::pin(async { Err(HttpClientError::Other("offline".into())) })
		}
	}

	fn session() -> (AuthSession<OfflineClient>, Arc<AtomicUsize>) {
		let client = OfflineClient::default();
		let calls = client.calls.clone();
		let credentials =
			Credentials::new("id", "secret", "agent/1.0").expect("Credentials should validate.");
		let session = AuthSession::new(&credentials, &ClientConfig::default(), client)
			.expect("Session should build.");

		(session, calls)
	}

	#[tokio::test]
	async fn refresh_without_refresh_token_skips_network() {
		let (mut session, calls) = session();
		let err = session.refresh().await.expect_err("Refresh must fail without a token.");

		assert!(matches!(err, Error::Auth(AuthError::NoRefreshToken)));
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(session.refresh_metrics().attempts(), 1);
		assert_eq!(session.refresh_metrics().failures(), 1);
	}

	#[tokio::test]
	async fn ensure_valid_requires_login() {
		let (mut session, calls) = session();

		assert_eq!(session.status(), TokenStatus::Unauthenticated);

		let err = session.ensure_valid().await.expect_err("Unauthenticated sessions must fail.");

		assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn login_failure_leaves_session_unauthenticated() {
		let (mut session, calls) = session();
		let err = session.login().await.expect_err("Offline login must fail.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(session.status(), TokenStatus::Unauthenticated);
	}
}
