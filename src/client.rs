//! Public listing client.
//!
//! [`RedditClient`] ties the pieces together: every request takes the per-client lock,
//! waits on the throttle, makes sure the session holds a usable token, and only then hits
//! the content API. Holding one lock across those steps serializes a shared client's
//! requests, so at most one refresh happens per expiry crossing.

// self
use crate::{
	_prelude::*,
	auth::{AuthSession, Credentials, RefreshMetrics, TokenStatus},
	config::{ClientConfig, MAX_PAGE_SIZE},
	http::TokenHttpClient,
	listing::{
		self, Age, Listing, ListingEnvelope, ListingOptions, ListingTarget, Sort, Submission,
	},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	paginate::{ListingFuture, ListingSource, Pages},
	throttle::Throttle,
	transport::{self, Transport},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Client type alias for the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestRedditClient = RedditClient<ReqwestHttpClient>;

/// Read-only client for subreddit and author submission listings.
pub struct RedditClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	state: AsyncMutex<ClientState<C>>,
	transport: Transport<C>,
	api_base: Url,
	page_size: u32,
}
#[cfg(feature = "reqwest")]
impl RedditClient<ReqwestHttpClient> {
	/// Connects with a reqwest client that does not follow redirects, logging in eagerly.
	pub async fn connect(credentials: Credentials, config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::without_redirects()?;

		Self::connect_with_http_client(credentials, config, http_client).await
	}
}
impl<C> RedditClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Connects with a caller-supplied transport; fails if the initial login fails.
	pub async fn connect_with_http_client(
		credentials: Credentials,
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let http_client = http_client.into();
		let api_base = config.api_base_url()?;
		let transport = Transport::new(
			http_client.clone(),
			credentials.user_agent(),
			config.max_body_bytes,
		)?;
		let mut session = AuthSession::new(&credentials, &config, http_client)?;

		session.login().await?;

		Ok(Self {
			state: AsyncMutex::new(ClientState { session, throttle: Throttle::new(config.throttle) }),
			transport,
			api_base,
			page_size: config.page_size(),
		})
	}

	/// Fetches one page of submissions posted to `subreddit`.
	pub async fn submissions_to(
		&self,
		subreddit: &str,
		sort: Sort,
		age: Age,
		options: &ListingOptions,
	) -> Result<Listing> {
		let target = ListingTarget::subreddit(subreddit)?;

		self.fetch(&target, sort, age, options).await
	}

	/// Fetches one page of submissions by `author`.
	pub async fn submissions_of(
		&self,
		author: &str,
		sort: Sort,
		age: Age,
		options: &ListingOptions,
	) -> Result<Listing> {
		let target = ListingTarget::author(author)?;

		self.fetch(&target, sort, age, options).await
	}

	/// Collects up to `total` submissions posted to `subreddit`.
	pub async fn all_submissions_to(
		&self,
		subreddit: &str,
		sort: Sort,
		age: Age,
		total: usize,
	) -> Result<Vec<Submission>> {
		self.pages_to(subreddit, sort, age)?.collect_total(total).await
	}

	/// Collects up to `total` submissions by `author`.
	pub async fn all_submissions_of(
		&self,
		author: &str,
		sort: Sort,
		age: Age,
		total: usize,
	) -> Result<Vec<Submission>> {
		self.pages_of(author, sort, age)?.collect_total(total).await
	}

	/// Lazy page sequence over a subreddit listing.
	pub fn pages_to(&self, subreddit: &str, sort: Sort, age: Age) -> Result<Pages<'_, Self>> {
		let target = ListingTarget::subreddit(subreddit)?;

		Ok(Pages::new(self, target, sort, age).with_page_size(self.page_size))
	}

	/// Lazy page sequence over an author listing.
	pub fn pages_of(&self, author: &str, sort: Sort, age: Age) -> Result<Pages<'_, Self>> {
		let target = ListingTarget::author(author)?;

		Ok(Pages::new(self, target, sort, age).with_page_size(self.page_size))
	}

	/// Sets the minimum interval between requests; zero disables throttling.
	pub async fn set_throttle(&self, interval: StdDuration) {
		self.state.lock().await.throttle.set_interval(interval);
	}

	/// Runs a fresh client-credentials grant, replacing the session's token and cookie.
	pub async fn login(&self) -> Result<()> {
		self.state.lock().await.session.login().await
	}

	/// Current token lifecycle status.
	pub async fn token_status(&self) -> TokenStatus {
		self.state.lock().await.session.status()
	}

	/// Refresh counters for this client's session.
	pub async fn refresh_metrics(&self) -> Arc<RefreshMetrics> {
		self.state.lock().await.session.refresh_metrics()
	}

	async fn fetch(
		&self,
		target: &ListingTarget,
		sort: Sort,
		age: Age,
		options: &ListingOptions,
	) -> Result<Listing> {
		const KIND: FlowKind = FlowKind::Listing;

		target.validate()?;

		if matches!(target, ListingTarget::Author(_))
			&& options.limit.is_some_and(|limit| limit > MAX_PAGE_SIZE)
		{
			obs::obs_event!(
				warn,
				limit = ?options.limit,
				"Listings serve at most 100 records per page; use `after` or `before` to paginate."
			);
		}

		let url = listing::listing_url(&self.api_base, target, sort, age, options)?;
		let span = FlowSpan::new(KIND, target.kind());

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				let mut state = self.state.lock().await;
				let ClientState { session, throttle } = &mut *state;

				throttle.wait().await;
				session.ensure_valid().await?;

				let body = self.transport.get(&url, session.store()).await?;
				let envelope = transport::decode_json::<ListingEnvelope>(&body)?;

				Ok::<_, Error>(Listing::from(envelope))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
impl<C> ListingSource for RedditClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fetch_listing<'a>(
		&'a self,
		target: &'a ListingTarget,
		sort: Sort,
		age: Age,
		options: &'a ListingOptions,
	) -> ListingFuture<'a> {
		Box::pin(self.fetch(target, sort, age, options))
	}
}
impl<C> Debug for RedditClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RedditClient")
			.field("api_base", &self.api_base.as_str())
			.field("page_size", &self.page_size)
			.finish_non_exhaustive()
	}
}

struct ClientState<C>
where
	C: ?Sized + TokenHttpClient,
{
	session: AuthSession<C>,
	throttle: Throttle,
}
