//! Read-only Reddit listing client: OAuth client-credentials sessions, throttled requests, and
//! lazy cursor pagination over typed submissions.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod oauth;
pub mod obs;
pub mod paginate;
pub mod throttle;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials, client::RedditClient, config::ClientConfig, http::ReqwestHttpClient,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = RedditClient<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Points both the token endpoint and the content API at a mock server rooted at `base`.
	pub fn test_config(base: &str) -> ClientConfig {
		let base = base.trim_end_matches('/');

		ClientConfig::default()
			.with_token_endpoint(
				Url::parse(&format!("{base}/api/v1/access_token"))
					.expect("Mock token endpoint should parse."),
			)
			.with_api_base(Url::parse(base).expect("Mock API base should parse."))
	}

	/// Credentials fixture shared by integration tests.
	pub fn test_credentials() -> Credentials {
		Credentials::new("test-client", "test-secret", "reddit-readonly-tests/0.1")
			.expect("Test credentials should be valid.")
	}

	/// Connects a client against the provided mock server base URL.
	pub async fn connect_test_client(base: &str) -> Result<ReqwestTestClient> {
		RedditClient::connect_with_http_client(
			test_credentials(),
			test_config(base),
			test_reqwest_http_client(),
		)
		.await
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
