//! Demonstrates fetching a single listing page and walking an author's submissions with the
//! default reqwest transport against a local mock of the token and content endpoints.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use reddit_readonly::{
	auth::Credentials,
	client::RedditClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	listing::{Age, ListingOptions, Sort},
	reqwest::{Client, redirect::Policy},
};

const LISTING: &str = r#"{
	"kind": "Listing",
	"data": {
		"dist": 2,
		"children": [
			{"kind": "t3", "data": {"id": "a1", "name": "t3_a1", "title": "Go 1.23 is out", "score": 512}},
			{"kind": "t3", "data": {"id": "a2", "name": "t3_a2", "title": "Generics in practice", "score": 256}}
		],
		"after": null,
		"before": null
	}
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.header("set-cookie", "edgebucket=demo-bucket; Path=/")
				.body(r#"{"access_token":"demo-access","token_type":"bearer","expires_in":86400}"#);
		})
		.await;
	let subreddit_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/r/golang/top");
			then.status(200).header("content-type", "application/json").body(LISTING);
		})
		.await;
	let author_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/user/gopher/submitted");
			then.status(200).header("content-type", "application/json").body(LISTING);
		})
		.await;
	let credentials = Credentials::new("demo-client", "demo-secret", "reddit-readonly-demo/0.1")?;
	let config = ClientConfig::default()
		.with_token_endpoint(Url::parse(&server.url("/api/v1/access_token"))?)
		.with_api_base(Url::parse(&server.base_url())?);
	let http_client =
		ReqwestHttpClient::with_client(Client::builder().redirect(Policy::none()).build()?);
	let client = RedditClient::connect_with_http_client(credentials, config, http_client).await?;
	let page = client
		.submissions_to("golang", Sort::Top, Age::Week, &ListingOptions::default().with_limit(5))
		.await?;

	for submission in &page.submissions {
		println!("[{}] {} ({}).", submission.score, submission.title, submission.name);
	}

	let records = client.all_submissions_of("gopher", Sort::New, Age::All, 250).await?;

	println!("Collected {} submissions by u/gopher.", records.len());

	token_mock.assert_async().await;
	subreddit_mock.assert_async().await;
	author_mock.assert_async().await;

	Ok(())
}
