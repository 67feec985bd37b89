//! Cursor-chained pagination over any single-page listing source.
//!
//! [`Pages`] is pull-based: nothing is fetched until [`Pages::next_page`] is awaited, and
//! each call issues at most one request. The sequence ends on an empty page or on a page
//! without an `after` cursor.

// crates.io
use tokio_stream::Stream;
// self
use crate::{
	_prelude::*,
	config::MAX_PAGE_SIZE,
	listing::{Age, Listing, ListingOptions, ListingTarget, Sort, Submission},
};

/// Boxed future returned by [`ListingSource::fetch_listing`].
pub type ListingFuture<'a> = Pin<Box<dyn Future<Output = Result<Listing>> + 'a + Send>>;

/// Anything that can fetch one page of a listing.
pub trait ListingSource
where
	Self: Send + Sync,
{
	/// Fetches the page selected by `options`.
	fn fetch_listing<'a>(
		&'a self,
		target: &'a ListingTarget,
		sort: Sort,
		age: Age,
		options: &'a ListingOptions,
	) -> ListingFuture<'a>;
}

/// Lazy page sequence over a [`ListingSource`].
#[derive(Debug)]
pub struct Pages<'s, S>
where
	S: ?Sized,
{
	source: &'s S,
	target: ListingTarget,
	sort: Sort,
	age: Age,
	page_size: u32,
	after: Option<String>,
	exhausted: bool,
}
impl<'s, S> Pages<'s, S>
where
	S: ?Sized + ListingSource,
{
	/// Starts a sequence at the head of the listing with full-size pages.
	pub fn new(source: &'s S, target: ListingTarget, sort: Sort, age: Age) -> Self {
		Self {
			source,
			target,
			sort,
			age,
			page_size: MAX_PAGE_SIZE,
			after: None,
			exhausted: false,
		}
	}

	/// Sets the records requested per page (clamped to 1..=100).
	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);

		self
	}

	/// Resumes after the given fullname instead of the listing head.
	pub fn starting_after(mut self, after: impl Into<String>) -> Self {
		self.after = Some(after.into()).filter(|after| !after.is_empty());

		self
	}

	/// Records requested per page.
	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	/// Cursor the next request resumes after.
	pub fn cursor(&self) -> Option<&str> {
		self.after.as_deref()
	}

	/// Returns `true` once the sequence has ended.
	pub fn is_exhausted(&self) -> bool {
		self.exhausted
	}

	/// Fetches the next page, or `Ok(None)` once the listing is exhausted.
	///
	/// A failed fetch leaves the cursor untouched, so calling again retries the same page.
	pub async fn next_page(&mut self) -> Result<Option<Listing>> {
		if self.exhausted {
			return Ok(None);
		}

		let listing = self.fetch(self.page_size).await?;

		if listing.submissions.is_empty() {
			self.exhausted = true;

			return Ok(None);
		}

		match &listing.cursor.after {
			Some(after) => self.after = Some(after.clone()),
			None => self.exhausted = true,
		}

		Ok(Some(listing))
	}

	/// Turns the sequence into a [`Stream`] of pages.
	///
	/// Ends on the same conditions as [`Pages::next_page`]; an error is yielded once and ends
	/// the stream. Nothing is fetched until the stream is polled.
	pub fn into_stream(mut self) -> impl Stream<Item = Result<Listing>> + 's {
		async_stream::stream! {
			loop {
				match self.next_page().await {
					Ok(Some(listing)) => yield Ok(listing),
					Ok(None) => break,
					Err(err) => {
						yield Err(err);

						break;
					},
				}
			}
		}
	}

	/// Collects up to `total` records.
	///
	/// A total that fits in one page is served by a single request with `limit = total`;
	/// larger totals walk the sequence and truncate the last page.
	pub async fn collect_total(mut self, total: usize) -> Result<Vec<Submission>> {
		if total == 0 {
			return Ok(Vec::new());
		}
		if total <= self.page_size as usize {
			// `total` fits in u32 because it is at most `page_size`.
			let listing = self.fetch(total as u32).await?;

			return Ok(listing.submissions);
		}

		let mut submissions = Vec::with_capacity(total);

		while submissions.len() < total {
			match self.next_page().await? {
				Some(listing) => submissions.extend(listing.submissions),
				None => break,
			}
		}

		submissions.truncate(total);

		Ok(submissions)
	}

	async fn fetch(&self, limit: u32) -> Result<Listing> {
		let mut options = ListingOptions::default().with_limit(limit);

		options.after = self.after.clone();

		self.source.fetch_listing(&self.target, self.sort, self.age, &options).await
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use tokio_stream::StreamExt;
	// self
	use super::*;
	use crate::{error::TransportError, listing::Cursor};

	/// In-memory listing of `len` records served in server-sized pages.
	struct FakeSource {
		len: usize,
		requests: AtomicUsize,
		limits: Mutex<Vec<u32>>,
		fail_on: Option<usize>,
	}
	impl FakeSource {
		fn new(len: usize) -> Self {
			Self { len, requests: AtomicUsize::new(0), limits: Mutex::new(Vec::new()), fail_on: None }
		}

		fn requests(&self) -> usize {
			self.requests.load(Ordering::SeqCst)
		}
	}
	impl ListingSource for FakeSource {
		fn fetch_listing<'a>(
			&'a self,
			_: &'a ListingTarget,
			_: Sort,
			_: Age,
			options: &'a ListingOptions,
		) -> ListingFuture<'a> {
			Box::pin(async move {
				let request = self.requests.fetch_add(1, Ordering::SeqCst);

				if self.fail_on == Some(request) {
					return Err(TransportError::Other {
						endpoint: "content endpoint",
						message: "connection reset".into(),
					}
					.into());
				}

				let limit = options.limit.unwrap_or(25);

				self.limits.lock().push(limit);

				let start = options
					.after
					.as_deref()
					.and_then(|after| after.strip_prefix("t3_"))
					.and_then(|index| index.parse::<usize>().ok())
					.map_or(0, |index| index + 1);
				let end = (start + limit as usize).min(self.len);
				let submissions = (start..end)
					.map(|index| Submission {
						id: index.to_string(),
						name: format!("t3_{index}"),
						..Default::default()
					})
					.collect::<Vec<_>>();
				let after = (end < self.len).then(|| format!("t3_{}", end - 1));

				Ok(Listing { submissions, cursor: Cursor::new(None, after), dist: None })
			})
		}
	}

	fn pages(source: &FakeSource) -> Pages<'_, FakeSource> {
		Pages::new(source, ListingTarget::Subreddit("golang".into()), Sort::Top, Age::All)
	}

	#[tokio::test]
	async fn zero_total_makes_no_request() {
		let source = FakeSource::new(500);
		let records = pages(&source).collect_total(0).await.expect("Empty fetch should succeed.");

		assert!(records.is_empty());
		assert_eq!(source.requests(), 0);
	}

	#[tokio::test]
	async fn small_total_uses_one_request_with_exact_limit() {
		let source = FakeSource::new(500);
		let records = pages(&source).collect_total(42).await.expect("Fetch should succeed.");

		assert_eq!(records.len(), 42);
		assert_eq!(source.requests(), 1);
		assert_eq!(*source.limits.lock(), vec![42]);
	}

	#[tokio::test]
	async fn large_total_walks_ceil_pages_and_truncates() {
		let source = FakeSource::new(1_000);
		let records = pages(&source).collect_total(250).await.expect("Fetch should succeed.");

		assert_eq!(records.len(), 250);
		assert_eq!(source.requests(), 3);
		assert_eq!(records.last().map(|record| record.name.as_str()), Some("t3_249"));
		assert!(source.limits.lock().iter().all(|limit| *limit == 100));
	}

	#[tokio::test]
	async fn short_listing_returns_what_exists() {
		let source = FakeSource::new(180);
		let records = pages(&source).collect_total(250).await.expect("Fetch should succeed.");

		assert_eq!(records.len(), 180);
		assert_eq!(source.requests(), 2);
	}

	#[tokio::test]
	async fn sequence_ends_on_missing_cursor_then_stays_ended() {
		let source = FakeSource::new(150);
		let mut pages = pages(&source);

		assert_eq!(pages.next_page().await.expect("First page.").map(|l| l.submissions.len()), Some(100));
		assert_eq!(pages.cursor(), Some("t3_99"));
		assert_eq!(pages.next_page().await.expect("Second page.").map(|l| l.submissions.len()), Some(50));
		assert!(pages.is_exhausted());
		assert!(pages.next_page().await.expect("Exhausted sequence.").is_none());
		assert_eq!(source.requests(), 2);
	}

	#[tokio::test]
	async fn empty_page_ends_sequence() {
		let source = FakeSource::new(0);
		let mut pages = pages(&source);

		assert!(pages.next_page().await.expect("Empty listing.").is_none());
		assert!(pages.is_exhausted());
	}

	#[tokio::test]
	async fn failure_keeps_cursor_for_retry() {
		let mut source = FakeSource::new(300);

		source.fail_on = Some(1);

		let mut pages = pages(&source).with_page_size(100);

		pages.next_page().await.expect("First page should succeed.");
		pages.next_page().await.expect_err("Second request should fail.");

		assert_eq!(pages.cursor(), Some("t3_99"));

		let retried = pages.next_page().await.expect("Retry should succeed.").expect("Page.");

		assert_eq!(retried.submissions.first().map(|record| record.name.as_str()), Some("t3_100"));
	}

	#[tokio::test]
	async fn stream_prefix_fetches_only_what_is_taken() {
		let source = FakeSource::new(1_000);
		let mut stream = std::pin::pin!(pages(&source).into_stream().take(1));
		let mut taken = Vec::new();

		while let Some(page) = stream.next().await {
			taken.push(page.expect("Page should load."));
		}

		assert_eq!(taken.len(), 1);
		assert_eq!(taken[0].submissions.len(), 100);
		assert_eq!(source.requests(), 1);
	}

	#[tokio::test]
	async fn stream_ends_with_the_sequence() {
		let source = FakeSource::new(150);
		let sizes = pages(&source)
			.into_stream()
			.map(|page| page.map(|listing| listing.submissions.len()))
			.collect::<Result<Vec<_>>>()
			.await
			.expect("Every page should load.");

		assert_eq!(sizes, vec![100, 50]);
		assert_eq!(source.requests(), 2);
	}

	#[tokio::test]
	async fn stream_yields_error_then_stops() {
		let mut source = FakeSource::new(500);

		source.fail_on = Some(1);

		let mut stream = std::pin::pin!(pages(&source).into_stream());

		assert!(stream.next().await.expect("First item.").is_ok());
		assert!(stream.next().await.expect("Second item.").is_err());
		assert!(stream.next().await.is_none());
		assert_eq!(source.requests(), 2);
	}

	#[tokio::test]
	async fn starting_cursor_and_page_size_are_honored() {
		let source = FakeSource::new(100);
		let mut pages = pages(&source).with_page_size(10).starting_after("t3_89");
		let page = pages.next_page().await.expect("Page should load.").expect("Page.");

		assert_eq!(page.submissions.len(), 10);
		assert_eq!(page.submissions[0].name, "t3_90");
		assert!(pages.is_exhausted());
	}
}
