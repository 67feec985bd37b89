//! Listing model: sorts, options, typed submissions, cursors, and URL construction.

pub mod options;
pub mod region;
pub mod sort;
pub mod submission;

pub use options::*;
pub use region::*;
pub use sort::*;
pub use submission::*;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, ValidationError},
};

/// Opaque pagination tokens returned with a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
	/// Fullname preceding the page.
	pub before: Option<String>,
	/// Fullname following the page; the forward pagination key.
	pub after: Option<String>,
}
impl Cursor {
	/// Builds a cursor, treating empty strings as absent.
	pub fn new(before: Option<String>, after: Option<String>) -> Self {
		Self {
			before: before.filter(|value| !value.is_empty()),
			after: after.filter(|value| !value.is_empty()),
		}
	}
}

/// One page of submissions plus its cursor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
	/// Records in server order.
	pub submissions: Vec<Submission>,
	/// Pagination tokens.
	pub cursor: Cursor,
	/// Number of records the server reported for the page.
	pub dist: Option<u32>,
}

/// Whose submissions a listing covers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListingTarget {
	/// Posts to a subreddit (`/r/{name}`).
	Subreddit(String),
	/// Posts by an author (`/user/{name}/submitted`).
	Author(String),
}
impl ListingTarget {
	/// Validated subreddit target.
	pub fn subreddit(name: impl Into<String>) -> Result<Self, ValidationError> {
		let target = Self::Subreddit(name.into());

		target.validate()?;

		Ok(target)
	}

	/// Validated author target.
	pub fn author(name: impl Into<String>) -> Result<Self, ValidationError> {
		let target = Self::Author(name.into());

		target.validate()?;

		Ok(target)
	}

	/// Rejects empty names.
	pub fn validate(&self) -> Result<(), ValidationError> {
		match self {
			Self::Subreddit(name) if name.is_empty() => Err(ValidationError::EmptySubreddit),
			Self::Author(name) if name.is_empty() => Err(ValidationError::EmptyAuthor),
			_ => Ok(()),
		}
	}

	/// Short label for spans and logs.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Subreddit(_) => "subreddit",
			Self::Author(_) => "author",
		}
	}
}

#[derive(Deserialize)]
pub(crate) struct ListingEnvelope {
	data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
	#[serde(default)]
	dist: Option<u32>,
	#[serde(default)]
	children: Vec<ListingChild>,
	#[serde(default)]
	after: Option<String>,
	#[serde(default)]
	before: Option<String>,
}

#[derive(Deserialize)]
struct ListingChild {
	data: Submission,
}

impl From<ListingEnvelope> for Listing {
	fn from(envelope: ListingEnvelope) -> Self {
		let ListingData { dist, children, after, before } = envelope.data;

		Self {
			submissions: children.into_iter().map(|child| child.data).collect(),
			cursor: Cursor::new(before, after),
			dist,
		}
	}
}

/// Builds the listing URL for `target` under `base`.
///
/// Subreddit listings carry the sort as a path segment; author listings carry it as the
/// `sort` parameter. Both add the options, `t=<age>` and `raw_json=1`.
pub fn listing_url(
	base: &Url,
	target: &ListingTarget,
	sort: Sort,
	age: Age,
	options: &ListingOptions,
) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	{
		let mut segments =
			url.path_segments_mut().map_err(|_| ConfigError::CannotBeABase { url: base.to_string() })?;

		segments.pop_if_empty();

		match target {
			ListingTarget::Subreddit(name) => {
				segments.push("r").push(name);

				if let Some(segment) = sort.path_segment() {
					segments.push(segment);
				}
			},
			ListingTarget::Author(name) => {
				segments.push("user").push(name).push("submitted");
			},
		}
	}
	{
		let mut query = url.query_pairs_mut();

		if let (ListingTarget::Author(_), Some(sort)) = (target, sort.path_segment()) {
			query.append_pair("sort", sort);
		}
		for (key, value) in options.query_pairs() {
			query.append_pair(key, &value);
		}

		query.append_pair("t", age.as_str()).append_pair("raw_json", "1");
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> Url {
		Url::parse("https://oauth.reddit.com").expect("Base URL should parse.")
	}

	#[test]
	fn subreddit_url_uses_sort_segment() {
		let url = listing_url(
			&base(),
			&ListingTarget::Subreddit("golang".into()),
			Sort::Top,
			Age::Week,
			&ListingOptions::default().with_limit(5),
		)
		.expect("URL should build.");

		assert_eq!(url.as_str(), "https://oauth.reddit.com/r/golang/top?limit=5&t=week&raw_json=1");
	}

	#[test]
	fn default_sort_omits_segment_and_parameter() {
		let subreddit = listing_url(
			&base(),
			&ListingTarget::Subreddit("rust".into()),
			Sort::Default,
			Age::Day,
			&ListingOptions::default(),
		)
		.expect("URL should build.");
		let author = listing_url(
			&base(),
			&ListingTarget::Author("someuser".into()),
			Sort::Default,
			Age::All,
			&ListingOptions::default(),
		)
		.expect("URL should build.");

		assert_eq!(subreddit.as_str(), "https://oauth.reddit.com/r/rust?t=day&raw_json=1");
		assert_eq!(
			author.as_str(),
			"https://oauth.reddit.com/user/someuser/submitted?t=all&raw_json=1"
		);
	}

	#[test]
	fn author_url_carries_sort_parameter_and_escapes_segments() {
		let url = listing_url(
			&Url::parse("http://127.0.0.1:8080/proxy/").expect("Base URL should parse."),
			&ListingTarget::Author("a b/c".into()),
			Sort::New,
			Age::Hour,
			&ListingOptions::default().with_after("t3_x"),
		)
		.expect("URL should build.");

		assert_eq!(
			url.as_str(),
			"http://127.0.0.1:8080/proxy/user/a%20b%2Fc/submitted?sort=new&after=t3_x&t=hour&raw_json=1"
		);
	}

	#[test]
	fn targets_reject_empty_names() {
		assert_eq!(ListingTarget::subreddit(""), Err(ValidationError::EmptySubreddit));
		assert_eq!(ListingTarget::author(""), Err(ValidationError::EmptyAuthor));
		assert_eq!(ListingTarget::author("spez").map(|target| target.kind()), Ok("author"));
	}

	#[test]
	fn envelope_converts_and_blank_cursors_vanish() {
		let envelope: ListingEnvelope = serde_json::from_str(
			r#"{
				"kind": "Listing",
				"data": {
					"dist": 1,
					"children": [{"kind": "t3", "data": {"id": "abc", "name": "t3_abc"}}],
					"after": "t3_abc",
					"before": ""
				}
			}"#,
		)
		.expect("Envelope should deserialize.");
		let listing = Listing::from(envelope);

		assert_eq!(listing.submissions.len(), 1);
		assert_eq!(listing.cursor, Cursor { before: None, after: Some("t3_abc".into()) });
		assert_eq!(listing.dist, Some(1));
	}
}
