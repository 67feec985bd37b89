//! Per-call listing query options.

// self
use crate::{_prelude::*, listing::region::Region};

/// Query options accepted by both listing families.
///
/// `after` and `before` are mutually exclusive; choosing one is the caller's job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingOptions {
	/// Restricts results to a geography; sent as Reddit's `g` parameter.
	pub region: Option<Region>,
	/// Maximum records per page; `None` or `0` leaves the server default (25).
	pub limit: Option<u32>,
	/// Fullname of the record after which to resume.
	pub after: Option<String>,
	/// Fullname of the record before which to resume.
	pub before: Option<String>,
	/// Records already seen; only affects server-side numbering.
	pub count: Option<u32>,
	/// Disables vote-based filtering (`show=all`).
	pub show_all: bool,
}
impl ListingOptions {
	/// Sets the geography filter.
	pub fn with_region(mut self, region: Region) -> Self {
		self.region = Some(region);

		self
	}

	/// Sets the page limit.
	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Resumes after the given fullname.
	pub fn with_after(mut self, after: impl Into<String>) -> Self {
		self.after = Some(after.into());

		self
	}

	/// Resumes before the given fullname.
	pub fn with_before(mut self, before: impl Into<String>) -> Self {
		self.before = Some(before.into());

		self
	}

	/// Sets the running count.
	pub fn with_count(mut self, count: u32) -> Self {
		self.count = Some(count);

		self
	}

	/// Toggles `show=all`.
	pub fn with_show_all(mut self, show_all: bool) -> Self {
		self.show_all = show_all;

		self
	}

	/// Query pairs for the set options, in a stable order.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
			pairs.push(("limit", limit.to_string()));
		}
		if let Some(after) = self.after.as_deref().filter(|after| !after.is_empty()) {
			pairs.push(("after", after.to_owned()));
		}
		if let Some(before) = self.before.as_deref().filter(|before| !before.is_empty()) {
			pairs.push(("before", before.to_owned()));
		}
		if let Some(count) = self.count.filter(|count| *count > 0) {
			pairs.push(("count", count.to_string()));
		}
		if self.show_all {
			pairs.push(("show", "all".to_owned()));
		}
		if let Some(region) = self.region {
			pairs.push(("g", region.as_str().to_owned()));
		}

		pairs
	}
}
