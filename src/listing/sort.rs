//! Popularity sorts and age windows accepted by the listing endpoints.

// self
use crate::{_prelude::*, error::ValidationError};

/// Popularity ordering of a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
	/// Endpoint default ordering (no sort segment or parameter).
	#[default]
	#[serde(rename = "")]
	Default,
	/// Currently popular.
	Hot,
	/// Most recent first.
	New,
	/// Gaining popularity.
	Rising,
	/// Highest score within the age window.
	Top,
	/// Most contested within the age window.
	Controversial,
}
impl Sort {
	/// Wire value; empty for [`Sort::Default`].
	pub const fn as_str(self) -> &'static str {
		match self {
			Sort::Default => "",
			Sort::Hot => "hot",
			Sort::New => "new",
			Sort::Rising => "rising",
			Sort::Top => "top",
			Sort::Controversial => "controversial",
		}
	}

	/// Path segment appended to subreddit listings, if any.
	pub const fn path_segment(self) -> Option<&'static str> {
		match self {
			Sort::Default => None,
			other => Some(other.as_str()),
		}
	}
}
impl Display for Sort {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Sort {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "default" => Ok(Sort::Default),
			"hot" => Ok(Sort::Hot),
			"new" => Ok(Sort::New),
			"rising" => Ok(Sort::Rising),
			"top" => Ok(Sort::Top),
			"controversial" => Ok(Sort::Controversial),
			_ => Err(ValidationError::UnknownSort { value: s.to_owned() }),
		}
	}
}

/// Time window applied to `top` and `controversial` listings (sent as `t`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Age {
	/// Past hour.
	Hour,
	/// Past day.
	#[default]
	Day,
	/// Past week.
	Week,
	/// Past month.
	Month,
	/// Past year.
	Year,
	/// All time.
	All,
}
impl Age {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Age::Hour => "hour",
			Age::Day => "day",
			Age::Week => "week",
			Age::Month => "month",
			Age::Year => "year",
			Age::All => "all",
		}
	}
}
impl Display for Age {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Age {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"hour" => Ok(Age::Hour),
			"day" => Ok(Age::Day),
			"week" => Ok(Age::Week),
			"month" => Ok(Age::Month),
			"year" => Ok(Age::Year),
			"all" => Ok(Age::All),
			_ => Err(ValidationError::UnknownAge { value: s.to_owned() }),
		}
	}
}
