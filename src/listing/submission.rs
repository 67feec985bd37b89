//! Typed submission (`t3`) records.

// self
use crate::_prelude::*;

/// Edit state of a submission: `false`, or the epoch seconds of the last edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EditedRepr", into = "EditedRepr")]
pub enum Edited {
	/// Never edited.
	#[default]
	Never,
	/// Edited, but the payload carried no timestamp (`true`).
	Unspecified,
	/// Edited at the given epoch seconds.
	At(f64),
}
impl Edited {
	/// Returns `true` for any edited state.
	pub fn is_edited(self) -> bool {
		!matches!(self, Edited::Never)
	}
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum EditedRepr {
	Flag(bool),
	At(f64),
}
impl From<EditedRepr> for Edited {
	fn from(repr: EditedRepr) -> Self {
		match repr {
			EditedRepr::Flag(false) => Edited::Never,
			EditedRepr::Flag(true) => Edited::Unspecified,
			EditedRepr::At(at) => Edited::At(at),
		}
	}
}
impl From<Edited> for EditedRepr {
	fn from(edited: Edited) -> Self {
		match edited {
			Edited::Never => EditedRepr::Flag(false),
			Edited::Unspecified => EditedRepr::Flag(true),
			Edited::At(at) => EditedRepr::At(at),
		}
	}
}

/// A post as returned inside listing envelopes. Absent fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
	/// Base-36 identifier.
	pub id: String,
	/// Fullname (`t3_<id>`), used as a pagination cursor.
	pub name: String,
	/// Title.
	pub title: String,
	/// Author username (`[deleted]` once removed).
	pub author: String,
	/// Author fullname (`t2_<id>`).
	pub author_fullname: Option<String>,
	/// Author flair text.
	pub author_flair_text: Option<String>,
	/// Author flair CSS class.
	pub author_flair_css_class: Option<String>,
	/// Whether the author has premium.
	pub author_premium: bool,
	/// Whether the author has Patreon flair.
	pub author_patreon_flair: bool,
	/// Subreddit name without prefix.
	pub subreddit: String,
	/// Subreddit fullname (`t5_<id>`).
	pub subreddit_id: String,
	/// Subreddit name with `r/` prefix.
	pub subreddit_name_prefixed: String,
	/// Subreddit visibility (`public`, `restricted`, ...).
	pub subreddit_type: String,
	/// Subscriber count of the subreddit.
	pub subreddit_subscribers: u64,
	/// Site-relative permalink.
	pub permalink: String,
	/// Link target (or the permalink for self posts).
	pub url: String,
	/// Link domain (`self.<subreddit>` for self posts).
	pub domain: String,
	/// Markdown body of self posts.
	pub selftext: String,
	/// Rendered HTML body of self posts.
	pub selftext_html: Option<String>,
	/// Thumbnail URL or a keyword such as `self`/`default`.
	pub thumbnail: String,
	/// Thumbnail width in pixels.
	pub thumbnail_width: Option<u32>,
	/// Thumbnail height in pixels.
	pub thumbnail_height: Option<u32>,
	/// Link post hint (`image`, `link`, `hosted:video`, ...).
	pub post_hint: Option<String>,
	/// Creation time in local epoch seconds.
	pub created: f64,
	/// Creation time in UTC epoch seconds.
	pub created_utc: f64,
	/// Edit state.
	pub edited: Edited,
	/// Net score.
	pub score: i64,
	/// Upvotes.
	pub ups: i64,
	/// Downvotes (always zero on modern payloads).
	pub downs: i64,
	/// Share of upvotes.
	pub upvote_ratio: f64,
	/// Comment count.
	pub num_comments: u64,
	/// Crosspost count.
	pub num_crossposts: u64,
	/// Times gilded.
	pub gilded: u64,
	/// Awards received.
	pub total_awards_received: u64,
	/// Whether the viewer's vote is up (`Some(true)`), down, or absent.
	pub likes: Option<bool>,
	/// View count, when exposed.
	pub view_count: Option<u64>,
	/// Report count, visible to moderators only.
	pub num_reports: Option<i64>,
	/// Marked NSFW.
	pub over_18: bool,
	/// Marked as a spoiler.
	pub spoiler: bool,
	/// Comments locked.
	pub locked: bool,
	/// Stickied in its subreddit.
	pub stickied: bool,
	/// Pinned to the author's profile.
	pub pinned: bool,
	/// Archived (no new votes or comments).
	pub archived: bool,
	/// Hidden by the viewer.
	pub hidden: bool,
	/// Saved by the viewer.
	pub saved: bool,
	/// Clicked by the viewer.
	pub clicked: bool,
	/// Visited by the viewer.
	pub visited: bool,
	/// Self (text) post.
	pub is_self: bool,
	/// Hosted video post.
	pub is_video: bool,
	/// Marked original content.
	pub is_original_content: bool,
	/// Meta post.
	pub is_meta: bool,
	/// Can be crossposted.
	pub is_crosspostable: bool,
	/// Media hosted on a Reddit domain.
	pub is_reddit_media_domain: bool,
	/// Eligible for search indexing.
	pub is_robot_indexable: bool,
	/// Contest mode enabled.
	pub contest_mode: bool,
	/// Reply notifications enabled.
	pub send_replies: bool,
	/// Can be gilded.
	pub can_gild: bool,
	/// Live comments enabled.
	pub allow_live_comments: bool,
	/// Links are `nofollow`.
	pub no_follow: bool,
	/// In a quarantined subreddit.
	pub quarantine: bool,
	/// Score hidden.
	pub hide_score: bool,
	/// Media-only post.
	pub media_only: bool,
	/// Link flair text.
	pub link_flair_text: Option<String>,
	/// Link flair CSS class.
	pub link_flair_css_class: Option<String>,
	/// Link flair type (`text` or `richtext`).
	pub link_flair_type: Option<String>,
	/// Distinguished as `moderator` or `admin`.
	pub distinguished: Option<String>,
	/// Suggested comment sort.
	pub suggested_sort: Option<String>,
	/// Removal reason category.
	pub removed_by_category: Option<String>,
	/// Ad whitelist status.
	pub whitelist_status: Option<String>,
	/// Parent ad whitelist status.
	pub parent_whitelist_status: Option<String>,
	/// Whitelist level.
	pub wls: Option<i64>,
	/// Parent whitelist level.
	pub pwls: Option<i64>,
	/// Embedded media description.
	pub media: Option<serde_json::Value>,
	/// Secure embedded media description.
	pub secure_media: Option<serde_json::Value>,
	/// Preview images.
	pub preview: Option<serde_json::Value>,
}
impl Submission {
	/// Creation instant derived from `created_utc`.
	pub fn created_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.created_utc as i64).ok()
	}
}
