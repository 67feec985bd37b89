// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Refresh-token grant counters for one session.
///
/// Shared behind an `Arc` so callers can keep reading them while the client keeps working.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	last_refreshed_at: Mutex<Option<OffsetDateTime>>,
}
impl RefreshMetrics {
	/// Refreshes started, including ones that failed before reaching the network.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Refreshes that stored a new token.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Refreshes that failed, including ones without a refresh token.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// When the last successful refresh completed.
	pub fn last_refreshed_at(&self) -> Option<OffsetDateTime> {
		*self.last_refreshed_at.lock()
	}

	/// Point-in-time copy of every counter.
	pub fn snapshot(&self) -> RefreshSnapshot {
		RefreshSnapshot {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
			last_refreshed_at: self.last_refreshed_at(),
		}
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self, at: OffsetDateTime) {
		self.successes.fetch_add(1, Ordering::Relaxed);
		*self.last_refreshed_at.lock() = Some(at);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}

/// Copy of [`RefreshMetrics`] taken at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSnapshot {
	/// Refreshes started.
	pub attempts: u64,
	/// Refreshes that stored a new token.
	pub successes: u64,
	/// Refreshes that failed.
	pub failures: u64,
	/// When the last successful refresh completed.
	pub last_refreshed_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn snapshot_tracks_outcomes_and_last_success() {
		let metrics = RefreshMetrics::default();
		let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Timestamp is valid.");

		metrics.record_attempt();
		metrics.record_failure();
		metrics.record_attempt();
		metrics.record_success(at);

		assert_eq!(
			metrics.snapshot(),
			RefreshSnapshot { attempts: 2, successes: 1, failures: 1, last_refreshed_at: Some(at) }
		);
	}
}
