//! Minimum-interval request gate.

// crates.io
use tokio::time::{self, Instant};
// self
use crate::_prelude::*;

/// Spaces outbound requests at least `interval` apart; a disabled throttle never waits.
#[derive(Clone, Debug, Default)]
pub struct Throttle {
	interval: Option<StdDuration>,
	last_request: Option<Instant>,
}
impl Throttle {
	/// Creates a throttle; `None` or a zero interval disables it.
	pub fn new(interval: Option<StdDuration>) -> Self {
		Self { interval: interval.filter(|interval| !interval.is_zero()), last_request: None }
	}

	/// Replaces the interval; zero disables the throttle.
	pub fn set_interval(&mut self, interval: StdDuration) {
		self.interval = (!interval.is_zero()).then_some(interval);
	}

	/// Current interval, if enabled.
	pub fn interval(&self) -> Option<StdDuration> {
		self.interval
	}

	/// Waits until the interval since the previous request has elapsed, then claims the slot.
	pub async fn wait(&mut self) {
		let Some(interval) = self.interval else {
			return;
		};

		if let Some(last) = self.last_request {
			let deadline = last + interval;

			if deadline > Instant::now() {
				crate::obs::obs_event!(debug, wait = ?(deadline - Instant::now()), "Throttling request.");

				time::sleep_until(deadline).await;
			}
		}

		self.last_request = Some(Instant::now());
	}
}
