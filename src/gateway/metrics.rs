// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::RequestOutcome;

/// Thread-safe counters for gateway requests.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	auth_expired: AtomicU64,
	failure: AtomicU64,
}
impl GatewayMetrics {
	/// Returns the total number of requests sent.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of 2xx responses.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of 401/403 responses.
	pub fn auth_expired(&self) -> u64 {
		self.auth_expired.load(Ordering::Relaxed)
	}

	/// Returns the number of other failures.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record(&self, outcome: RequestOutcome) {
		let counter = match outcome {
			RequestOutcome::Attempt => &self.attempts,
			RequestOutcome::Success => &self.success,
			RequestOutcome::AuthExpired => &self.auth_expired,
			RequestOutcome::Failure => &self.failure,
		};

		counter.fetch_add(1, Ordering::Relaxed);
	}
}
