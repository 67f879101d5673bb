//! Background polling for the notification bell.
//!
//! The poller fetches immediately and then once per interval. Failures other than a session
//! rejection are logged and the next tick tries again. A rejection ends the loop: the gateway
//! has already torn the session down and navigated to login. Dropping the future stops polling.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio::time::{self, MissedTickBehavior};
// self
use crate::{
	_prelude::*,
	api::{Notification, unread_count},
	gateway::Gateway,
	obs,
};

/// Interval used unless overridden.
pub const DEFAULT_POLL_INTERVAL: StdDuration = StdDuration::from_secs(30);

const MIN_POLL_INTERVAL: StdDuration = StdDuration::from_millis(1);

/// One fetch of the notification feed.
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationSnapshot {
	/// Notifications as returned by the backend.
	pub notifications: Vec<Notification>,
	/// Number of unread entries.
	pub unread: usize,
}

/// Periodically fetches `/notifications` through a gateway.
#[derive(Clone, Debug)]
pub struct NotificationPoller {
	gateway: Gateway,
	interval: StdDuration,
}
impl NotificationPoller {
	/// Creates a poller using [`DEFAULT_POLL_INTERVAL`].
	pub fn new(gateway: Gateway) -> Self {
		Self { gateway, interval: DEFAULT_POLL_INTERVAL }
	}

	/// Overrides the polling interval.
	pub fn with_interval(mut self, interval: StdDuration) -> Self {
		self.interval = interval.max(MIN_POLL_INTERVAL);

		self
	}

	/// Current polling interval.
	pub fn interval(&self) -> StdDuration {
		self.interval
	}

	/// Fetches the feed once.
	pub async fn poll_once(&self) -> Result<NotificationSnapshot> {
		let notifications = self.gateway.notifications().await?;
		let unread = unread_count(&notifications);

		Ok(NotificationSnapshot { notifications, unread })
	}

	/// Polls until the session is rejected, handing every snapshot to `sink`.
	///
	/// Returns the rejection that ended the loop.
	pub async fn run<F>(&self, mut sink: F) -> Error
	where
		F: FnMut(NotificationSnapshot),
	{
		let mut ticker = time::interval(self.interval);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			ticker.tick().await;

			match self.poll_once().await {
				Ok(snapshot) => sink(snapshot),
				Err(e) if e.is_auth_expired() => return e,
				Err(e) => obs::log_warn!("Failed to fetch notifications: {e}"),
			}
		}
	}
}
