//! Collaborator contracts invoked during session teardown.
//!
//! The identity provider (sign-out) and the host application's router (navigation) live
//! outside this crate. [`SignOut`] and [`Navigator`] are the seams they plug into.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Boxed future returned by [`SignOut::sign_out`].
pub type SignOutFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SignOutError>> + 'a + Send>>;

/// Clears authentication state held by the external identity provider.
pub trait SignOut
where
	Self: Send + Sync,
{
	/// Signs the current identity out. Failures are logged by the caller and never retried.
	fn sign_out(&self) -> SignOutFuture<'_>;
}

/// Failure reported by a [`SignOut`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Sign-out failed: {message}.")]
pub struct SignOutError {
	/// Provider-supplied message.
	pub message: String,
}
impl SignOutError {
	/// Builds an error from any message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

/// [`SignOut`] implementation for hosts without an identity provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSignOut;
impl SignOut for NoopSignOut {
	fn sign_out(&self) -> SignOutFuture<'_> {
		Box::pin(async { Ok(()) })
	}
}

/// Moves the user-facing application to another route.
pub trait Navigator
where
	Self: Send + Sync,
{
	/// Navigates to `path`. Must be safe to call repeatedly with the same path.
	fn navigate(&self, path: &str);
}

/// In-process route holder that records where the application was last sent.
///
/// Hosts without a router of their own can watch [`RouteState::current`] to learn that the
/// session ended and the login screen should be shown.
#[derive(Clone, Debug)]
pub struct RouteState {
	current: Arc<RwLock<String>>,
	transitions: Arc<AtomicU64>,
}
impl RouteState {
	/// Creates a route holder starting at `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self { current: Arc::new(RwLock::new(initial.into())), transitions: Default::default() }
	}

	/// Returns the current route.
	pub fn current(&self) -> String {
		self.current.read().clone()
	}

	/// Returns how many navigations have been requested.
	pub fn transitions(&self) -> u64 {
		self.transitions.load(Ordering::Relaxed)
	}
}
impl Default for RouteState {
	fn default() -> Self {
		Self::new("/")
	}
}
impl Navigator for RouteState {
	fn navigate(&self, path: &str) {
		*self.current.write() = path.to_owned();

		self.transitions.fetch_add(1, Ordering::Relaxed);
	}
}
