//! Optional observability helpers for gateway requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `tuition_gateway.request` with the `method`
//!   and `stage` fields, plus debug/warn events from the logging middleware and teardown.
//! - Enable `metrics` to increment the `tuition_gateway_request_total` counter for every
//!   attempt/success/auth_expired/failure, labeled by `outcome`, and the
//!   `tuition_gateway_session_teardown_total` counter for every teardown.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to [`Gateway::send`](crate::gateway::Gateway::send).
	Attempt,
	/// 2xx response.
	Success,
	/// 401/403 response that triggered teardown.
	AuthExpired,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::AuthExpired => "auth_expired",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

macro_rules! log_debug {
	($($arg:tt)*) => {{
		#[cfg(feature = "tracing")]
		{
			::tracing::debug!($($arg)*);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = format_args!($($arg)*);
		}
	}};
}
macro_rules! log_warn {
	($($arg:tt)*) => {{
		#[cfg(feature = "tracing")]
		{
			::tracing::warn!($($arg)*);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = format_args!($($arg)*);
		}
	}};
}
pub(crate) use log_debug;
pub(crate) use log_warn;
