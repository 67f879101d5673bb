// self
use crate::obs::RequestOutcome;

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("tuition_gateway_request_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a session teardown via the global metrics recorder (when enabled).
pub fn record_session_teardown() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("tuition_gateway_session_teardown_total").increment(1);
	}
}
