// self
use crate::obs::{CallKind, CallOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"igdb_catalog_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts credential invalidations triggered by catalog 401 responses (when enabled).
pub fn record_credential_invalidated() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("igdb_catalog_credential_invalidated_total").increment(1);
	}
}
