// self
use crate::{
	_prelude::*,
	obs::{CallKind, CredentialEvent},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("igdb_catalog.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a credential lifecycle change. Never logs the token itself.
pub fn trace_credential_event(event: CredentialEvent, remaining: Option<Duration>) {
	#[cfg(feature = "tracing")]
	{
		let remaining_secs = remaining.map(|d| d.whole_seconds());

		tracing::debug!(event = event.as_str(), remaining_secs, "catalog credential");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (event, remaining);
	}
}

/// Emits a warning when the catalog rejects a credential and the call is retried.
pub fn trace_auth_retry(attempt: u8, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(attempt, status, "catalog rejected credential; re-authenticating");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, status);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::query::QueryIntent;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Query(QueryIntent::Trending), "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn trace_helpers_noop_without_tracing() {
		trace_credential_event(CredentialEvent::Exchanged, Some(Duration::hours(1)));
		trace_auth_retry(1, 401);
	}
}
