//! Optional observability helpers for catalog calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `igdb_catalog.call` with the `call` (token
//!   exchange or query intent) and `stage` (call site) fields, plus debug events for credential
//!   reuse, exchange, and invalidation.
//! - Enable `metrics` to increment the `igdb_catalog_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the
//!   `igdb_catalog_credential_invalidated_total` counter whenever a 401 drops the credential.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, query::QueryIntent};

/// Outbound call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the token endpoint.
	TokenExchange,
	/// Catalog query for the given intent.
	Query(QueryIntent),
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::Query(intent) => intent.as_str(),
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Credential lifecycle events worth logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialEvent {
	/// A cached credential was reused.
	Reused,
	/// A new credential was obtained from the token endpoint.
	Exchanged,
	/// The cached credential was dropped after the catalog rejected it.
	Invalidated,
}
impl CredentialEvent {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialEvent::Reused => "reused",
			CredentialEvent::Exchanged => "exchanged",
			CredentialEvent::Invalidated => "invalidated",
		}
	}
}

/// Records a credential lifecycle event in logs and, for invalidations, metrics.
///
/// `remaining` is the reusable lifetime left on the credential involved, when there is one.
pub fn record_credential_event(event: CredentialEvent, remaining: Option<Duration>) {
	trace_credential_event(event, remaining);

	if matches!(event, CredentialEvent::Invalidated) {
		record_credential_invalidated();
	}
}
