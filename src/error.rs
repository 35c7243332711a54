//! Client-level error types shared by credential acquisition, queries, and normalization.

// self
use crate::{_prelude::*, config::EndpointError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, caller-imposed timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token exchange was rejected, or the catalog rejected a freshly issued credential.
	#[error("Authentication with the catalog failed: {reason}.")]
	Authentication {
		/// HTTP status code returned by the rejecting endpoint.
		status: Option<u16>,
		/// Upstream- or client-supplied reason string.
		reason: String,
	},
	/// Catalog endpoint returned a non-success status other than 401.
	#[error("Catalog request failed with status {status}: {body}")]
	Upstream {
		/// HTTP status code returned by the catalog endpoint.
		status: u16,
		/// Response body kept as diagnostic detail.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Caller supplied an argument outside the accepted range.
	#[error("Invalid argument: {reason}.")]
	InvalidArgument {
		/// Description of the rejected argument.
		reason: String,
	},
	/// Response body could not be decoded.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	Decode {
		/// Label of the endpoint that produced the body.
		endpoint: &'static str,
		/// Structured parsing failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration and validation failures raised before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier or secret is empty.
	#[error("Missing catalog credentials: {field} is not set.")]
	MissingCredentials {
		/// Name of the missing setting.
		field: &'static str,
	},
	/// An endpoint override could not be parsed.
	#[error("Endpoint `{value}` is not a valid URL.")]
	InvalidEndpoint {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint set failed validation.
	#[error(transparent)]
	Endpoint(#[from] EndpointError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Label of the endpoint being called.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error raised while calling `endpoint`.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_error_carries_body() {
		let err = Error::Upstream { status: 500, body: "boom".into(), retry_after: None };

		assert_eq!(err.to_string(), "Catalog request failed with status 500: boom");
	}

	#[test]
	fn missing_credentials_names_the_field() {
		let err: Error = ConfigError::MissingCredentials { field: "client_secret" }.into();

		assert_eq!(err.to_string(), "Missing catalog credentials: client_secret is not set.");
	}
}
