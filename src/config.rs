//! Client configuration: catalog credentials and the endpoint pair they are presented to.
//!
//! Credentials are read once at startup. Missing values are tolerated at construction time so
//! that the rest of a host application keeps working; the client reports
//! [`ConfigError::MissingCredentials`] on first use, before any network call.

mod endpoints;

pub use endpoints::*;

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Environment variable holding the catalog client identifier.
pub const CLIENT_ID_VAR: &str = "TWITCH_CLIENT_ID";
/// Environment variable holding the catalog client secret.
pub const CLIENT_SECRET_VAR: &str = "TWITCH_CLIENT_SECRET";
/// Optional environment override for the token endpoint.
pub const TOKEN_ENDPOINT_VAR: &str = "IGDB_TOKEN_ENDPOINT";
/// Optional environment override for the catalog endpoint.
pub const CATALOG_ENDPOINT_VAR: &str = "IGDB_CATALOG_ENDPOINT";

/// Credentials and endpoints consumed by [`CatalogClient`](crate::client::CatalogClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
	/// Catalog client identifier, also sent as the `Client-ID` header.
	pub client_id: String,
	/// Catalog client secret; redacted in debug output.
	pub client_secret: TokenSecret,
	/// Token and catalog endpoints.
	pub endpoints: CatalogEndpoints,
}
impl CatalogConfig {
	/// Creates a configuration against the provided endpoints.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		endpoints: CatalogEndpoints,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			endpoints,
		}
	}

	/// Creates a configuration against the public Twitch and IGDB endpoints.
	pub fn igdb(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self::new(client_id, client_secret, CatalogEndpoints::igdb()?))
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary key lookup.
	///
	/// Absent credentials become empty strings; endpoint overrides must parse as URLs.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let client_id = lookup(CLIENT_ID_VAR).unwrap_or_default();
		let client_secret = lookup(CLIENT_SECRET_VAR).unwrap_or_default();
		let mut builder = CatalogEndpoints::builder()
			.token_endpoint(endpoints::parse_endpoint(DEFAULT_TOKEN_ENDPOINT)?)
			.catalog_endpoint(endpoints::parse_endpoint(DEFAULT_CATALOG_ENDPOINT)?);

		if let Some(value) = lookup(TOKEN_ENDPOINT_VAR) {
			builder = builder.token_endpoint(endpoints::parse_endpoint(value.trim())?);
		}
		if let Some(value) = lookup(CATALOG_ENDPOINT_VAR) {
			builder = builder.catalog_endpoint(endpoints::parse_endpoint(value.trim())?);
		}

		Ok(Self::new(client_id.trim(), client_secret.trim(), builder.build()?))
	}

	/// Replaces the endpoint pair.
	pub fn with_endpoints(mut self, endpoints: CatalogEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Ensures both credentials are present.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingCredentials { field: "client_id" });
		}
		if self.client_secret.is_blank() {
			return Err(ConfigError::MissingCredentials { field: "client_secret" });
		}

		Ok(())
	}
}
