// self
use crate::{_prelude::*, error::ConfigError};

/// Default Twitch token endpoint for client-credentials exchanges.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://id.twitch.tv/oauth2/token";
/// Default IGDB games query endpoint.
pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://api.igdb.com/v4/games";

/// Errors raised while constructing or validating endpoint sets.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointError {
	/// Token endpoint is mandatory.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Catalog endpoint is mandatory.
	#[error("Missing catalog endpoint.")]
	MissingCatalogEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Validated endpoint pair used by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEndpoints {
	/// OAuth2 token endpoint accepting the client-credentials grant.
	pub token: Url,
	/// Catalog query endpoint accepting query-language bodies.
	pub catalog: Url,
}
impl CatalogEndpoints {
	/// Creates a new builder with no endpoints set.
	pub fn builder() -> CatalogEndpointsBuilder {
		CatalogEndpointsBuilder::default()
	}

	/// Returns the public Twitch token endpoint paired with the IGDB games endpoint.
	pub fn igdb() -> Result<Self, ConfigError> {
		Ok(Self::builder()
			.token_endpoint(parse_endpoint(DEFAULT_TOKEN_ENDPOINT)?)
			.catalog_endpoint(parse_endpoint(DEFAULT_CATALOG_ENDPOINT)?)
			.build()?)
	}

	fn validate(&self) -> Result<(), EndpointError> {
		validate_endpoint("token", &self.token)?;
		validate_endpoint("catalog", &self.catalog)?;

		Ok(())
	}
}

/// Builder for [`CatalogEndpoints`].
#[derive(Debug, Default)]
pub struct CatalogEndpointsBuilder {
	/// Token endpoint used for client-credentials exchanges.
	pub token_endpoint: Option<Url>,
	/// Catalog endpoint used for queries.
	pub catalog_endpoint: Option<Url>,
}
impl CatalogEndpointsBuilder {
	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the catalog endpoint.
	pub fn catalog_endpoint(mut self, url: Url) -> Self {
		self.catalog_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting endpoints.
	pub fn build(self) -> Result<CatalogEndpoints, EndpointError> {
		let token = self.token_endpoint.ok_or(EndpointError::MissingTokenEndpoint)?;
		let catalog = self.catalog_endpoint.ok_or(EndpointError::MissingCatalogEndpoint)?;
		let endpoints = CatalogEndpoints { token, catalog };

		endpoints.validate()?;

		Ok(endpoints)
	}
}

/// Parses a raw endpoint value, mapping failures into [`ConfigError::InvalidEndpoint`].
pub(crate) fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
	Url::parse(value)
		.map_err(|source| ConfigError::InvalidEndpoint { value: value.to_owned(), source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointError> {
	if url.scheme() != "https" {
		Err(EndpointError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
