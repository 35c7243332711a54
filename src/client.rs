//! The catalog access client: credential caching, query execution, and normalization.

mod credentials;
mod execute;

// self
use crate::{
	_prelude::*,
	auth::CredentialCache,
	catalog::CatalogItem,
	clock::{Clock, SystemClock},
	config::CatalogConfig,
	http::ReqwestHttpClient,
	query::CatalogQuery,
};

/// Read-only access to the game catalog behind a rotating bearer credential.
///
/// Each client built by a constructor owns its own [`CredentialCache`], so independent
/// instances never share tokens; clones share the cache of the client they were cloned from.
/// Credentials are obtained lazily through the client-credentials grant, reused until shortly
/// before they expire, and dropped when the catalog answers 401; the failed call is then retried
/// once with a fresh credential. No other retries, backoff, or timeouts are applied; wrap calls in
/// a timeout if the host needs one.
#[derive(Clone)]
pub struct CatalogClient {
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<ReqwestHttpClient>,
	/// Credentials and endpoints.
	pub config: CatalogConfig,
	/// Time source for credential expiry and release windows.
	pub clock: Arc<dyn Clock>,
	credentials: CredentialCache,
}
impl CatalogClient {
	/// Number of times a query is re-sent after the catalog rejects a credential.
	pub const MAX_AUTH_RETRIES: u8 = 1;

	/// Creates a client with its own redirect-free reqwest transport.
	pub fn new(config: CatalogConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: CatalogConfig,
		http_client: impl Into<Arc<ReqwestHttpClient>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			clock: Arc::new(SystemClock),
			credentials: CredentialCache::default(),
		}
	}

	/// Replaces the time source.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Credential cache owned by this client.
	pub fn credentials(&self) -> &CredentialCache {
		&self.credentials
	}

	/// Drops the cached credential so the next call performs a fresh exchange.
	pub fn invalidate_credential(&self) {
		self.credentials.invalidate();
	}

	/// Most hyped upcoming and current games.
	pub async fn fetch_trending(&self, limit: u32) -> Result<Vec<CatalogItem>> {
		self.fetch(CatalogQuery::trending(limit)?).await
	}

	/// Best rated games with a meaningful number of ratings.
	pub async fn fetch_top_rated(&self, limit: u32) -> Result<Vec<CatalogItem>> {
		self.fetch(CatalogQuery::top_rated(limit)?).await
	}

	/// Games released in the trailing window, computed from the client's clock at call time.
	pub async fn fetch_recent(&self, limit: u32) -> Result<Vec<CatalogItem>> {
		self.fetch(CatalogQuery::recent(limit, self.clock.now())?).await
	}
}
impl Debug for CatalogClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CatalogClient")
			.field("endpoints", &self.config.endpoints)
			.field("client_id", &self.config.client_id)
			.field("client_secret_set", &!self.config.client_secret.is_blank())
			.field("credential_cached", &!self.credentials.is_empty())
			.finish()
	}
}
