//! Query execution with one-shot re-authentication.

// crates.io
use reqwest::{
	StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	catalog::{self, CATALOG_ENDPOINT_LABEL, CatalogItem},
	client::CatalogClient,
	error::TransportError,
	http::ResponseMetadata,
	obs::{self, CallKind, CallOutcome, CallSpan, CredentialEvent},
	query::CatalogQuery,
};

const CLIENT_ID_HEADER: &str = "Client-ID";

impl CatalogClient {
	/// Runs a prebuilt query and returns normalized items.
	///
	/// A 401 from the catalog drops the cached credential and re-runs the whole operation,
	/// including the token exchange, at most [`CatalogClient::MAX_AUTH_RETRIES`] times. Any other
	/// non-success status fails with [`Error::Upstream`].
	pub async fn fetch(&self, query: CatalogQuery) -> Result<Vec<CatalogItem>> {
		let kind = CallKind::Query(query.intent);
		let span = CallSpan::new(kind, "fetch");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.fetch_with_reauth(&query)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	async fn fetch_with_reauth(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>> {
		let body = query.to_body();
		let mut retries = 0;

		loop {
			let credential = self.credential().await?;
			let response = self
				.http_client
				.post(self.config.endpoints.catalog.clone())
				.header(CLIENT_ID_HEADER, self.config.client_id.as_str())
				.header(AUTHORIZATION, format!("Bearer {}", credential.access_token.expose()))
				.header(CONTENT_TYPE, "text/plain")
				.body(body.clone())
				.send()
				.await
				.map_err(|e| TransportError::network(CATALOG_ENDPOINT_LABEL, e))?;
			let meta = ResponseMetadata::capture(&response);
			let status = response.status();

			if status == StatusCode::UNAUTHORIZED {
				self.credentials.invalidate();
				obs::record_credential_event(CredentialEvent::Invalidated, None);

				if retries >= Self::MAX_AUTH_RETRIES {
					return Err(Error::Authentication {
						status: meta.status,
						reason: "catalog endpoint rejected a freshly issued credential".into(),
					});
				}

				retries += 1;
				obs::trace_auth_retry(retries, status.as_u16());

				continue;
			}

			let bytes = response
				.bytes()
				.await
				.map_err(|e| TransportError::network(CATALOG_ENDPOINT_LABEL, e))?;

			if !status.is_success() {
				return Err(Error::Upstream {
					status: status.as_u16(),
					body: String::from_utf8_lossy(&bytes).into_owned(),
					retry_after: meta.retry_after,
				});
			}

			let records = catalog::parse_records(&bytes)?;

			return Ok(catalog::normalize(query.apply(records)));
		}
	}
}
