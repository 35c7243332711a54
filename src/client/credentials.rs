//! Client-credentials exchange and credential reuse.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenResponse},
	client::CatalogClient,
	error::TransportError,
	http::ResponseMetadata,
	obs::{self, CallKind, CallOutcome, CallSpan, CredentialEvent},
};

const TOKEN_ENDPOINT_LABEL: &str = "token";
const GRANT_TYPE: &str = "client_credentials";

impl CatalogClient {
	/// Returns a credential valid at the client's current time, exchanging a new one if needed.
	///
	/// Missing client credentials fail with [`ConfigError::MissingCredentials`] before any
	/// network call is made.
	///
	/// [`ConfigError::MissingCredentials`]: crate::error::ConfigError::MissingCredentials
	pub async fn credential(&self) -> Result<Credential> {
		self.config.validate()?;

		let now = self.clock.now();

		if let Some(current) = self.credentials.current(now) {
			obs::record_credential_event(CredentialEvent::Reused, Some(current.remaining_at(now)));

			return Ok(current);
		}

		let credential = self.exchange_credential().await?;

		self.credentials.store(credential.clone());
		obs::record_credential_event(
			CredentialEvent::Exchanged,
			Some(credential.remaining_at(self.clock.now())),
		);

		Ok(credential)
	}

	async fn exchange_credential(&self) -> Result<Credential> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "exchange_credential");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result: Result<Credential> = span
			.instrument(async move {
				let response = self
					.http_client
					.post(self.config.endpoints.token.clone())
					.query(&[
						("client_id", self.config.client_id.as_str()),
						("client_secret", self.config.client_secret.expose()),
						("grant_type", GRANT_TYPE),
					])
					.send()
					.await
					.map_err(|e| TransportError::network(TOKEN_ENDPOINT_LABEL, e))?;
				let meta = ResponseMetadata::capture(&response);
				let success = response.status().is_success();
				let body = response
					.bytes()
					.await
					.map_err(|e| TransportError::network(TOKEN_ENDPOINT_LABEL, e))?;

				if !success {
					return Err(Error::Authentication {
						status: meta.status,
						reason: format!(
							"token endpoint rejected the client credentials ({})",
							String::from_utf8_lossy(&body).trim()
						),
					});
				}

				let mut deserializer = serde_json::Deserializer::from_slice(&body);
				let token: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
					.map_err(|source| Error::Decode { endpoint: TOKEN_ENDPOINT_LABEL, source })?;

				Ok(token.into_credential(self.clock.now())?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
