//! Bearer credential issued by the token endpoint, plus its wire response.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Bearer credential held in memory for reuse across catalog calls.
///
/// A credential is usable strictly before `expires_at - SAFETY_MARGIN`; the margin keeps a token
/// that is about to lapse from being presented to the catalog endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	/// Bearer token; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the token endpoint issued the credential.
	pub issued_at: OffsetDateTime,
	/// Absolute expiry reported by the token endpoint.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Early-renewal margin applied before the reported expiry.
	pub const SAFETY_MARGIN: Duration = Duration::seconds(60);

	/// Creates a credential issued at `issued_at` that expires after `expires_in`.
	pub fn new(
		access_token: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			issued_at,
			expires_at: issued_at + expires_in,
		}
	}

	/// Instant after which the credential must no longer be reused.
	pub fn renew_at(&self) -> OffsetDateTime {
		self.expires_at - Self::SAFETY_MARGIN
	}

	/// Returns `true` if the credential may be presented at `now`.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		now < self.renew_at()
	}

	/// Remaining reusable lifetime at `now`, clamped at zero.
	pub fn remaining_at(&self, now: OffsetDateTime) -> Duration {
		let remaining = self.renew_at() - now;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// JSON body returned by a successful client-credentials exchange.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
	/// Issued bearer token.
	pub access_token: String,
	/// Lifetime in seconds.
	pub expires_in: i64,
	/// Token type label (`bearer`), when supplied.
	#[serde(default)]
	pub token_type: Option<String>,
}
impl TokenResponse {
	/// Converts the response into a [`Credential`] issued at `now`.
	pub fn into_credential(self, now: OffsetDateTime) -> Result<Credential, ConfigError> {
		if self.expires_in <= 0 {
			return Err(ConfigError::NonPositiveExpiresIn);
		}

		let expires_in = Duration::seconds(self.expires_in);

		now.checked_add(expires_in).ok_or(ConfigError::ExpiresInOutOfRange)?;

		Ok(Credential::new(self.access_token, now, expires_in))
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("token_type", &self.token_type)
			.finish()
	}
}
