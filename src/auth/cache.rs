//! In-memory credential slot owned by a single [`CatalogClient`](crate::client::CatalogClient).

// self
use crate::{_prelude::*, auth::Credential};

/// Thread-safe slot holding the most recently issued [`Credential`].
///
/// Reads and writes take the lock only long enough to clone or swap the value, so it is never
/// held across an `.await`. Concurrent callers that both find the slot empty each perform an
/// exchange; the last writer wins and either token remains usable.
#[derive(Clone, Debug, Default)]
pub struct CredentialCache(Arc<RwLock<Option<Credential>>>);
impl CredentialCache {
	/// Returns the cached credential if it is still valid at `now`.
	pub fn current(&self, now: OffsetDateTime) -> Option<Credential> {
		self.0.read().as_ref().filter(|credential| credential.is_valid_at(now)).cloned()
	}

	/// Replaces the cached credential.
	pub fn store(&self, credential: Credential) {
		*self.0.write() = Some(credential);
	}

	/// Drops the cached credential, returning it if one was present.
	pub fn invalidate(&self) -> Option<Credential> {
		self.0.write().take()
	}

	/// Returns `true` when no credential (valid or not) is cached.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_none()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn current_filters_expired_credentials() {
		let cache = CredentialCache::default();
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		assert!(cache.current(issued).is_none());

		cache.store(Credential::new("fresh", issued, Duration::minutes(10)));

		let current = cache.current(issued).expect("Fresh credential should be returned.");

		assert_eq!(current.access_token.expose(), "fresh");
		assert!(cache.current(issued + Duration::minutes(9)).is_none());
		assert!(!cache.is_empty());
	}

	#[test]
	fn invalidate_clears_the_slot() {
		let cache = CredentialCache::default();
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		cache.store(Credential::new("stale", issued, Duration::hours(1)));

		let dropped = cache.invalidate().expect("Stored credential should be returned.");

		assert_eq!(dropped.access_token.expose(), "stale");
		assert!(cache.is_empty());
		assert!(cache.invalidate().is_none());
	}

	#[test]
	fn independent_caches_do_not_share_state() {
		let first = CredentialCache::default();
		let second = CredentialCache::default();
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		first.store(Credential::new("only-first", issued, Duration::hours(1)));

		assert!(second.current(issued).is_none());
	}
}
