//! Loosely typed records as returned by the catalog endpoint.

// self
use crate::_prelude::*;

/// Raw game record. Every field may be absent or `null`; unknown fields are preserved in
/// [`RawRecord::extra`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
	/// Catalog identifier.
	#[serde(default)]
	pub id: Option<u64>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Cover image reference, expanded or a bare id.
	#[serde(default)]
	pub cover: Option<RawCover>,
	/// Platform references, expanded or bare ids.
	#[serde(default)]
	pub platforms: Option<Vec<RawDescriptor>>,
	/// Genre references, expanded or bare ids.
	#[serde(default)]
	pub genres: Option<Vec<RawDescriptor>>,
	/// Pre-release hype score.
	#[serde(default)]
	pub hypes: Option<u64>,
	/// Aggregated user rating.
	#[serde(default)]
	pub rating: Option<f64>,
	/// Number of ratings behind [`RawRecord::rating`].
	#[serde(default)]
	pub rating_count: Option<u64>,
	/// First release as a Unix timestamp in seconds.
	#[serde(default)]
	pub first_release_date: Option<i64>,
	/// Short description.
	#[serde(default)]
	pub summary: Option<String>,
	/// Every other field, passed through untouched.
	#[serde(flatten)]
	pub extra: JsonMap<String, JsonValue>,
}

/// Cover image reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCover {
	/// Bare numeric reference (the upstream did not expand the field).
	Bare(u64),
	/// Expanded reference.
	Expanded {
		/// Cover identifier.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		id: Option<u64>,
		/// Image URL, usually protocol-relative and thumbnail-sized.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		url: Option<String>,
		/// Image hash used by the image CDN.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		image_id: Option<String>,
	},
}
impl RawCover {
	/// Image URL as supplied upstream; bare references carry none.
	pub fn url(&self) -> Option<&str> {
		match self {
			RawCover::Bare(_) => None,
			RawCover::Expanded { url, .. } => url.as_deref(),
		}
	}
}

/// Platform or genre reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDescriptor {
	/// Bare numeric reference (the upstream did not expand the field).
	Bare(u64),
	/// Expanded reference.
	Expanded {
		/// Reference identifier.
		#[serde(default)]
		id: Option<u64>,
		/// Reference display name.
		#[serde(default)]
		name: Option<String>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn null_and_missing_fields_are_equivalent() {
		let raw: RawRecord = serde_json::from_str(
			r#"{"id":1,"name":"Null Game","cover":null,"platforms":null,"summary":null}"#,
		)
		.expect("Null fields should deserialize.");

		assert_eq!(raw.id, Some(1));
		assert!(raw.cover.is_none());
		assert!(raw.platforms.is_none());
		assert!(raw.genres.is_none());
		assert!(raw.extra.is_empty());
	}

	#[test]
	fn descriptors_accept_bare_and_expanded_forms() {
		let raw: RawRecord =
			serde_json::from_str(r#"{"platforms":[6,{"id":48,"name":"PlayStation 4"},{"name":"Xbox"}]}"#)
				.expect("Mixed descriptors should deserialize.");

		assert_eq!(
			raw.platforms,
			Some(vec![
				RawDescriptor::Bare(6),
				RawDescriptor::Expanded { id: Some(48), name: Some("PlayStation 4".into()) },
				RawDescriptor::Expanded { id: None, name: Some("Xbox".into()) },
			])
		);
	}

	#[test]
	fn covers_accept_bare_and_expanded_forms() {
		let raw: Vec<RawRecord> = serde_json::from_str(
			r#"[{"cover":123},{"cover":{"id":9,"url":"//img/t_thumb/a.jpg"}},{"cover":{}}]"#,
		)
		.expect("Mixed covers should deserialize.");
		let covers = raw.iter().map(|record| record.cover.clone()).collect::<Vec<_>>();

		assert_eq!(covers[0], Some(RawCover::Bare(123)));
		assert_eq!(covers[0].as_ref().and_then(RawCover::url), None);
		assert_eq!(covers[1].as_ref().and_then(RawCover::url), Some("//img/t_thumb/a.jpg"));
		assert_eq!(
			covers[2],
			Some(RawCover::Expanded { id: None, url: None, image_id: None })
		);
	}

	#[test]
	fn unknown_fields_are_preserved() {
		let raw: RawRecord =
			serde_json::from_str(r#"{"id":7,"slug":"seven","total_rating":88.5}"#)
				.expect("Unknown fields should deserialize.");

		assert_eq!(raw.extra.get("slug"), Some(&JsonValue::from("seven")));
		assert_eq!(raw.extra.get("total_rating"), Some(&JsonValue::from(88.5)));
	}
}
