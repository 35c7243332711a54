//! Normalized catalog items handed to callers.

// self
use crate::{
	_prelude::*,
	catalog::{RawCover, RawDescriptor, RawRecord},
};

const THUMB_SIZE: &str = "t_thumb";
const COVER_SIZE: &str = "t_cover_big";

/// Normalized game record.
///
/// `platforms` and `genres` are always present (possibly empty) regardless of what the upstream
/// returned; `background_image` is `null` when no cover URL was supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
	/// Catalog identifier.
	pub id: Option<u64>,
	/// Display name.
	pub name: Option<String>,
	/// Absolute, high-resolution cover URL.
	pub background_image: Option<String>,
	/// Platform descriptors in upstream order.
	pub platforms: Vec<PlatformEntry>,
	/// Genre descriptors in upstream order.
	pub genres: Vec<Descriptor>,
	/// Raw cover reference as supplied upstream.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cover: Option<RawCover>,
	/// Pre-release hype score.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hypes: Option<u64>,
	/// Aggregated user rating.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rating: Option<f64>,
	/// Number of ratings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rating_count: Option<u64>,
	/// First release as a Unix timestamp in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_release_date: Option<i64>,
	/// Short description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// Remaining upstream fields, unchanged.
	#[serde(flatten)]
	pub extra: JsonMap<String, JsonValue>,
}
impl CatalogItem {
	/// First release instant, when the timestamp is representable.
	pub fn released_at(&self) -> Option<OffsetDateTime> {
		self.first_release_date.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
	}
}
impl From<RawRecord> for CatalogItem {
	fn from(raw: RawRecord) -> Self {
		let background_image =
			raw.cover.as_ref().and_then(RawCover::url).map(normalize_cover_url);

		Self {
			id: raw.id,
			name: raw.name,
			background_image,
			platforms: raw
				.platforms
				.unwrap_or_default()
				.into_iter()
				.map(|platform| PlatformEntry { platform: Descriptor::from(platform) })
				.collect(),
			genres: raw.genres.unwrap_or_default().into_iter().map(Descriptor::from).collect(),
			cover: raw.cover,
			hypes: raw.hypes,
			rating: raw.rating,
			rating_count: raw.rating_count,
			first_release_date: raw.first_release_date,
			summary: raw.summary,
			extra: raw.extra,
		}
	}
}

/// Wrapper matching the `{ "platform": { .. } }` shape renderers expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
	/// Platform descriptor.
	pub platform: Descriptor,
}

/// Platform or genre descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
	/// Identifier, falling back to the name when the upstream omitted it.
	pub id: Option<DescriptorId>,
	/// Display name.
	pub name: Option<String>,
}
impl From<RawDescriptor> for Descriptor {
	fn from(raw: RawDescriptor) -> Self {
		match raw {
			RawDescriptor::Bare(id) => Self { id: Some(DescriptorId::Id(id)), name: None },
			RawDescriptor::Expanded { id, name } => Self {
				id: id.map(DescriptorId::Id).or_else(|| name.clone().map(DescriptorId::Name)),
				name,
			},
		}
	}
}

/// Descriptor identifier: numeric when known, otherwise the display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorId {
	/// Numeric catalog identifier.
	Id(u64),
	/// Name used in place of a missing identifier.
	Name(String),
}

/// Upgrades a thumbnail cover URL to the large cover size and makes it absolute.
pub fn normalize_cover_url(url: &str) -> String {
	let upgraded = url.replacen(THUMB_SIZE, COVER_SIZE, 1);

	if upgraded.starts_with("//") { format!("https:{upgraded}") } else { upgraded }
}
