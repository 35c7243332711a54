//! Catalog records: the loose upstream schema and the normalized items built from it.

pub mod item;
pub mod record;

pub use item::*;
pub use record::*;

// self
use crate::_prelude::*;

/// Endpoint label used in decode and transport errors.
pub(crate) const CATALOG_ENDPOINT_LABEL: &str = "catalog";

/// Decodes a catalog response body into raw records, reporting the failing JSON path.
pub fn parse_records(body: &[u8]) -> Result<Vec<RawRecord>> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { endpoint: CATALOG_ENDPOINT_LABEL, source })
}

/// Normalizes raw records into [`CatalogItem`]s, preserving order.
pub fn normalize(records: Vec<RawRecord>) -> Vec<CatalogItem> {
	records.into_iter().map(CatalogItem::from).collect()
}
