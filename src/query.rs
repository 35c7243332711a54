//! Catalog query expressions for the three supported intents.
//!
//! A [`CatalogQuery`] renders to the catalog's query language (`fields …; sort …; where …;
//! limit …;`) and can also enforce the same filter, ordering, and limit on decoded records, so
//! callers get the documented result shape even from an upstream that ignores part of a query.

// self
use crate::{_prelude::*, catalog::RawRecord};

/// Result count used when the caller has no preference.
pub const DEFAULT_LIMIT: u32 = 24;
/// Largest page the catalog endpoint serves.
pub const MAX_LIMIT: u32 = 500;
/// Trailing window considered "recent".
pub const RECENT_WINDOW: Duration = Duration::days(90);
/// Minimum number of ratings for a game to rank as top rated.
pub const MIN_RATING_COUNT: i64 = 100;

const BASE_FIELDS: &[&str] = &[
	"name",
	"cover.url",
	"cover.image_id",
	"genres.id",
	"genres.name",
	"platforms.id",
	"platforms.name",
];

/// Named query intents exposed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryIntent {
	/// Most anticipated games by hype score.
	Trending,
	/// Highest rated games with enough ratings to be meaningful.
	TopRated,
	/// Games first released within [`RECENT_WINDOW`].
	Recent,
}
impl QueryIntent {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			QueryIntent::Trending => "trending",
			QueryIntent::TopRated => "top_rated",
			QueryIntent::Recent => "recent",
		}
	}
}
impl Display for QueryIntent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Record fields a query can filter or sort on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	/// `hypes`.
	Hypes,
	/// `rating`.
	Rating,
	/// `rating_count`.
	RatingCount,
	/// `first_release_date`.
	FirstReleaseDate,
	/// `cover`.
	Cover,
}
impl Field {
	/// Query-language field name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Field::Hypes => "hypes",
			Field::Rating => "rating",
			Field::RatingCount => "rating_count",
			Field::FirstReleaseDate => "first_release_date",
			Field::Cover => "cover",
		}
	}

	fn is_present(self, record: &RawRecord) -> bool {
		match self {
			// Bare ids count; the wire predicate is `cover != null`.
			Field::Cover => record.cover.is_some(),
			_ => self.numeric(record).is_some(),
		}
	}

	fn numeric(self, record: &RawRecord) -> Option<f64> {
		match self {
			Field::Hypes => record.hypes.map(|v| v as f64),
			Field::Rating => record.rating,
			Field::RatingCount => record.rating_count.map(|v| v as f64),
			Field::FirstReleaseDate => record.first_release_date.map(|v| v as f64),
			Field::Cover => None,
		}
	}
}

/// Single conjunct of a `where` clause.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Predicate {
	/// `field != null`.
	Present(Field),
	/// `field >= value`.
	AtLeast(Field, i64),
}
impl Predicate {
	/// Evaluates the predicate against a decoded record.
	pub fn matches(&self, record: &RawRecord) -> bool {
		match *self {
			Predicate::Present(field) => field.is_present(record),
			Predicate::AtLeast(field, min) =>
				field.numeric(record).is_some_and(|value| value >= min as f64),
		}
	}
}
impl Display for Predicate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Predicate::Present(field) => write!(f, "{} != null", field.as_str()),
			Predicate::AtLeast(field, min) => write!(f, "{} >= {min}", field.as_str()),
		}
	}
}

/// Immutable query against the catalog endpoint. Sorting is always descending.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogQuery {
	/// Intent this query serves.
	pub intent: QueryIntent,
	/// Projected fields.
	pub fields: Vec<&'static str>,
	/// Conjunctive filter.
	pub filter: Vec<Predicate>,
	/// Descending sort key.
	pub sort: Field,
	/// Maximum number of results.
	pub limit: u32,
}
impl CatalogQuery {
	/// Games with a hype score and a cover, most hyped first.
	pub fn trending(limit: u32) -> Result<Self> {
		Ok(Self {
			intent: QueryIntent::Trending,
			fields: fields_with(&["summary", "hypes"]),
			filter: vec![Predicate::Present(Field::Hypes), Predicate::Present(Field::Cover)],
			sort: Field::Hypes,
			limit: validate_limit(limit)?,
		})
	}

	/// Rated games with at least [`MIN_RATING_COUNT`] ratings and a cover, best first.
	pub fn top_rated(limit: u32) -> Result<Self> {
		Ok(Self {
			intent: QueryIntent::TopRated,
			fields: fields_with(&["rating", "rating_count"]),
			filter: vec![
				Predicate::Present(Field::Rating),
				Predicate::AtLeast(Field::RatingCount, MIN_RATING_COUNT),
				Predicate::Present(Field::Cover),
			],
			sort: Field::Rating,
			limit: validate_limit(limit)?,
		})
	}

	/// Games first released within [`RECENT_WINDOW`] of `now` with a cover, newest first.
	pub fn recent(limit: u32, now: OffsetDateTime) -> Result<Self> {
		let since = (now - RECENT_WINDOW).unix_timestamp();

		Ok(Self {
			intent: QueryIntent::Recent,
			fields: fields_with(&["first_release_date"]),
			filter: vec![
				Predicate::Present(Field::FirstReleaseDate),
				Predicate::AtLeast(Field::FirstReleaseDate, since),
				Predicate::Present(Field::Cover),
			],
			sort: Field::FirstReleaseDate,
			limit: validate_limit(limit)?,
		})
	}

	/// Renders the query-language body sent to the catalog endpoint.
	pub fn to_body(&self) -> String {
		let filter = self.filter.iter().map(ToString::to_string).collect::<Vec<_>>().join(" & ");

		format!(
			"fields {};\nsort {} desc;\nwhere {};\nlimit {};\n",
			self.fields.join(", "),
			self.sort.as_str(),
			filter,
			self.limit,
		)
	}

	/// Returns `true` if the record satisfies every predicate.
	pub fn matches(&self, record: &RawRecord) -> bool {
		self.filter.iter().all(|predicate| predicate.matches(record))
	}

	/// Filters, sorts (descending, stable), and truncates decoded records.
	pub fn apply(&self, mut records: Vec<RawRecord>) -> Vec<RawRecord> {
		records.retain(|record| self.matches(record));
		records.sort_by(|a, b| compare_desc(self.sort.numeric(a), self.sort.numeric(b)));
		records.truncate(self.limit as usize);

		records
	}
}

fn fields_with(extra: &[&'static str]) -> Vec<&'static str> {
	BASE_FIELDS.iter().chain(extra).copied().collect()
}

fn validate_limit(limit: u32) -> Result<u32> {
	if (1..=MAX_LIMIT).contains(&limit) {
		Ok(limit)
	} else {
		Err(Error::InvalidArgument {
			reason: format!("limit must be between 1 and {MAX_LIMIT}, got {limit}"),
		})
	}
}

// Missing values sort last.
fn compare_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => b.total_cmp(&a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::catalog::RawCover;

	fn cover() -> Option<RawCover> {
		Some(RawCover::Expanded {
			id: None,
			url: Some("//img/t_thumb/a.jpg".into()),
			image_id: None,
		})
	}

	#[test]
	fn trending_body_matches_query_language() {
		let query = CatalogQuery::trending(DEFAULT_LIMIT).expect("Default limit should be valid.");

		assert_eq!(
			query.to_body(),
			"fields name, cover.url, cover.image_id, genres.id, genres.name, platforms.id, \
			 platforms.name, summary, hypes;\nsort hypes desc;\nwhere hypes != null & cover != \
			 null;\nlimit 24;\n"
		);
	}

	#[test]
	fn top_rated_body_requires_rating_count() {
		let body = CatalogQuery::top_rated(10).expect("Limit should be valid.").to_body();

		assert!(body.contains("sort rating desc;"));
		assert!(body.contains("where rating != null & rating_count >= 100 & cover != null;"));
		assert!(body.contains("limit 10;"));
	}

	#[test]
	fn recent_cutoff_is_ninety_days_before_now() {
		let now = macros::datetime!(2025-04-01 00:00 UTC);
		let query = CatalogQuery::recent(5, now).expect("Limit should be valid.");
		let since = macros::datetime!(2025-01-01 00:00 UTC).unix_timestamp();

		assert!(query.to_body().contains(&format!(
			"where first_release_date != null & first_release_date >= {since} & cover != null;"
		)));
	}

	#[test]
	fn limits_outside_range_are_rejected() {
		assert!(matches!(CatalogQuery::trending(0), Err(Error::InvalidArgument { .. })));
		assert!(matches!(
			CatalogQuery::top_rated(MAX_LIMIT + 1),
			Err(Error::InvalidArgument { .. })
		));
		assert!(CatalogQuery::trending(MAX_LIMIT).is_ok());
	}

	#[test]
	fn apply_filters_sorts_and_truncates() {
		let query = CatalogQuery::trending(2).expect("Limit should be valid.");
		let records = vec![
			RawRecord { id: Some(1), hypes: Some(5), cover: cover(), ..RawRecord::default() },
			RawRecord { id: Some(2), hypes: None, cover: cover(), ..RawRecord::default() },
			RawRecord { id: Some(3), hypes: Some(50), cover: cover(), ..RawRecord::default() },
			RawRecord { id: Some(4), hypes: Some(99), cover: None, ..RawRecord::default() },
			RawRecord { id: Some(5), hypes: Some(20), cover: cover(), ..RawRecord::default() },
		];
		let ids = query.apply(records).into_iter().map(|r| r.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![Some(3), Some(5)]);
	}

	#[test]
	fn top_rated_excludes_thinly_rated_games() {
		let query = CatalogQuery::top_rated(DEFAULT_LIMIT).expect("Limit should be valid.");
		let thin = RawRecord {
			rating: Some(99.0),
			rating_count: Some(99),
			cover: cover(),
			..RawRecord::default()
		};
		let solid = RawRecord { rating_count: Some(100), ..thin.clone() };

		assert!(!query.matches(&thin));
		assert!(query.matches(&solid));
	}

	#[test]
	fn recent_window_boundaries() {
		let now = macros::datetime!(2025-04-01 12:00 UTC);
		let query = CatalogQuery::recent(DEFAULT_LIMIT, now).expect("Limit should be valid.");
		let at = |days: i64| RawRecord {
			first_release_date: Some((now - Duration::days(days)).unix_timestamp()),
			cover: cover(),
			..RawRecord::default()
		};

		assert!(query.matches(&at(89)));
		assert!(query.matches(&at(90)));
		assert!(!query.matches(&at(91)));
	}

	#[test]
	fn descending_sort_keeps_ties_stable() {
		let query = CatalogQuery::trending(DEFAULT_LIMIT).expect("Limit should be valid.");
		let records = vec![
			RawRecord { id: Some(1), hypes: Some(7), cover: cover(), ..RawRecord::default() },
			RawRecord { id: Some(2), hypes: Some(7), cover: cover(), ..RawRecord::default() },
		];
		let ids = query.apply(records).into_iter().map(|r| r.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![Some(1), Some(2)]);
	}
}
