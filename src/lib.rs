//! Game catalog client for IGDB.
//!
//! Client-credentials tokens are cached per client and renewed shortly before they expire. A
//! stale token rejected by the catalog is replaced once, and returned records are normalized
//! into [`catalog::CatalogItem`]s ready for rendering.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod catalog;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod query;

mod _prelude {
	pub use std::{
		cmp::Ordering,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
