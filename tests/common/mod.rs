//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{net::TcpListener, sync::Arc};
// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};
// self
use igdb_catalog::{
	client::CatalogClient,
	clock::ManualClock,
	config::{CatalogConfig, CatalogEndpoints},
	http::ReqwestHttpClient,
	reqwest::Client,
	url::Url,
};

pub const CLIENT_ID: &str = "catalog-client";
pub const CLIENT_SECRET: &str = "catalog-secret";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const GAMES_PATH: &str = "/v4/games";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Builds validated endpoints pointing at the mock server. The mock server terminates TLS on the
/// same port, so the URLs are upgraded to HTTPS.
pub fn test_endpoints(server: &MockServer) -> CatalogEndpoints {
	CatalogEndpoints::builder()
		.token_endpoint(https_url(&server.url(TOKEN_PATH)))
		.catalog_endpoint(https_url(&server.url(GAMES_PATH)))
		.build()
		.expect("Mock endpoints should validate.")
}

fn https_url(raw: &str) -> Url {
	let mut url = Url::parse(raw).expect("Mock endpoint should parse.");

	url.set_scheme("https").expect("Mock endpoint scheme should be replaceable.");

	url
}

/// Constructs a [`CatalogClient`] against the mock server with a [`ManualClock`] the caller
/// can advance.
pub fn build_test_client(
	server: &MockServer,
	client_id: &str,
	client_secret: &str,
) -> (CatalogClient, Arc<ManualClock>) {
	let clock = Arc::new(ManualClock::default());
	let config = CatalogConfig::new(client_id, client_secret, test_endpoints(server));
	let client = CatalogClient::with_http_client(config, test_reqwest_http_client())
		.with_clock(clock.clone());

	(client, clock)
}

/// Registers a token endpoint mock issuing `token` for `expires_in` seconds.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: i64) -> Mock<'a> {
	let body =
		json!({ "access_token": token, "expires_in": expires_in, "token_type": "bearer" }).to_string();

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.query_param("client_id", CLIENT_ID)
				.query_param("client_secret", CLIENT_SECRET)
				.query_param("grant_type", "client_credentials");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// Registers a catalog mock that answers requests bearing `token` with `records`.
pub async fn mock_games<'a>(server: &'a MockServer, token: &str, records: &Value) -> Mock<'a> {
	let bearer = format!("Bearer {token}");
	let body = records.to_string();

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(GAMES_PATH)
				.header("client-id", CLIENT_ID)
				.header("authorization", bearer)
				.header("content-type", "text/plain");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// Raw record with a thumbnail cover and expanded platform/genre references.
pub fn record(id: u64, extra: Value) -> Value {
	let mut value = json!({
		"id": id,
		"name": format!("Game {id}"),
		"cover": { "id": id * 10, "url": format!("//images.igdb.com/igdb/image/upload/t_thumb/{id}.jpg") },
		"platforms": [{ "id": 6, "name": "PC (Microsoft Windows)" }],
		"genres": [{ "id": 12, "name": "Role-playing (RPG)" }]
	});

	if let (Some(target), Some(source)) = (value.as_object_mut(), extra.as_object()) {
		for (key, field) in source {
			target.insert(key.clone(), field.clone());
		}
	}

	value
}

/// Unix timestamp `days` before `now`.
pub fn days_before(now: OffsetDateTime, days: i64) -> i64 {
	(now - Duration::days(days)).unix_timestamp()
}

/// Returns an HTTPS URL on a local port with nothing listening.
pub fn closed_port_url(path: &str) -> Url {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");
	let port = listener.local_addr().expect("Bound listener should have an address.").port();

	drop(listener);

	Url::parse(&format!("https://127.0.0.1:{port}{path}")).expect("Local URL should parse.")
}
