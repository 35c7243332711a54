//! Demonstrates fetching trending games through the catalog client against a local mock of the
//! token and catalog endpoints, including credential reuse across calls.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use igdb_catalog::{
	client::CatalogClient,
	clock::SystemClock,
	config::{CatalogConfig, CatalogEndpoints},
	http::ReqwestHttpClient,
	query::DEFAULT_LIMIT,
	reqwest::Client,
	url::Url,
};

fn https(raw: String) -> Result<Url> {
	let mut url = Url::parse(&raw)?;

	url.set_scheme("https").map_err(|_| color_eyre::eyre::eyre!("Cannot upgrade {raw}."))?;

	Ok(url)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token").query_param("grant_type", "client_credentials");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":5000000}",
			);
		})
		.await;
	let games_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v4/games").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				r#"[
					{"id":1,"name":"Hollow Star","hypes":120,"cover":{"url":"//images.igdb.com/igdb/image/upload/t_thumb/co1.jpg"},"platforms":[{"id":6,"name":"PC (Microsoft Windows)"}],"genres":[{"id":31,"name":"Adventure"}]},
					{"id":2,"name":"Quiet Harbor","hypes":45,"cover":{"url":"//images.igdb.com/igdb/image/upload/t_thumb/co2.jpg"}},
					{"id":3,"name":"No Cover Yet","hypes":300}
				]"#,
			);
		})
		.await;
	let endpoints = CatalogEndpoints::builder()
		.token_endpoint(https(server.url("/oauth2/token"))?)
		.catalog_endpoint(https(server.url("/v4/games"))?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = CatalogClient::with_http_client(
		CatalogConfig::new("demo-client", "super-secret", endpoints),
		http_client,
	)
	.with_clock(Arc::new(SystemClock));

	for item in client.fetch_trending(DEFAULT_LIMIT).await? {
		println!(
			"{} (hype {}): {}",
			item.name.unwrap_or_default(),
			item.hypes.unwrap_or_default(),
			item.background_image.unwrap_or_else(|| "no cover".into()),
		);
	}

	client.fetch_trending(5).await?;

	token_mock.assert_calls_async(1).await;
	games_mock.assert_calls_async(2).await;

	Ok(())
}
