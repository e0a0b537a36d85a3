// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Client for the OMDb movie metadata API.
//!
//! One lookup is one `GET` request; failures are returned, never retried.

use crate::error::GenerateError;
use crate::types::{MovieRecord, absent, parse_cast};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client shared by metadata lookups and poster downloads.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, GenerateError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cardcraft/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// The raw lookup response. Every field is a string; absent ones are `"N/A"`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LookupResponse {
    response: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default = "absent")]
    title: String,
    #[serde(default = "absent")]
    year: String,
    #[serde(default = "absent")]
    genre: String,
    #[serde(default = "absent")]
    director: String,
    #[serde(default = "absent")]
    plot: String,
    #[serde(default = "absent")]
    poster: String,
    #[serde(default = "absent")]
    actors: String,
    #[serde(default = "absent")]
    runtime: String,
    #[serde(default = "absent")]
    language: String,
    #[serde(default = "absent")]
    released: String,
    #[serde(rename = "imdbRating", default = "absent")]
    imdb_rating: String,
    #[serde(rename = "imdbID", default = "absent")]
    imdb_id: String,
}

impl LookupResponse {
    /// Whether the API reported the lookup as failed.
    fn is_failure(&self) -> bool {
        !self.response.trim().eq_ignore_ascii_case("true")
    }

    fn into_record(self) -> Result<MovieRecord, GenerateError> {
        if self.is_failure() {
            return Err(GenerateError::NotFound {
                message: self.error.unwrap_or_else(|| "Movie not found!".to_owned()),
            });
        }

        Ok(MovieRecord {
            cast: parse_cast(&self.actors),
            title: self.title,
            year: self.year,
            genre: self.genre,
            director: self.director,
            rating: self.imdb_rating,
            plot: self.plot,
            runtime: self.runtime,
            language: self.language,
            released: self.released,
            poster: self.poster,
            imdb_id: self.imdb_id,
            ..MovieRecord::default()
        })
    }
}

/// What to look a movie up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Title(String),
    ImdbId(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => write!(f, "\"{title}\""),
            Self::ImdbId(id) => write!(f, "id {id}"),
        }
    }
}

/// HTTP client for the metadata API.
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Creates a client for the public API with the default timeout.
    pub fn new(api_key: String) -> Result<Self, GenerateError> {
        Ok(Self::with_client(
            http_client(DEFAULT_TIMEOUT)?,
            DEFAULT_BASE_URL.to_owned(),
            api_key,
        ))
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    ///
    /// * `base_url` - scheme and host, e.g. `https://www.omdbapi.com`.
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn fetch(&self, lookup: &Lookup) -> Result<MovieRecord, GenerateError> {
        match lookup {
            Lookup::Title(title) => self.fetch_by_title(title).await,
            Lookup::ImdbId(id) => self.fetch_by_id(id).await,
        }
    }

    /// Looks a movie up by (fuzzy) title.
    pub async fn fetch_by_title(&self, title: &str) -> Result<MovieRecord, GenerateError> {
        log::info!("Fetching movie data for \"{title}\"");
        self.lookup("t", title).await
    }

    /// Looks a movie up by IMDb id, e.g. `tt1375666`.
    pub async fn fetch_by_id(&self, imdb_id: &str) -> Result<MovieRecord, GenerateError> {
        log::info!("Fetching movie data for id {imdb_id}");
        self.lookup("i", imdb_id).await
    }

    /// Errors never carry the request URL, since its query holds the API key.
    async fn lookup(&self, key: &str, value: &str) -> Result<MovieRecord, GenerateError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[(key, value), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        // The API answers some failures (e.g. a bad key) with an error status
        // and a regular failure body; that body's message wins.
        let status_error = response
            .error_for_status_ref()
            .err()
            .map(reqwest::Error::without_url);
        let body = response
            .json::<LookupResponse>()
            .await
            .map_err(reqwest::Error::without_url);

        if let Some(status_error) = status_error
            && !body.as_ref().is_ok_and(LookupResponse::is_failure)
        {
            return Err(status_error.into());
        }

        let record = body?.into_record()?;

        log::info!("Found movie: {}", record.heading());
        Ok(record)
    }
}
