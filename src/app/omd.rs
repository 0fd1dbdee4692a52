use image::DynamicImage;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::app::movie::{Movie, MovieLinks};
use crate::config::OmdbConfig;
use crate::error::{Error, Result};

/// Raw OMDb title lookup payload. Every field is optional because failures
/// only carry `Response` and `Error`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbResponse {
    pub response: Option<String>,
    pub title: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub error: Option<String>,
}

/// Outcome of a title lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Found(Movie),
    NotFound { reason: String },
}

impl LookupResult {
    fn not_found(reason: impl Into<String>) -> Self {
        LookupResult::NotFound {
            reason: reason.into(),
        }
    }
}

/// Source of movie data. Implementations must never let transport errors
/// escape `find_by_title`.
pub trait MovieLookup: Send + Sync {
    fn find_by_title(&self, title: &str) -> LookupResult;

    fn fetch_poster(&self, url: &str) -> Result<DynamicImage>;
}

/// Maps an OMDb response body into a lookup result.
pub fn parse_lookup(body: &str, links: &MovieLinks) -> LookupResult {
    let payload: OmdbResponse = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => return LookupResult::not_found(Error::from(e).to_string()),
    };

    // OMDb reports misses with a textual flag, not a status code
    if payload.response.as_deref() == Some("False") {
        return LookupResult::not_found(
            payload.error.unwrap_or_else(|| "Movie not found!".to_string()),
        );
    }

    let (Some(title), Some(imdb_id)) = (payload.title.as_deref(), payload.imdb_id.as_deref())
    else {
        return LookupResult::not_found("response is missing Title or imdbID");
    };

    match Movie::new(
        title,
        payload.plot.as_deref(),
        payload.poster.as_deref(),
        imdb_id,
        links,
    ) {
        Some(movie) => LookupResult::Found(movie),
        None => LookupResult::not_found("response has a blank Title or imdbID"),
    }
}

/// Builds the title search URL for the OMDb API
pub fn search_url(config: &OmdbConfig, title: &str) -> String {
    format!(
        "{}?apikey={}&t={}",
        config.base_url,
        config.api_key,
        urlencoding::encode(title)
    )
}

/// OMDb client backed by a blocking reqwest client.
pub struct OmdbClient {
    http: reqwest::blocking::Client,
    config: OmdbConfig,
    links: MovieLinks,
}

impl OmdbClient {
    pub fn new(config: OmdbConfig, links: MovieLinks) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("movie_finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            links,
        })
    }

    fn get_body(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send()?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        Ok(response.text()?)
    }
}

impl MovieLookup for OmdbClient {
    fn find_by_title(&self, title: &str) -> LookupResult {
        debug!(title, "searching OMDb");

        let body = match self.get_body(&search_url(&self.config, title)) {
            Ok(body) => body,
            Err(e) => {
                warn!(title, error = %e, "OMDb request failed");
                return LookupResult::not_found(e.to_string());
            }
        };

        let result = parse_lookup(&body, &self.links);
        match &result {
            LookupResult::Found(movie) => {
                debug!(title, imdb_id = movie.imdb_id(), "OMDb match")
            }
            LookupResult::NotFound { reason } => warn!(title, reason = %reason, "no OMDb match"),
        }
        result
    }

    /// Downloads and decodes a movie poster
    fn fetch_poster(&self, url: &str) -> Result<DynamicImage> {
        let response = self.http.get(url).send()?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        let bytes = response.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}
