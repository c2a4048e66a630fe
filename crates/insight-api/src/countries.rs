//! Pass-through to the public country-data API, used by the front end to
//! show facts about the country a post is about.

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct CountryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CountryClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("country API URL '{base_url}' cannot take path segments");
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url })
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    /// `new` guarantees the base accepts path segments.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Every country, optionally restricted to a comma-separated field list.
    pub async fn all(&self, fields: Option<&str>) -> Result<Value, ApiError> {
        let mut url = self.url(&["all"]);
        if let Some(fields) = fields {
            url.query_pairs_mut().append_pair("fields", fields);
        }
        self.fetch(url)
            .await?
            .ok_or_else(|| ApiError::NotFound("No countries found".into()))
    }

    /// The first country whose full name matches `name`.
    pub async fn by_name(&self, name: &str) -> Result<Option<Value>, ApiError> {
        let mut url = self.url(&["name", name]);
        url.query_pairs_mut().append_pair("fullText", "true");
        Ok(self.fetch(url).await?.and_then(first_match))
    }

    pub async fn by_code(&self, code: &str) -> Result<Option<Value>, ApiError> {
        let url = self.url(&["alpha", code]);
        Ok(self.fetch(url).await?.and_then(first_match))
    }

    async fn fetch(&self, url: Url) -> Result<Option<Value>, ApiError> {
        debug!(%url, "Fetching country data");
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }
}

/// The upstream answers lookups with an array of matches.
fn first_match(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub fields: Option<String>,
}

pub async fn list_countries(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CountryQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.countries.all(query.fields.as_deref()).await?))
}

pub async fn country_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let country = state
        .countries
        .by_name(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Country not found".into()))?;

    Ok(Json(country))
}

pub async fn country_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let country = state
        .countries
        .by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Country not found".into()))?;

    Ok(Json(country))
}
