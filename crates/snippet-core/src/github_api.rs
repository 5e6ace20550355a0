use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use thiserror::Error;

pub const SEARCH_ENDPOINT: &str = "https://api.github.com/search/issues";
pub const REPOSITORY_API_PREFIX: &str = "https://api.github.com/repos/";
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3.text-match+json";
const USER_AGENT: &str = "snippet-cli/0.1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub repository_url: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// One blocking round trip against the issue search endpoint. No retry,
/// no pagination follow-up: callers get exactly one request per run.
pub fn search_pull_requests(token: &str, query: &str) -> Result<SearchResults, GithubApiError> {
    let client = reqwest::blocking::Client::new();

    let response = client
        .get(SEARCH_ENDPOINT)
        .header(reqwest::header::AUTHORIZATION, format!("token {token}"))
        .header(reqwest::header::ACCEPT, ACCEPT_MEDIA_TYPE)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .query(&[("q", query)])
        .send()
        .map_err(|source| GithubApiError::Transport { source })?;

    let status_code = response.status().as_u16();
    let body = response
        .text()
        .map_err(|source| GithubApiError::Transport { source })?;

    if !(200..=299).contains(&status_code) {
        eprintln!("warning: github search returned HTTP {status_code}");
    }

    parse_search_response(status_code, &body)
}

/// Decodes one search response. A body that decodes as a result set is
/// accepted whatever the status; on an error status a non-decodable
/// body surfaces the API's own error message when it carries one.
pub fn parse_search_response(
    status_code: u16,
    body: &str,
) -> Result<SearchResults, GithubApiError> {
    let payload: SearchResponse = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(source) if (200..=299).contains(&status_code) => {
            return Err(GithubApiError::InvalidResponse(source));
        }
        Err(_) => {
            let message =
                extract_error_message(body).unwrap_or_else(|| format!("HTTP {status_code}"));
            return Err(GithubApiError::Http {
                status: status_code,
                message,
            });
        }
    };

    let items = payload
        .items
        .into_iter()
        .map(|item| {
            if !item.repository_url.starts_with(REPOSITORY_API_PREFIX) {
                return Err(GithubApiError::MalformedRepositoryUrl(item.repository_url));
            }

            Ok(SearchItem {
                id: item.id,
                number: item.number,
                title: item.title,
                url: item.html_url,
                repository_url: item.repository_url,
                created_at: item.created_at,
                updated_at: item.updated_at,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchResults {
        total_count: payload.total_count,
        incomplete_results: payload.incomplete_results,
        items,
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    first_non_empty_string(&[
        value.get("message").and_then(serde_json::Value::as_str),
        value
            .get("errors")
            .and_then(|errors| errors.get(0))
            .and_then(|error| error.get("message"))
            .and_then(serde_json::Value::as_str),
    ])
}

fn first_non_empty_string(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error("github search request failed")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("github search error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid github search response")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("unexpected repository url: {0}")]
    MalformedRepositoryUrl(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
    incomplete_results: bool,
    items: Vec<ItemPayload>,
}

#[derive(Debug, Deserialize)]
struct ItemPayload {
    id: u64,
    number: u64,
    title: String,
    html_url: String,
    repository_url: String,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
}
