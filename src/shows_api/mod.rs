/// Data structures and traits for the TV Shows REST API.
///
/// This module provides structures to represent shows, show details and
/// episodes as the screen consumes them, as well as the trait the screen
/// controller talks to when it needs remote data.
mod http;
mod wire;

pub use http::{ApiConfig, DEFAULT_BASE_URL, HttpShowsApi};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the shows API.
///
/// The variants keep the transport, status and payload failures apart for
/// logging; the screen collapses all of them into a single alert.
#[derive(Debug, Error)]
pub enum ShowsApiError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status code
    #[error("HTTP {status} {reason}")]
    Http { status: u16, reason: String },

    /// The response body did not match the expected `{ "data": ... }` shape
    #[error("Failed to parse API response: {0}")]
    Decode(String),
}

impl ShowsApiError {
    /// Short, payload-free name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Decode(_) => "decode",
        }
    }
}

/// A show as it appears in list endpoints.
///
/// Episode lists reuse this shape, so an episode row is a `ShowSummary`
/// whose `id` points back at the show it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub likes_count: Option<i64>,
}

/// The full description of one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// A newly created episode handed back by the add-episode flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// The show this episode was created for
    pub show_id: String,
    pub title: String,
    pub image_url: Option<String>,
}

impl From<Episode> for ShowSummary {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.show_id,
            title: episode.title,
            image_url: episode.image_url,
            likes_count: None,
        }
    }
}

/// Trait for sources of show data.
///
/// Both calls are authorized with the same token. Implementors must not
/// retry; a failure is reported once and the caller decides what to do.
pub trait ShowsApi {
    /// Fetches the details of a single show (`GET shows/{show_id}`).
    fn fetch_show_details(
        &self,
        show_id: &str,
        auth_token: &str,
    ) -> Result<ShowDetails, ShowsApiError>;

    /// Fetches every episode of a show in server order
    /// (`GET shows/{show_id}/episodes`).
    fn fetch_episodes(
        &self,
        show_id: &str,
        auth_token: &str,
    ) -> Result<Vec<ShowSummary>, ShowsApiError>;
}
