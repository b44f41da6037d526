/// Shows API response types for deserialization.
///
/// These structures mirror the JSON response format of the API, where
/// every payload is wrapped in a `data` key.
use super::{ShowDetails, ShowSummary};
use serde::Deserialize;

/// The `{ "data": ... }` envelope around every response.
#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub data: T,
}

/// Show details as returned by `GET shows/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireShowDetails {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    /// May be empty, but must be present
    pub description: String,
    pub image_url: Option<String>,
}

/// A single row of `GET shows/{id}/episodes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireShowSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub likes_count: Option<i64>,
}

impl From<WireShowDetails> for ShowDetails {
    fn from(wire: WireShowDetails) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            image_url: wire.image_url,
        }
    }
}

impl From<WireShowSummary> for ShowSummary {
    fn from(wire: WireShowSummary) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            image_url: wire.image_url,
            likes_count: wire.likes_count,
        }
    }
}
