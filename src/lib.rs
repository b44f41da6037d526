//! show_details - TV show details and episode list
//!
//! This library provides the core of the show details screen: loading a show
//! and its episodes from the TV Shows API, keeping the screen's view state,
//! and mapping that state onto list rows.

mod details_loader;
mod keyboard_inset;
mod row_mapper;
mod session;
mod shows_api;

// Re-export error types
pub use details_loader::LoadError;
pub use session::SessionError;
pub use shows_api::ShowsApiError;

pub use details_loader::{
    ALERT_MESSAGE, ALERT_TITLE, DetailsLoader, LoadState, ScreenEvent, ScreenInput, ViewState,
};
pub use keyboard_inset::{EdgeInsets, keyboard_insets};
pub use row_mapper::{
    DescriptionItem, EpisodeItem, ImageItem, NO_DESCRIPTION, NO_TITLE, RowKind, map_row, rows,
    total_row_count,
};
pub use session::{Session, SessionStore};
pub use shows_api::{
    ApiConfig, DEFAULT_BASE_URL, Episode, HttpShowsApi, ShowDetails, ShowSummary, ShowsApi,
};

use thiserror::Error;

/// Top-level error type for show_details operations
#[derive(Debug, Error)]
pub enum ShowDetailsError {
    /// The API client could not be set up
    #[error("API client error: {0}")]
    Api(#[from] ShowsApiError),

    /// Loading the show failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Error during session storage
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Opens the details screen for a show and performs the initial load
///
/// This function creates an HTTP client for the given configuration, fetches
/// the show details followed by its episode list, and hands back the loader
/// holding the resulting view state. Further episodes can be appended to it
/// with [`DetailsLoader::add_episode`].
///
/// Screen events are emitted through the provided callback, allowing library
/// users to drive a spinner, re-render the list, or remain silent.
///
/// # Arguments
///
/// * `input` - The show to open and the token to authorize with
/// * `config` - Where the API lives and how long requests may take
/// * `on_event` - Closure called with screen events (can be empty for silent operation)
///
/// # Examples
///
/// ```no_run
/// use show_details::{open_show_details, ApiConfig, ScreenEvent, ScreenInput};
///
/// let loader = open_show_details(
///     ScreenInput {
///         show_id: "42".to_string(),
///         auth_token: "token".to_string(),
///     },
///     ApiConfig::default(),
///     |event| {
///         if let ScreenEvent::ListChanged { row_count } = event {
///             println!("{} rows", row_count);
///         }
///     },
/// )
/// .unwrap();
///
/// for row in loader.rows() {
///     println!("{:?}", row);
/// }
/// ```
pub fn open_show_details<F>(
    input: ScreenInput,
    config: ApiConfig,
    mut on_event: F,
) -> Result<DetailsLoader<HttpShowsApi>, ShowDetailsError>
where
    F: FnMut(ScreenEvent),
{
    let api = HttpShowsApi::new(config)?;
    let mut loader = DetailsLoader::new(api, input);

    loader.load_details(&mut on_event)?;

    Ok(loader)
}
