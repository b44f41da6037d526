//! Screen controller for the show details screen
//!
//! The loader owns the screen's view state and is the only place it changes:
//! a load replaces details and episodes wholesale, and a locally created
//! episode is appended without asking the server again.

use crate::row_mapper::{self, RowKind};
use crate::shows_api::{Episode, ShowDetails, ShowSummary, ShowsApi, ShowsApiError};
use thiserror::Error;

/// Title of the alert shown when loading fails
pub const ALERT_TITLE: &str = "API error";

/// Message of the alert shown when loading fails
pub const ALERT_MESSAGE: &str = "Something went wrong";

/// Errors surfaced to the screen.
///
/// Every API failure ends up here as the same user-facing error; the
/// underlying cause is kept only as the error source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("API error: Something went wrong")]
    RemoteFetchFailed(#[source] ShowsApiError),
}

/// What the screen was opened for. Both values are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInput {
    pub show_id: String,
    pub auth_token: String,
}

/// Whether a load is in flight and how the last one ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Carries the generic, user-facing reason
    Failed(String),
}

impl LoadState {
    /// Whether the spinner should be visible
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Everything the screen renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub load_state: LoadState,
    /// `None` until a details request succeeded
    pub details: Option<ShowDetails>,
    /// Server order from the last load, followed by locally added episodes
    pub episodes: Vec<ShowSummary>,
}

/// Notification emitted by the loader whenever the view needs to react
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The spinner should follow the new state
    LoadingChanged(LoadState),
    /// The list content changed and must be re-rendered
    ListChanged { row_count: usize },
    /// A blocking alert should be shown to the user
    Alert { title: String, message: String },
}

/// Loads a show and its episodes, and keeps the resulting view state.
pub struct DetailsLoader<A>
where
    A: ShowsApi,
{
    api: A,
    input: ScreenInput,
    state: ViewState,
}

impl<A> DetailsLoader<A>
where
    A: ShowsApi,
{
    /// Creates a loader in the `Idle` state with no data.
    pub fn new(api: A, input: ScreenInput) -> Self {
        Self {
            api,
            input,
            state: ViewState::default(),
        }
    }

    pub fn input(&self) -> &ScreenInput {
        &self.input
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Maps the current view state to list rows.
    pub fn rows(&self) -> Vec<RowKind> {
        row_mapper::rows(self.state.details.as_ref(), &self.state.episodes)
    }

    /// Fetches the show details and then its episodes.
    ///
    /// The episode request is only sent once the details arrived. The state
    /// moves to `Loading` before the first request and to exactly one of
    /// `Loaded` or `Failed` afterwards. Details are kept as soon as they
    /// arrive, even if the episode request then fails. On failure the
    /// episode list is left as it was and an alert event is emitted.
    pub fn load_details<F>(
        &mut self,
        mut on_event: F,
    ) -> Result<(ShowDetails, Vec<ShowSummary>), LoadError>
    where
        F: FnMut(ScreenEvent),
    {
        self.transition(LoadState::Loading, &mut on_event);

        match self.fetch_details_and_episodes() {
            Ok((details, episodes)) => {
                self.state.episodes = episodes.clone();
                self.transition(LoadState::Loaded, &mut on_event);
                on_event(ScreenEvent::ListChanged {
                    row_count: row_mapper::total_row_count(self.state.episodes.len()),
                });

                Ok((details, episodes))
            }
            Err(e) => {
                tracing::warn!(
                    show_id = %self.input.show_id,
                    kind = e.kind(),
                    "loading show details failed"
                );
                self.transition(LoadState::Failed(ALERT_MESSAGE.to_string()), &mut on_event);
                on_event(ScreenEvent::Alert {
                    title: ALERT_TITLE.to_string(),
                    message: ALERT_MESSAGE.to_string(),
                });

                Err(LoadError::RemoteFetchFailed(e))
            }
        }
    }

    /// Appends a newly created episode to the end of the list.
    ///
    /// Nothing is sent to the server and the load state is left untouched.
    pub fn add_episode<F>(&mut self, episode: Episode, mut on_event: F)
    where
        F: FnMut(ScreenEvent),
    {
        tracing::debug!(title = %episode.title, "appending episode");
        self.state.episodes.push(episode.into());
        on_event(ScreenEvent::ListChanged {
            row_count: row_mapper::total_row_count(self.state.episodes.len()),
        });
    }

    fn fetch_details_and_episodes(
        &mut self,
    ) -> Result<(ShowDetails, Vec<ShowSummary>), ShowsApiError> {
        let ScreenInput {
            show_id,
            auth_token,
        } = &self.input;

        tracing::debug!(%show_id, "fetching show details");
        let details = self.api.fetch_show_details(show_id, auth_token)?;
        self.state.details = Some(details.clone());

        tracing::debug!(%show_id, "fetching episodes");
        let episodes = self.api.fetch_episodes(show_id, auth_token)?;

        tracing::debug!(%show_id, count = episodes.len(), "show loaded");
        Ok((details, episodes))
    }

    fn transition<F>(&mut self, next: LoadState, on_event: &mut F)
    where
        F: FnMut(ScreenEvent),
    {
        self.state.load_state = next.clone();
        on_event(ScreenEvent::LoadingChanged(next));
    }
}
