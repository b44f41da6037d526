//! Row mapping for the show details list
//!
//! The details screen renders one flat list: a hero image, a description
//! block, then one row per episode. This module turns a flat row index into
//! the content that row shows.

use crate::shows_api::{ShowDetails, ShowSummary};

/// Shown instead of an empty show description
pub const NO_DESCRIPTION: &str = "No description";

/// Shown instead of an empty episode title
pub const NO_TITLE: &str = "No title";

/// Number of rows above the first episode row
const HEADER_ROWS: usize = 2;

/// Content of the hero image row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    pub url: String,
}

/// Content of the description row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionItem {
    pub title: String,
    pub description: String,
    pub number_of_episodes: usize,
}

/// Content of a single episode row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    pub title: String,
    /// Season/episode label such as `S2 E3`
    pub details: String,
}

/// What a single list row renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Row 0: the show's hero image
    Image(ImageItem),
    /// Row 1: title, description and episode count.
    /// `None` while the show details have not been loaded.
    Description(Option<DescriptionItem>),
    /// Rows 2..: one per episode, in list order
    Episode(EpisodeItem),
}

/// Returns how many rows the list has for the given number of episodes.
///
/// A show without episodes renders nothing at all, not even the header rows.
pub fn total_row_count(episode_count: usize) -> usize {
    if episode_count == 0 {
        0
    } else {
        episode_count + HEADER_ROWS
    }
}

/// Label of the episode shown at `index`.
///
/// The season is always 2 and the episode number counts episode rows from 1.
fn episode_label(index: usize) -> String {
    format!("S2 E{}", index - 1)
}

/// Maps a row index to the content it renders.
///
/// Returns `None` for indices outside `0..total_row_count(episodes.len())`.
/// The image row is deliberately built with an empty url.
pub fn map_row(
    index: usize,
    details: Option<&ShowDetails>,
    episodes: &[ShowSummary],
) -> Option<RowKind> {
    if index >= total_row_count(episodes.len()) {
        return None;
    }

    let row = match index {
        0 => RowKind::Image(ImageItem { url: String::new() }),
        1 => RowKind::Description(details.map(|details| DescriptionItem {
            title: details.title.clone(),
            description: non_empty_or(&details.description, NO_DESCRIPTION),
            number_of_episodes: episodes.len(),
        })),
        _ => {
            let episode = &episodes[index - HEADER_ROWS];
            RowKind::Episode(EpisodeItem {
                title: non_empty_or(&episode.title, NO_TITLE),
                details: episode_label(index),
            })
        }
    };

    Some(row)
}

/// Maps every row of the list, in display order.
pub fn rows(details: Option<&ShowDetails>, episodes: &[ShowSummary]) -> Vec<RowKind> {
    (0..total_row_count(episodes.len()))
        .filter_map(|index| map_row(index, details, episodes))
        .collect()
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
