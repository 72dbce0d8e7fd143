//! Domain records exchanged between the HTTP layer and the series store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the series listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesItem {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// The episode most recently marked as watched within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastWatchedEpisode {
    pub id: i64,
    /// Season number the episode belongs to.
    pub season: i32,
    pub episode_number: i32,
}

/// Aggregated view of a single series: metadata, season count, and the
/// last-watched episode when one exists.
///
/// A series with no watched episode yet carries `None` in both last-watched
/// fields; that is a normal state, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetail {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub series_count: i64,
    pub last_watched_episode: Option<LastWatchedEpisode>,
    pub date_of_last_watched_episode: Option<DateTime<Utc>>,
}
