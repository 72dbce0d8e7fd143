//! Shared building blocks for the lastwatched backend.
//!
//! Holds the TOML configuration loader and the domain records exchanged
//! between the HTTP layer and the series store.

pub mod config;
pub mod model;

pub use config::Config;
pub use model::{LastWatchedEpisode, SeriesDetail, SeriesItem};
