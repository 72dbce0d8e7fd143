//! Repositories over the series tables.

pub mod series;

pub use series::{MySqlSeriesStore, SeriesStore, StoreError};
