//! lastwatched-server: HTTP API over the series store.
//!
//! Request flow: axum route handler -> [`SeriesStore`] trait object ->
//! MySQL via sqlx. The store is constructor-injected into the application
//! state at startup; handlers never resolve it themselves.

pub mod db;
pub mod http;

pub use db::repos::{MySqlSeriesStore, SeriesStore, StoreError};
pub use http::{run_server, AppState};
