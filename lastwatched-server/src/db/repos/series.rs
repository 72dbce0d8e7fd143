//! Series repository: listing, detail aggregation, transactional creation,
//! update, and delete over the tv_series/season/episode tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

use lastwatched_core::model::{LastWatchedEpisode, SeriesDetail, SeriesItem};

/// Storage error type.
///
/// `NotFound` is a distinct variant so callers branch on kind instead of
/// matching message text.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("series {series_id} not found")]
    NotFound { series_id: i64 },
}

/// Operations on tracked series.
///
/// The HTTP layer depends on this trait object; tests substitute a double.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// List series whose name contains `search`, paged by limit/skip.
    ///
    /// An empty `search` matches everything. No rows is an empty Vec, not an
    /// error; a storage failure discards any partially scanned rows.
    async fn list(
        &self,
        search: &str,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<SeriesItem>, StoreError>;

    /// Aggregate a single series: metadata, season count, and the episode
    /// most recently marked as watched.
    async fn detail(&self, series_id: i64) -> Result<SeriesDetail, StoreError>;

    /// Create a series together with `season_count` seasons of
    /// `episodes_per_season` unwatched episodes each, atomically.
    async fn create(
        &self,
        name: &str,
        url: &str,
        season_count: u32,
        episodes_per_season: u32,
    ) -> Result<SeriesDetail, StoreError>;

    /// Update name and url of a series, then return its fresh detail.
    async fn update(
        &self,
        series_id: i64,
        name: &str,
        url: &str,
    ) -> Result<SeriesDetail, StoreError>;

    /// Delete a series by id.
    ///
    /// Deleting an absent id is not an error here; callers check existence
    /// first when they need the distinction.
    async fn delete(&self, series_id: i64) -> Result<(), StoreError>;
}

/// MySQL-backed implementation of [`SeriesStore`].
#[derive(Debug, Clone)]
pub struct MySqlSeriesStore {
    pool: MySqlPool,
}

impl MySqlSeriesStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeriesStore for MySqlSeriesStore {
    async fn list(
        &self,
        search: &str,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<SeriesItem>, StoreError> {
        let pattern = format!("%{search}%");
        let rows = sqlx::query(
            "SELECT id, name, url FROM tv_series WHERE name LIKE BINARY ? LIMIT ? OFFSET ?",
        )
        .bind(&pattern)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SeriesItem {
                id: row.get("id"),
                name: row.get("name"),
                url: row.get("url"),
            })
            .collect())
    }

    async fn detail(&self, series_id: i64) -> Result<SeriesDetail, StoreError> {
        // Season count and last-watched episode are separate aggregation
        // scopes, so they stay separate queries; only the first one is
        // required to find a row.
        let row = sqlx::query(
            "SELECT tv_series.id, tv_series.name, tv_series.url, \
                    COUNT(season.id) AS season_count \
             FROM tv_series \
             LEFT JOIN season ON season.serial_id = tv_series.id \
             WHERE tv_series.id = ? \
             GROUP BY tv_series.id",
        )
        .bind(series_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { series_id })?;

        let mut detail = SeriesDetail {
            id: row.get("id"),
            name: row.get("name"),
            url: row.get("url"),
            series_count: row.get("season_count"),
            last_watched_episode: None,
            date_of_last_watched_episode: None,
        };

        // Ties on `date` resolve to the highest episode id.
        let last_watched = sqlx::query(
            "SELECT episode.id, season.number AS season_number, \
                    episode.number AS episode_number, episode.date \
             FROM episode \
             JOIN season ON season.id = episode.season_id \
             WHERE season.serial_id = ? AND episode.watched = TRUE \
             ORDER BY episode.date DESC, episode.id DESC \
             LIMIT 1",
        )
        .bind(series_id)
        .fetch_optional(&self.pool)
        .await;

        match last_watched {
            Ok(Some(row)) => {
                detail.last_watched_episode = Some(LastWatchedEpisode {
                    id: row.get("id"),
                    season: row.get("season_number"),
                    episode_number: row.get("episode_number"),
                });
                detail.date_of_last_watched_episode = row.get("date");
            }
            // No watched episode yet is a normal state for a series, and a
            // failed lookup must not sink the whole aggregation.
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(series_id, "last-watched lookup failed: {err}");
            }
        }

        Ok(detail)
    }

    async fn create(
        &self,
        name: &str,
        url: &str,
        season_count: u32,
        episodes_per_season: u32,
    ) -> Result<SeriesDetail, StoreError> {
        let mut tx = self.pool.begin().await?;

        let series_id = sqlx::query("INSERT INTO tv_series (name, url) VALUES (?, ?)")
            .bind(name)
            .bind(url)
            .execute(&mut *tx)
            .await?
            .last_insert_id() as i64;

        for season_number in 1..=season_count {
            let season_id = sqlx::query("INSERT INTO season (serial_id, number) VALUES (?, ?)")
                .bind(series_id)
                .bind(season_number)
                .execute(&mut *tx)
                .await?
                .last_insert_id();

            if episodes_per_season > 0 {
                // One multi-row insert per season; rows are listed in
                // ascending episode number order.
                let mut insert = QueryBuilder::<MySql>::new(
                    "INSERT INTO episode (season_id, number, watched, date) ",
                );
                insert.push_values(1..=episodes_per_season, |mut row, number| {
                    row.push_bind(season_id)
                        .push_bind(number)
                        .push_bind(false)
                        .push_bind(None::<DateTime<Utc>>);
                });
                insert.build().execute(&mut *tx).await?;
            }
        }

        // Every `?` above drops `tx`, which rolls the transaction back; only
        // this path commits.
        tx.commit().await?;

        // Read back outside the transaction; a concurrent delete surfaces as
        // the aggregation's own NotFound.
        self.detail(series_id).await
    }

    async fn update(
        &self,
        series_id: i64,
        name: &str,
        url: &str,
    ) -> Result<SeriesDetail, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE tv_series SET name = ?, url = ? WHERE id = ?")
            .bind(name)
            .bind(url)
            .bind(series_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        // An unknown id affects zero rows; the read back reports NotFound.
        self.detail(series_id).await
    }

    async fn delete(&self, series_id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tv_series WHERE id = ?")
            .bind(series_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
