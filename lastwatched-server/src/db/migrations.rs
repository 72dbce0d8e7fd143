//! Schema bootstrap for the series tables.

use sqlx::MySqlPool;

/// Create the series tables when they do not exist yet.
///
/// Seasons and episodes hang off their parent rows with ON DELETE CASCADE,
/// so removing a series removes its whole season/episode grid.
pub async fn run(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tv_series (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            url VARCHAR(1024) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS season (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            serial_id BIGINT NOT NULL,
            number INT NOT NULL,
            UNIQUE KEY uq_season_number (serial_id, number),
            CONSTRAINT fk_season_series FOREIGN KEY (serial_id)
                REFERENCES tv_series (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS episode (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            season_id BIGINT NOT NULL,
            number INT NOT NULL,
            watched BOOLEAN NOT NULL DEFAULT FALSE,
            date TIMESTAMP NULL DEFAULT NULL,
            UNIQUE KEY uq_episode_number (season_id, number),
            CONSTRAINT fk_episode_season FOREIGN KEY (season_id)
                REFERENCES season (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
