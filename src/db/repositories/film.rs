//! Film repository
//!
//! This module provides:
//! - `FilmRepository` trait defining the interface for film data access
//! - `SqlxFilmRepository` implementing the trait for SQLite

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{CursorPage, CursorParams, Film, NewFilm};

/// Film repository trait
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Create a new film, stamping timestamps and assigning an id
    async fn create(&self, input: &NewFilm) -> Result<Film>;

    /// Get a film by id
    async fn get(&self, id: &str) -> Result<Option<Film>>;

    /// Replace a film's fields; `None` when the id does not exist
    async fn update(&self, id: &str, input: &NewFilm) -> Result<Option<Film>>;

    /// Delete a film; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;

    /// List films newest-first with cursor continuation
    async fn list(&self, published_only: bool, params: &CursorParams) -> Result<CursorPage<Film>>;
}

/// SQLx-based film repository implementation
pub struct SqlxFilmRepository {
    pool: SqlitePool,
}

impl SqlxFilmRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn FilmRepository> {
        Arc::new(Self::new(pool))
    }

    /// Resolve the `(created_at, id)` anchor for a cursor id, as stored text
    async fn anchor(&self, id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query("SELECT created_at, id FROM films WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve film cursor")?;
        Ok(row.map(|r| (r.get("created_at"), r.get("id"))))
    }
}

#[async_trait]
impl FilmRepository for SqlxFilmRepository {
    async fn create(&self, input: &NewFilm) -> Result<Film> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO films (id, title, location, description, video_url, thumbnail, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.video_url)
        .bind(&input.thumbnail)
        .bind(input.published)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create film")?;

        Ok(Film {
            id,
            title: input.title.clone(),
            location: input.location.clone(),
            description: input.description.clone(),
            video_url: input.video_url.clone(),
            thumbnail: input.thumbnail.clone(),
            published: input.published,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Film>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, location, description, video_url, thumbnail, published, created_at, updated_at
            FROM films
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get film")?;

        row.map(|r| row_to_film(&r)).transpose()
    }

    async fn update(&self, id: &str, input: &NewFilm) -> Result<Option<Film>> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE films
            SET title = ?, location = ?, description = ?, video_url = ?, thumbnail = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.video_url)
        .bind(&input.thumbnail)
        .bind(input.published)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update film")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM films WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete film")?;
        Ok(())
    }

    async fn list(&self, published_only: bool, params: &CursorParams) -> Result<CursorPage<Film>> {
        let anchor = match &params.last_id {
            Some(last_id) => self.anchor(last_id).await?,
            None => None,
        };

        let rows = match anchor {
            Some((created_at, anchor_id)) => {
                sqlx::query(
                    r#"
                    SELECT id, title, location, description, video_url, thumbnail, published, created_at, updated_at
                    FROM films
                    WHERE (? = 0 OR published = 1)
                      AND (created_at, id) < (?, ?)
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(published_only)
                .bind(created_at)
                .bind(anchor_id)
                .bind(params.limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, title, location, description, video_url, thumbnail, published, created_at, updated_at
                    FROM films
                    WHERE (? = 0 OR published = 1)
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(published_only)
                .bind(params.limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to list films")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_film(&row)?);
        }

        let last_id = items.last().map(|film: &Film| film.id.clone());
        Ok(CursorPage::new(items, last_id, params.limit))
    }
}

/// Map a database row to a film
fn row_to_film(row: &sqlx::sqlite::SqliteRow) -> Result<Film> {
    Ok(Film {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        description: row.try_get("description")?,
        video_url: row.try_get("video_url")?,
        thumbnail: row.try_get("thumbnail")?,
        published: row.try_get("published")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> SqlxFilmRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        SqlxFilmRepository::new(pool)
    }

    fn sample_film(title: &str, published: bool) -> NewFilm {
        NewFilm {
            title: title.to_string(),
            location: "Dolomites".to_string(),
            description: None,
            video_url: "https://vimeo.com/9".to_string(),
            thumbnail: None,
            published,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_keeps_optional_fields() {
        let repo = setup().await;
        let mut input = sample_film("Peaks", true);
        input.description = Some("Ridge line at dawn".to_string());
        input.thumbnail = Some("https://i.example.com/t.jpg".to_string());

        let created = repo.create(&input).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.description.as_deref(), Some("Ridge line at dawn"));
        assert_eq!(fetched.thumbnail.as_deref(), Some("https://i.example.com/t.jpg"));
        assert!(fetched.published);
    }

    #[tokio::test]
    async fn test_update_missing_film_is_not_found() {
        let repo = setup().await;
        assert!(repo
            .update("ghost", &sample_film("X", false))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_clears_dropped_optionals() {
        let repo = setup().await;
        let mut input = sample_film("Peaks", false);
        input.thumbnail = Some("https://i.example.com/t.jpg".to_string());
        let created = repo.create(&input).await.unwrap();

        // Full-replace semantics: absent optionals overwrite stored values
        let updated = repo
            .update(&created.id, &sample_film("Peaks", false))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.thumbnail.is_none());
    }

    #[tokio::test]
    async fn test_public_listing_hides_drafts() {
        let repo = setup().await;
        repo.create(&sample_film("draft", false)).await.unwrap();
        repo.create(&sample_film("live", true)).await.unwrap();

        let page = repo.list(true, &CursorParams::first(10)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "live");
    }
}
