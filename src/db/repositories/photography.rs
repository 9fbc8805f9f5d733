//! Photography album repository
//!
//! This module provides:
//! - `PhotographyRepository` trait defining the interface for album data access
//! - `SqlxPhotographyRepository` implementing the trait for SQLite
//!
//! The `images` list is stored as JSON text. Albums drive the public
//! infinite-scroll grid, so the cursor listing here carries the heaviest
//! test coverage of the pagination contract.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{CursorPage, CursorParams, NewPhotoAlbum, PhotoAlbum};

/// Photography album repository trait
#[async_trait]
pub trait PhotographyRepository: Send + Sync {
    /// Create a new album, stamping timestamps and assigning an id
    async fn create(&self, input: &NewPhotoAlbum) -> Result<PhotoAlbum>;

    /// Get an album by id
    async fn get(&self, id: &str) -> Result<Option<PhotoAlbum>>;

    /// Replace an album's fields; `None` when the id does not exist
    async fn update(&self, id: &str, input: &NewPhotoAlbum) -> Result<Option<PhotoAlbum>>;

    /// Delete an album; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;

    /// List albums newest-first with cursor continuation
    async fn list(
        &self,
        published_only: bool,
        params: &CursorParams,
    ) -> Result<CursorPage<PhotoAlbum>>;
}

/// SQLx-based photography repository implementation
pub struct SqlxPhotographyRepository {
    pool: SqlitePool,
}

impl SqlxPhotographyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn PhotographyRepository> {
        Arc::new(Self::new(pool))
    }

    /// Resolve the `(created_at, id)` anchor for a cursor id, as stored text
    async fn anchor(&self, id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query("SELECT created_at, id FROM photography_albums WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve photography cursor")?;
        Ok(row.map(|r| (r.get("created_at"), r.get("id"))))
    }
}

#[async_trait]
impl PhotographyRepository for SqlxPhotographyRepository {
    async fn create(&self, input: &NewPhotoAlbum) -> Result<PhotoAlbum> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let images =
            serde_json::to_string(&input.images).context("Failed to encode album images")?;

        sqlx::query(
            r#"
            INSERT INTO photography_albums (id, title, location, description, images, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&images)
        .bind(input.published)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create photography album")?;

        Ok(PhotoAlbum {
            id,
            title: input.title.clone(),
            location: input.location.clone(),
            description: input.description.clone(),
            images: input.images.clone(),
            published: input.published,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<PhotoAlbum>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, location, description, images, published, created_at, updated_at
            FROM photography_albums
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get photography album")?;

        row.map(|r| row_to_album(&r)).transpose()
    }

    async fn update(&self, id: &str, input: &NewPhotoAlbum) -> Result<Option<PhotoAlbum>> {
        let now = Utc::now();
        let images =
            serde_json::to_string(&input.images).context("Failed to encode album images")?;

        let result = sqlx::query(
            r#"
            UPDATE photography_albums
            SET title = ?, location = ?, description = ?, images = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&images)
        .bind(input.published)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update photography album")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM photography_albums WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete photography album")?;
        Ok(())
    }

    async fn list(
        &self,
        published_only: bool,
        params: &CursorParams,
    ) -> Result<CursorPage<PhotoAlbum>> {
        let anchor = match &params.last_id {
            Some(last_id) => self.anchor(last_id).await?,
            None => None,
        };

        let rows = match anchor {
            Some((created_at, anchor_id)) => {
                sqlx::query(
                    r#"
                    SELECT id, title, location, description, images, published, created_at, updated_at
                    FROM photography_albums
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
                    SELECT id, title, location, description, images, published, created_at, updated_at
                    FROM photography_albums
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
        .context("Failed to list photography albums")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_album(&row)?);
        }

        let last_id = items.last().map(|album: &PhotoAlbum| album.id.clone());
        Ok(CursorPage::new(items, last_id, params.limit))
    }
}

/// Map a database row to a photography album
fn row_to_album(row: &sqlx::sqlite::SqliteRow) -> Result<PhotoAlbum> {
    let images: String = row.try_get("images")?;

    Ok(PhotoAlbum {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        description: row.try_get("description")?,
        images: serde_json::from_str(&images).context("Corrupt album images in document store")?,
        published: row.try_get("published")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
