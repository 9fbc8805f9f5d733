//! Editorial image repository
//!
//! This module provides:
//! - `EditorialRepository` trait defining the interface for editorial data access
//! - `SqlxEditorialRepository` implementing the trait for SQLite

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{CursorPage, CursorParams, EditorialImage, NewEditorialImage};

/// Editorial image repository trait
#[async_trait]
pub trait EditorialRepository: Send + Sync {
    /// Create a new editorial entry, stamping timestamps and assigning an id
    async fn create(&self, input: &NewEditorialImage) -> Result<EditorialImage>;

    /// Get an entry by id
    async fn get(&self, id: &str) -> Result<Option<EditorialImage>>;

    /// Replace an entry's fields; `None` when the id does not exist
    async fn update(&self, id: &str, input: &NewEditorialImage)
        -> Result<Option<EditorialImage>>;

    /// Delete an entry; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;

    /// List entries newest-first with cursor continuation
    async fn list(
        &self,
        published_only: bool,
        params: &CursorParams,
    ) -> Result<CursorPage<EditorialImage>>;
}

/// SQLx-based editorial repository implementation
pub struct SqlxEditorialRepository {
    pool: SqlitePool,
}

impl SqlxEditorialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn EditorialRepository> {
        Arc::new(Self::new(pool))
    }

    /// Resolve the `(created_at, id)` anchor for a cursor id, as stored text
    async fn anchor(&self, id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query("SELECT created_at, id FROM editorial_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve editorial cursor")?;
        Ok(row.map(|r| (r.get("created_at"), r.get("id"))))
    }
}

#[async_trait]
impl EditorialRepository for SqlxEditorialRepository {
    async fn create(&self, input: &NewEditorialImage) -> Result<EditorialImage> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO editorial_images (id, image_url, delete_url, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.image_url)
        .bind(&input.delete_url)
        .bind(input.published)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create editorial image")?;

        Ok(EditorialImage {
            id,
            image_url: input.image_url.clone(),
            delete_url: input.delete_url.clone(),
            published: input.published,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<EditorialImage>> {
        let row = sqlx::query(
            r#"
            SELECT id, image_url, delete_url, published, created_at, updated_at
            FROM editorial_images
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get editorial image")?;

        row.map(|r| row_to_editorial(&r)).transpose()
    }

    async fn update(
        &self,
        id: &str,
        input: &NewEditorialImage,
    ) -> Result<Option<EditorialImage>> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE editorial_images
            SET image_url = ?, delete_url = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.image_url)
        .bind(&input.delete_url)
        .bind(input.published)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update editorial image")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM editorial_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete editorial image")?;
        Ok(())
    }

    async fn list(
        &self,
        published_only: bool,
        params: &CursorParams,
    ) -> Result<CursorPage<EditorialImage>> {
        let anchor = match &params.last_id {
            Some(last_id) => self.anchor(last_id).await?,
            None => None,
        };

        let rows = match anchor {
            Some((created_at, anchor_id)) => {
                sqlx::query(
                    r#"
                    SELECT id, image_url, delete_url, published, created_at, updated_at
                    FROM editorial_images
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
                    SELECT id, image_url, delete_url, published, created_at, updated_at
                    FROM editorial_images
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
        .context("Failed to list editorial images")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_editorial(&row)?);
        }

        let last_id = items.last().map(|image: &EditorialImage| image.id.clone());
        Ok(CursorPage::new(items, last_id, params.limit))
    }
}

/// Map a database row to an editorial image
fn row_to_editorial(row: &sqlx::sqlite::SqliteRow) -> Result<EditorialImage> {
    Ok(EditorialImage {
        id: row.try_get("id")?,
        image_url: row.try_get("image_url")?,
        delete_url: row.try_get("delete_url")?,
        published: row.try_get("published")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> SqlxEditorialRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        SqlxEditorialRepository::new(pool)
    }

    fn sample_image(url: &str, published: bool) -> NewEditorialImage {
        NewEditorialImage {
            image_url: url.to_string(),
            delete_url: Some(format!("{url}/delete/abc")),
            published,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_delete_handle() {
        let repo = setup().await;
        let created = repo
            .create(&sample_image("https://i.example.com/e.jpg", false))
            .await
            .unwrap();

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.image_url, "https://i.example.com/e.jpg");
        assert_eq!(
            fetched.delete_url.as_deref(),
            Some("https://i.example.com/e.jpg/delete/abc")
        );
    }

    #[tokio::test]
    async fn test_cursor_pagination_walks_newest_first() {
        let repo = setup().await;
        for i in 0..5 {
            repo.create(&sample_image(&format!("https://i.example.com/{i}.jpg"), true))
                .await
                .unwrap();
        }

        let first = repo.list(true, &CursorParams::first(3)).await.unwrap();
        assert_eq!(first.items.len(), 3);
        assert!(first.has_more);

        let second = repo
            .list(true, &CursorParams::new(3, first.last_id.clone()))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 2);
        assert!(!second.has_more);

        // Pages do not overlap
        let first_ids: Vec<_> = first.items.iter().map(|i| &i.id).collect();
        assert!(second.items.iter().all(|i| !first_ids.contains(&&i.id)));
    }

    #[tokio::test]
    async fn test_delete_then_update_is_not_found() {
        let repo = setup().await;
        let created = repo
            .create(&sample_image("https://i.example.com/e.jpg", true))
            .await
            .unwrap();
        repo.delete(&created.id).await.unwrap();
        assert!(repo
            .update(&created.id, &sample_image("https://i.example.com/f.jpg", true))
            .await
            .unwrap()
            .is_none());
    }
}
