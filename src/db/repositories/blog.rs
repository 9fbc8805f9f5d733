//! Blog post repository
//!
//! This module provides:
//! - `BlogRepository` trait defining the interface for blog data access
//! - `SqlxBlogRepository` implementing the trait for SQLite
//!
//! The `description` block list and `images` list are stored as JSON text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{BlogPost, CursorPage, CursorParams, NewBlogPost};

/// Blog post repository trait
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Create a new post, stamping timestamps and assigning an id
    async fn create(&self, input: &NewBlogPost) -> Result<BlogPost>;

    /// Get a post by id
    async fn get(&self, id: &str) -> Result<Option<BlogPost>>;

    /// Replace a post's fields; `None` when the id does not exist
    async fn update(&self, id: &str, input: &NewBlogPost) -> Result<Option<BlogPost>>;

    /// Delete a post; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;

    /// List posts newest-first with cursor continuation
    async fn list(&self, published_only: bool, params: &CursorParams)
        -> Result<CursorPage<BlogPost>>;
}

/// SQLx-based blog repository implementation
pub struct SqlxBlogRepository {
    pool: SqlitePool,
}

impl SqlxBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn BlogRepository> {
        Arc::new(Self::new(pool))
    }

    /// Resolve the `(created_at, id)` anchor for a cursor id
    ///
    /// The timestamp is kept as the stored text so the keyset comparison is
    /// exact; re-parsing could shift sub-second precision.
    async fn anchor(&self, id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query("SELECT created_at, id FROM blog_posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve blog cursor")?;
        Ok(row.map(|r| (r.get("created_at"), r.get("id"))))
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, input: &NewBlogPost) -> Result<BlogPost> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let description =
            serde_json::to_string(&input.description).context("Failed to encode blog body")?;
        let images =
            serde_json::to_string(&input.images).context("Failed to encode blog images")?;

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, short_description, description, images, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.title)
        .bind(&input.short_description)
        .bind(&description)
        .bind(&images)
        .bind(input.published)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create blog post")?;

        Ok(BlogPost {
            id,
            title: input.title.clone(),
            short_description: input.short_description.clone(),
            description: input.description.clone(),
            images: input.images.clone(),
            published: input.published,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<BlogPost>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, short_description, description, images, published, created_at, updated_at
            FROM blog_posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get blog post")?;

        row.map(|r| row_to_blog_post(&r)).transpose()
    }

    async fn update(&self, id: &str, input: &NewBlogPost) -> Result<Option<BlogPost>> {
        let now = Utc::now();
        let description =
            serde_json::to_string(&input.description).context("Failed to encode blog body")?;
        let images =
            serde_json::to_string(&input.images).context("Failed to encode blog images")?;

        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?, short_description = ?, description = ?, images = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.short_description)
        .bind(&description)
        .bind(&images)
        .bind(input.published)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update blog post")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete blog post")?;
        Ok(())
    }

    async fn list(
        &self,
        published_only: bool,
        params: &CursorParams,
    ) -> Result<CursorPage<BlogPost>> {
        let anchor = match &params.last_id {
            Some(last_id) => self.anchor(last_id).await?,
            None => None,
        };

        let rows = match anchor {
            Some((created_at, anchor_id)) => {
                sqlx::query(
                    r#"
                    SELECT id, title, short_description, description, images, published, created_at, updated_at
                    FROM blog_posts
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
                    SELECT id, title, short_description, description, images, published, created_at, updated_at
                    FROM blog_posts
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
        .context("Failed to list blog posts")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_blog_post(&row)?);
        }

        let last_id = items.last().map(|post: &BlogPost| post.id.clone());
        Ok(CursorPage::new(items, last_id, params.limit))
    }
}

/// Map a database row to a blog post
fn row_to_blog_post(row: &sqlx::sqlite::SqliteRow) -> Result<BlogPost> {
    let description: String = row.try_get("description")?;
    let images: String = row.try_get("images")?;

    Ok(BlogPost {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        short_description: row.try_get("short_description")?,
        description: serde_json::from_str(&description)
            .context("Corrupt blog body in document store")?,
        images: serde_json::from_str(&images).context("Corrupt blog images in document store")?,
        published: row.try_get("published")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::{BlockKind, ContentBlock};

    async fn setup() -> SqlxBlogRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        SqlxBlogRepository::new(pool)
    }

    fn sample_post(title: &str, published: bool) -> NewBlogPost {
        NewBlogPost {
            title: title.to_string(),
            short_description: "teaser".to_string(),
            description: vec![
                ContentBlock {
                    kind: BlockKind::Heading1,
                    content: "Intro".to_string(),
                },
                ContentBlock {
                    kind: BlockKind::Paragraph,
                    content: "Body".to_string(),
                },
            ],
            images: vec!["https://i.example.com/1.jpg".to_string()],
            published,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_preserves_block_order() {
        let repo = setup().await;

        let created = repo.create(&sample_post("First", false)).await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.description[0].kind, BlockKind::Heading1);
        assert_eq!(fetched.images, created.images);
        assert!(!fetched.published);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = setup().await;
        let created = repo.create(&sample_post("Before", false)).await.unwrap();

        let mut replacement = sample_post("After", true);
        replacement.images.clear();
        let updated = repo
            .update(&created.id, &replacement)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "After");
        assert!(updated.published);
        assert!(updated.images.is_empty());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_after_delete_is_not_found() {
        let repo = setup().await;
        let created = repo.create(&sample_post("Gone", false)).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        let result = repo.update(&created.id, &sample_post("X", false)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = setup().await;
        repo.delete("no-such-id").await.unwrap();
    }

    #[tokio::test]
    async fn test_published_filter() {
        let repo = setup().await;
        repo.create(&sample_post("draft", false)).await.unwrap();
        repo.create(&sample_post("live", true)).await.unwrap();

        let public = repo
            .list(true, &CursorParams::first(10))
            .await
            .unwrap();
        assert_eq!(public.items.len(), 1);
        assert!(public.items.iter().all(|p| p.published));

        let admin = repo
            .list(false, &CursorParams::first(10))
            .await
            .unwrap();
        assert_eq!(admin.items.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_cursor_resets_to_first_page() {
        let repo = setup().await;
        for i in 0..3 {
            repo.create(&sample_post(&format!("p{i}"), true)).await.unwrap();
        }

        let page = repo
            .list(true, &CursorParams::new(2, Some("deleted-doc-id".to_string())))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }
}
