//! Contact inquiry repository
//!
//! This module provides:
//! - `ContactRepository` trait defining the interface for inquiry data access
//! - `SqlxContactRepository` implementing the trait for SQLite
//!
//! Inquiries are write-once: there is no update, only the `read` flag flip
//! the admin uses to triage the inbox.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{ContactInquiry, CursorPage, CursorParams, NewContactInquiry};

/// Contact inquiry repository trait
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a new inquiry with `read = false`
    async fn create(&self, input: &NewContactInquiry) -> Result<ContactInquiry>;

    /// Get an inquiry by id
    async fn get(&self, id: &str) -> Result<Option<ContactInquiry>>;

    /// List inquiries newest-first with cursor continuation
    async fn list(&self, params: &CursorParams) -> Result<CursorPage<ContactInquiry>>;

    /// Flip the read flag; `false` when the id does not exist
    async fn mark_read(&self, id: &str) -> Result<bool>;

    /// Delete an inquiry; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> Result<()>;
}

/// SQLx-based contact repository implementation
pub struct SqlxContactRepository {
    pool: SqlitePool,
}

impl SqlxContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn ContactRepository> {
        Arc::new(Self::new(pool))
    }

    /// Resolve the `(created_at, id)` anchor for a cursor id, as stored text
    async fn anchor(&self, id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query("SELECT created_at, id FROM contact_inquiries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve contact cursor")?;
        Ok(row.map(|r| (r.get("created_at"), r.get("id"))))
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, input: &NewContactInquiry) -> Result<ContactInquiry> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO contact_inquiries (id, name, email, phone, details, location, date, days, read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.details)
        .bind(&input.location)
        .bind(&input.date)
        .bind(&input.days)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to store contact inquiry")?;

        Ok(ContactInquiry {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            details: input.details.clone(),
            location: input.location.clone(),
            date: input.date.clone(),
            days: input.days.clone(),
            read: false,
            created_at: now,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<ContactInquiry>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, details, location, date, days, read, created_at
            FROM contact_inquiries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get contact inquiry")?;

        row.map(|r| row_to_inquiry(&r)).transpose()
    }

    async fn list(&self, params: &CursorParams) -> Result<CursorPage<ContactInquiry>> {
        let anchor = match &params.last_id {
            Some(last_id) => self.anchor(last_id).await?,
            None => None,
        };

        let rows = match anchor {
            Some((created_at, anchor_id)) => {
                sqlx::query(
                    r#"
                    SELECT id, name, email, phone, details, location, date, days, read, created_at
                    FROM contact_inquiries
                    WHERE (created_at, id) < (?, ?)
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(created_at)
                .bind(anchor_id)
                .bind(params.limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, email, phone, details, location, date, days, read, created_at
                    FROM contact_inquiries
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?
                    "#,
                )
                .bind(params.limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to list contact inquiries")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_inquiry(&row)?);
        }

        let last_id = items.last().map(|inquiry: &ContactInquiry| inquiry.id.clone());
        Ok(CursorPage::new(items, last_id, params.limit))
    }

    async fn mark_read(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE contact_inquiries SET read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to mark inquiry read")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM contact_inquiries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete contact inquiry")?;
        Ok(())
    }
}

/// Map a database row to a contact inquiry
fn row_to_inquiry(row: &sqlx::sqlite::SqliteRow) -> Result<ContactInquiry> {
    Ok(ContactInquiry {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        details: row.try_get("details")?,
        location: row.try_get("location")?,
        date: row.try_get("date")?,
        days: row.try_get("days")?,
        read: row.try_get("read")?,
        created_at: row.try_get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> SqlxContactRepository {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        SqlxContactRepository::new(pool)
    }

    fn sample_inquiry(name: &str) -> NewContactInquiry {
        NewContactInquiry {
            name: name.to_string(),
            email: "j@x.com".to_string(),
            phone: "123".to_string(),
            details: "Two-day elopement".to_string(),
            location: "Faroe Islands".to_string(),
            date: Some("2026-09-12".to_string()),
            days: Some("2".to_string()),
        }
    }

    #[tokio::test]
    async fn test_new_inquiry_is_unread() {
        let repo = setup().await;
        let created = repo.create(&sample_inquiry("J")).await.unwrap();
        assert!(!created.read);

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert!(!fetched.read);
        assert_eq!(fetched.date.as_deref(), Some("2026-09-12"));
    }

    #[tokio::test]
    async fn test_mark_read() {
        let repo = setup().await;
        let created = repo.create(&sample_inquiry("J")).await.unwrap();

        assert!(repo.mark_read(&created.id).await.unwrap());
        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert!(fetched.read);

        assert!(!repo.mark_read("no-such-id").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let repo = setup().await;
        let keep = repo.create(&sample_inquiry("Keep")).await.unwrap();
        let drop = repo.create(&sample_inquiry("Drop")).await.unwrap();

        repo.delete(&drop.id).await.unwrap();
        // Idempotent second delete
        repo.delete(&drop.id).await.unwrap();

        let page = repo.list(&CursorParams::first(10)).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.contains(&keep.id.as_str()));
        assert!(!ids.contains(&drop.id.as_str()));
    }
}
