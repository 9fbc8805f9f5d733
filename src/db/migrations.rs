//! Database migrations
//!
//! Code-based migrations embedded in the binary: each collection table is
//! created by a versioned SQL block, applied in order and recorded in a
//! `_migrations` ledger so reruns are no-ops.
//!
//! All ids are store-assigned opaque strings (UUID v4). Array-valued fields
//! (`images`, blog `description` blocks) live in JSON text columns. Every
//! collection is listed newest-first, so each table carries a
//! `(created_at DESC, id DESC)` index.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// A single versioned migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (unique, applied in ascending order)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements, `;`-separated
    pub up: &'static str,
}

/// All migrations for the Atelier backend
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_blog_posts",
        up: r#"
            CREATE TABLE IF NOT EXISTS blog_posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                short_description TEXT NOT NULL,
                description TEXT NOT NULL,
                images TEXT NOT NULL DEFAULT '[]',
                published INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_blog_posts_created ON blog_posts(created_at DESC, id DESC);
            CREATE INDEX IF NOT EXISTS idx_blog_posts_published ON blog_posts(published);
        "#,
    },
    Migration {
        version: 2,
        name: "create_films",
        up: r#"
            CREATE TABLE IF NOT EXISTS films (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                location TEXT NOT NULL,
                description TEXT,
                video_url TEXT NOT NULL,
                thumbnail TEXT,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_films_created ON films(created_at DESC, id DESC);
            CREATE INDEX IF NOT EXISTS idx_films_published ON films(published);
        "#,
    },
    Migration {
        version: 3,
        name: "create_photography_albums",
        up: r#"
            CREATE TABLE IF NOT EXISTS photography_albums (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                location TEXT NOT NULL,
                description TEXT NOT NULL,
                images TEXT NOT NULL,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_photography_created ON photography_albums(created_at DESC, id DESC);
            CREATE INDEX IF NOT EXISTS idx_photography_published ON photography_albums(published);
        "#,
    },
    Migration {
        version: 4,
        name: "create_editorial_images",
        up: r#"
            CREATE TABLE IF NOT EXISTS editorial_images (
                id TEXT PRIMARY KEY,
                image_url TEXT NOT NULL,
                delete_url TEXT,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_editorial_created ON editorial_images(created_at DESC, id DESC);
            CREATE INDEX IF NOT EXISTS idx_editorial_published ON editorial_images(published);
        "#,
    },
    Migration {
        version: 5,
        name: "create_contact_inquiries",
        up: r#"
            CREATE TABLE IF NOT EXISTS contact_inquiries (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                details TEXT NOT NULL,
                location TEXT NOT NULL,
                date TEXT,
                days TEXT,
                read INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_contact_created ON contact_inquiries(created_at DESC, id DESC);
        "#,
    },
];

/// Run all pending migrations, returning how many were applied
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = applied_versions(pool).await?;
    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create migrations table")?;
    Ok(())
}

/// Versions already recorded in the ledger
async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i32>> {
    use sqlx::Row;

    let rows = sqlx::query("SELECT version FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;

    Ok(rows.iter().map(|row| row.get("version")).collect())
}

/// Apply one migration and record it
async fn apply_migration(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Split a `;`-separated SQL block into individual statements
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Shorten SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}
