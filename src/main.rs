//! Atelier - content management backend for a photography studio site

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxBlogRepository, SqlxContactRepository, SqlxEditorialRepository,
            SqlxFilmRepository, SqlxPhotographyRepository,
        },
    },
    imagehost::HttpImageHost,
    services::{
        blog::BlogService, contact::ContactService, editorial::EditorialService,
        film::FilmService, photography::PhotographyService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atelier backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    if config.admin.token.is_empty() {
        tracing::warn!("No admin token configured; admin endpoints are disabled");
    }
    if config.image_host.api_key.is_empty() {
        tracing::warn!("No image host API key configured; uploads will fail");
    }

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Image host client
    let image_host = HttpImageHost::boxed(&config.image_host)?;

    // Create repositories
    let blog_repo = SqlxBlogRepository::boxed(pool.clone());
    let film_repo = SqlxFilmRepository::boxed(pool.clone());
    let photography_repo = SqlxPhotographyRepository::boxed(pool.clone());
    let editorial_repo = SqlxEditorialRepository::boxed(pool.clone());
    let contact_repo = SqlxContactRepository::boxed(pool.clone());

    // Initialize services
    let blog_service = Arc::new(BlogService::new(blog_repo));
    let film_service = Arc::new(FilmService::new(film_repo));
    let photography_service = Arc::new(PhotographyService::new(photography_repo));
    let editorial_service = Arc::new(EditorialService::new(editorial_repo));
    let contact_service = Arc::new(ContactService::new(contact_repo));

    // Build application state
    let state = AppState {
        blog_service,
        film_service,
        photography_service,
        editorial_service,
        contact_service,
        image_host,
        upload_config: Arc::new(config.upload.clone()),
        admin_token: Arc::new(config.admin.token.clone()),
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
