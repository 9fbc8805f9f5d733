//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Atelier backend:
//! - Blog endpoints
//! - Film endpoints
//! - Photography endpoints
//! - Editorial endpoints
//! - Contact inquiry endpoints
//! - Image upload endpoints
//!
//! Public routes only ever see published content; write routes and the
//! contact inbox sit behind the admin bearer token.

pub mod blogs;
pub mod common;
pub mod contact;
pub mod editorial;
pub mod films;
pub mod middleware;
pub mod photography;
pub mod upload;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{AdminAccess, ApiError, AppState, MaybeAdmin};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Admin routes (require the configured bearer token)
    let admin_routes = Router::new()
        .route("/blogs", post(blogs::create_blog))
        .route(
            "/blogs/{id}",
            put(blogs::update_blog).delete(blogs::delete_blog),
        )
        .route("/films", post(films::create_film))
        .route(
            "/films/{id}",
            put(films::update_film).delete(films::delete_film),
        )
        .route("/photography", post(photography::create_album))
        .route(
            "/photography/{id}",
            put(photography::update_album).delete(photography::delete_album),
        )
        .route("/editorial", post(editorial::create_image))
        .route(
            "/editorial/{id}",
            put(editorial::update_image).delete(editorial::delete_image),
        )
        // Admin inbox: list, mark read, delete by query id
        .route(
            "/contact",
            get(contact::list_inquiries).delete(contact::delete_inquiry),
        )
        .route("/contact/{id}/read", post(contact::mark_inquiry_read))
        // Image host delegation
        .route("/upload/image", post(upload::upload_image))
        .route("/upload/delete", post(upload::delete_image))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    // Public read routes; a valid admin token additionally unlocks drafts
    let public_routes = Router::new()
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/{id}", get(blogs::get_blog))
        .route("/films", get(films::list_films))
        .route("/films/{id}", get(films::get_film))
        .route("/photography", get(photography::list_albums))
        .route("/photography/{id}", get(photography::get_album))
        .route("/editorial", get(editorial::list_images))
        .route("/editorial/{id}", get(editorial::get_image))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_admin,
        ));

    public_routes
        // Public contact form submission, no auth
        .route("/contact", post(contact::submit_inquiry))
        .merge(admin_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
