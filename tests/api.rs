//! End-to-end API tests
//!
//! Drives the full router over an in-memory database with a stub image host,
//! covering the admin/public split, validation responses, cursor pagination
//! and the contact inbox lifecycle.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};

use atelier::{
    api::{build_router, AppState},
    config::UploadConfig,
    db::{
        migrations,
        pool::create_test_pool,
        repositories::{
            SqlxBlogRepository, SqlxContactRepository, SqlxEditorialRepository,
            SqlxFilmRepository, SqlxPhotographyRepository,
        },
    },
    imagehost::{ImageHost, ImageHostError, UploadedImage},
    services::{
        blog::BlogService, contact::ContactService, editorial::EditorialService,
        film::FilmService, photography::PhotographyService,
    },
};

const ADMIN_TOKEN: &str = "test-admin-token";

/// Image host stub: succeeds with canned URLs or fails like an unreachable
/// service, without any network
struct StubImageHost {
    fail: bool,
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        filename: &str,
    ) -> Result<UploadedImage, ImageHostError> {
        if self.fail {
            return Err(ImageHostError::Rejected("host offline".to_string()));
        }
        Ok(UploadedImage {
            url: format!("https://i.example.com/{filename}"),
            delete_url: format!("https://example.com/delete/{filename}"),
            thumb_url: format!("https://i.example.com/thumb/{filename}"),
        })
    }

    async fn delete(&self, _delete_url: &str) -> Result<(), ImageHostError> {
        if self.fail {
            return Err(ImageHostError::Rejected("host offline".to_string()));
        }
        Ok(())
    }
}

async fn test_server_with_host(host: Arc<dyn ImageHost>) -> TestServer {
    let pool = create_test_pool().await.unwrap();
    migrations::run_migrations(&pool).await.unwrap();

    let state = AppState {
        blog_service: Arc::new(BlogService::new(SqlxBlogRepository::boxed(pool.clone()))),
        film_service: Arc::new(FilmService::new(SqlxFilmRepository::boxed(pool.clone()))),
        photography_service: Arc::new(PhotographyService::new(SqlxPhotographyRepository::boxed(
            pool.clone(),
        ))),
        editorial_service: Arc::new(EditorialService::new(SqlxEditorialRepository::boxed(
            pool.clone(),
        ))),
        contact_service: Arc::new(ContactService::new(SqlxContactRepository::boxed(
            pool.clone(),
        ))),
        image_host: host,
        upload_config: Arc::new(UploadConfig::default()),
        admin_token: Arc::new(ADMIN_TOKEN.to_string()),
    };

    let app = build_router(state, "http://localhost:3000");
    TestServer::new(app).unwrap()
}

async fn test_server() -> TestServer {
    test_server_with_host(Arc::new(StubImageHost { fail: false })).await
}

fn album_payload(title: &str, published: bool) -> Value {
    json!({
        "title": title,
        "location": "B",
        "description": "Dunes at dusk",
        "images": ["http://x/1.jpg"],
        "published": published,
    })
}

#[tokio::test]
async fn test_photography_draft_scenario() {
    let server = test_server().await;

    // Admin creates a draft album
    let created = server
        .post("/api/v1/photography")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&album_payload("A", false))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    // Admin get returns the stored fields plus id and timestamps
    let fetched = server
        .get(&format!("/api/v1/photography/{id}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    fetched.assert_status_ok();
    let body = fetched.json::<Value>();
    assert_eq!(body["title"], "A");
    assert_eq!(body["location"], "B");
    assert_eq!(body["images"][0], "http://x/1.jpg");
    assert_eq!(body["published"], false);
    assert_eq!(body["id"].as_str().unwrap(), id);
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());

    // Public list excludes the draft
    let public = server.get("/api/v1/photography").await.json::<Value>();
    assert_eq!(public["items"].as_array().unwrap().len(), 0);
    assert_eq!(public["hasMore"], false);

    // Admin list includes it
    let admin = server
        .get("/api/v1/photography")
        .add_query_param("admin", "true")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(admin["items"].as_array().unwrap().len(), 1);

    // Public get of a draft does not leak
    let public_get = server.get(&format!("/api/v1/photography/{id}")).await;
    public_get.assert_status_not_found();
}

#[tokio::test]
async fn test_contact_inquiry_lifecycle() {
    let server = test_server().await;

    // Public submission, no auth
    let submitted = server
        .post("/api/v1/contact")
        .json(&json!({
            "name": "J",
            "email": "j@x.com",
            "phone": "123",
            "details": "...",
            "location": "Y",
        }))
        .await;
    submitted.assert_status(axum::http::StatusCode::CREATED);

    // Admin inbox shows it unread
    let inbox = server
        .get("/api/v1/contact")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json::<Value>();
    let items = inbox["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["read"], false);
    let id = items[0]["id"].as_str().unwrap().to_string();

    // Mark read
    let marked = server
        .post(&format!("/api/v1/contact/{id}/read"))
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    marked.assert_status_ok();

    // Delete by query id, then the inbox is empty
    let deleted = server
        .delete("/api/v1/contact")
        .add_query_param("id", &id)
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    deleted.assert_status_ok();

    let inbox = server
        .get("/api/v1/contact")
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(inbox["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_contact_inbox_requires_admin() {
    let server = test_server().await;
    server.get("/api/v1/contact").await.assert_status_unauthorized();
}

#[tokio::test]
async fn test_blog_validation_returns_issues() {
    let server = test_server().await;

    let response = server
        .post("/api/v1/blogs")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({
            "title": "Post",
            "shortDescription": "teaser",
            "description": [],
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Validation failed");
    let issues = body["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["field"] == "description"));
}

#[tokio::test]
async fn test_blog_body_survives_roundtrip_and_drafts_stay_hidden() {
    let server = test_server().await;

    let blocks = json!([
        { "type": "heading1", "content": "Why film" },
        { "type": "paragraph", "content": "Grain is texture." },
        { "type": "heading2", "content": "Stocks" },
    ]);
    let created = server
        .post("/api/v1/blogs")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({
            "title": "Field notes",
            "shortDescription": "On film",
            "description": blocks,
            "published": false,
        }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    // Draft is hidden from the public
    server
        .get(&format!("/api/v1/blogs/{id}"))
        .await
        .assert_status_not_found();

    // Admin sees the body in order
    let body = server
        .get(&format!("/api/v1/blogs/{id}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .json::<Value>();
    assert_eq!(body["description"], blocks);
}

#[tokio::test]
async fn test_update_after_delete_is_404() {
    let server = test_server().await;

    let created = server
        .post("/api/v1/films")
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({
            "title": "Coast",
            "location": "Amalfi",
            "videoUrl": "https://vimeo.com/1",
        }))
        .await;
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/v1/films/{id}"))
        .authorization_bearer(ADMIN_TOKEN)
        .await
        .assert_status_ok();

    let updated = server
        .put(&format!("/api/v1/films/{id}"))
        .authorization_bearer(ADMIN_TOKEN)
        .json(&json!({
            "title": "Coast II",
            "location": "Amalfi",
            "videoUrl": "https://vimeo.com/2",
        }))
        .await;
    updated.assert_status_not_found();
}

#[tokio::test]
async fn test_cursor_pagination_over_http() {
    let server = test_server().await;

    for i in 0..5 {
        server
            .post("/api/v1/photography")
            .authorization_bearer(ADMIN_TOKEN)
            .json(&album_payload(&format!("album-{i}"), true))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let mut seen = HashSet::new();
    let mut last_id: Option<String> = None;
    loop {
        let mut request = server.get("/api/v1/photography").add_query_param("limit", "2");
        if let Some(cursor) = &last_id {
            request = request.add_query_param("lastId", cursor);
        }
        let page = request.await.json::<Value>();

        for item in page["items"].as_array().unwrap() {
            assert!(
                seen.insert(item["id"].as_str().unwrap().to_string()),
                "duplicate item across pages"
            );
        }

        if !page["hasMore"].as_bool().unwrap() {
            break;
        }
        last_id = page["lastId"].as_str().map(str::to_string);
    }

    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn test_admin_filter_requires_token() {
    let server = test_server().await;

    // admin=true without a token is an auth error, not a silent fallback
    server
        .get("/api/v1/photography")
        .add_query_param("admin", "true")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_write_routes_reject_bad_tokens() {
    let server = test_server().await;

    server
        .post("/api/v1/photography")
        .json(&album_payload("A", false))
        .await
        .assert_status_unauthorized();

    server
        .post("/api/v1/photography")
        .authorization_bearer("wrong-token")
        .json(&album_payload("A", false))
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn test_upload_delegates_to_image_host() {
    let server = test_server().await;

    let form = axum_test::multipart::MultipartForm::new().add_part(
        "image",
        axum_test::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF])
            .file_name("shot.jpg")
            .mime_type("image/jpeg"),
    );

    let response = server
        .post("/api/v1/upload/image")
        .authorization_bearer(ADMIN_TOKEN)
        .multipart(form)
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["url"], "https://i.example.com/shot.jpg");
    assert_eq!(body["deleteUrl"], "https://example.com/delete/shot.jpg");
    assert_eq!(body["thumbUrl"], "https://i.example.com/thumb/shot.jpg");
}

#[tokio::test]
async fn test_upload_failure_is_bad_gateway() {
    let server = test_server_with_host(Arc::new(StubImageHost { fail: true })).await;

    let form = axum_test::multipart::MultipartForm::new().add_part(
        "image",
        axum_test::multipart::Part::bytes(vec![1, 2, 3])
            .file_name("shot.jpg")
            .mime_type("image/jpeg"),
    );

    let response = server
        .post("/api/v1/upload/image")
        .authorization_bearer(ADMIN_TOKEN)
        .multipart(form)
        .await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let server = test_server().await;

    let form = axum_test::multipart::MultipartForm::new().add_part(
        "image",
        axum_test::multipart::Part::bytes(b"%PDF-1.4".to_vec())
            .file_name("doc.pdf")
            .mime_type("application/pdf"),
    );

    let response = server
        .post("/api/v1/upload/image")
        .authorization_bearer(ADMIN_TOKEN)
        .multipart(form)
        .await;
    response.assert_status_bad_request();
}
