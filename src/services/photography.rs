//! Photography service

use std::sync::Arc;

use crate::db::repositories::PhotographyRepository;
use crate::models::{CursorPage, CursorParams, PhotoAlbum};
use crate::services::ContentError;
use crate::validate::{self, PhotoAlbumPayload};

pub struct PhotographyService {
    repo: Arc<dyn PhotographyRepository>,
}

impl PhotographyService {
    pub fn new(repo: Arc<dyn PhotographyRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new album
    pub async fn create(&self, payload: PhotoAlbumPayload) -> Result<PhotoAlbum, ContentError> {
        let input = validate::photo_album(payload)?;
        Ok(self.repo.create(&input).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<PhotoAlbum>, ContentError> {
        Ok(self.repo.get(id).await?)
    }

    /// Validate and fully replace an existing album
    pub async fn update(
        &self,
        id: &str,
        payload: PhotoAlbumPayload,
    ) -> Result<PhotoAlbum, ContentError> {
        let input = validate::photo_album(payload)?;
        self.repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ContentError::NotFound(format!("photography album {id}")))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        Ok(self.repo.delete(id).await?)
    }

    pub async fn list(
        &self,
        published_only: bool,
        params: CursorParams,
    ) -> Result<CursorPage<PhotoAlbum>, ContentError> {
        Ok(self.repo.list(published_only, &params).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxPhotographyRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> PhotographyService {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        PhotographyService::new(SqlxPhotographyRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_draft_album_hidden_from_public_listing() {
        let service = setup().await;

        let created = service
            .create(PhotoAlbumPayload {
                title: "A".to_string(),
                location: "B".to_string(),
                description: "C".to_string(),
                images: vec!["http://x/1.jpg".to_string()],
                published: false,
            })
            .await
            .unwrap();

        let fetched = service.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "A");
        assert_eq!(fetched.location, "B");
        assert_eq!(fetched.images, vec!["http://x/1.jpg".to_string()]);
        assert!(!fetched.published);

        let public = service.list(true, CursorParams::first(10)).await.unwrap();
        assert!(public.is_empty());

        let admin = service.list(false, CursorParams::first(10)).await.unwrap();
        assert_eq!(admin.len(), 1);
    }

    #[tokio::test]
    async fn test_imageless_album_is_rejected() {
        let service = setup().await;
        let err = service
            .create(PhotoAlbumPayload {
                title: "A".to_string(),
                location: "B".to_string(),
                description: "C".to_string(),
                images: vec![],
                published: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }
}
