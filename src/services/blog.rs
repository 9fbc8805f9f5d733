//! Blog service

use std::sync::Arc;

use crate::db::repositories::BlogRepository;
use crate::models::{BlogPost, CursorPage, CursorParams};
use crate::services::ContentError;
use crate::validate::{self, BlogPayload};

pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new post
    pub async fn create(&self, payload: BlogPayload) -> Result<BlogPost, ContentError> {
        let input = validate::blog_post(payload)?;
        Ok(self.repo.create(&input).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<BlogPost>, ContentError> {
        Ok(self.repo.get(id).await?)
    }

    /// Validate and fully replace an existing post
    pub async fn update(&self, id: &str, payload: BlogPayload) -> Result<BlogPost, ContentError> {
        let input = validate::blog_post(payload)?;
        self.repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ContentError::NotFound(format!("blog post {id}")))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        Ok(self.repo.delete(id).await?)
    }

    pub async fn list(
        &self,
        published_only: bool,
        params: CursorParams,
    ) -> Result<CursorPage<BlogPost>, ContentError> {
        Ok(self.repo.list(published_only, &params).await?)
    }
}
