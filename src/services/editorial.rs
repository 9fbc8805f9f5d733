//! Editorial service

use std::sync::Arc;

use crate::db::repositories::EditorialRepository;
use crate::models::{CursorPage, CursorParams, EditorialImage};
use crate::services::ContentError;
use crate::validate::{self, EditorialPayload};

pub struct EditorialService {
    repo: Arc<dyn EditorialRepository>,
}

impl EditorialService {
    pub fn new(repo: Arc<dyn EditorialRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new editorial image
    pub async fn create(&self, payload: EditorialPayload) -> Result<EditorialImage, ContentError> {
        let input = validate::editorial_image(payload)?;
        Ok(self.repo.create(&input).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<EditorialImage>, ContentError> {
        Ok(self.repo.get(id).await?)
    }

    /// Validate and fully replace an existing editorial image
    pub async fn update(
        &self,
        id: &str,
        payload: EditorialPayload,
    ) -> Result<EditorialImage, ContentError> {
        let input = validate::editorial_image(payload)?;
        self.repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ContentError::NotFound(format!("editorial image {id}")))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        Ok(self.repo.delete(id).await?)
    }

    pub async fn list(
        &self,
        published_only: bool,
        params: CursorParams,
    ) -> Result<CursorPage<EditorialImage>, ContentError> {
        Ok(self.repo.list(published_only, &params).await?)
    }
}
