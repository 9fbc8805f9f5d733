//! Film service

use std::sync::Arc;

use crate::db::repositories::FilmRepository;
use crate::models::{CursorPage, CursorParams, Film};
use crate::services::ContentError;
use crate::validate::{self, FilmPayload};

pub struct FilmService {
    repo: Arc<dyn FilmRepository>,
}

impl FilmService {
    pub fn new(repo: Arc<dyn FilmRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new film
    pub async fn create(&self, payload: FilmPayload) -> Result<Film, ContentError> {
        let input = validate::film(payload)?;
        Ok(self.repo.create(&input).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Film>, ContentError> {
        Ok(self.repo.get(id).await?)
    }

    /// Validate and fully replace an existing film
    pub async fn update(&self, id: &str, payload: FilmPayload) -> Result<Film, ContentError> {
        let input = validate::film(payload)?;
        self.repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ContentError::NotFound(format!("film {id}")))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        Ok(self.repo.delete(id).await?)
    }

    pub async fn list(
        &self,
        published_only: bool,
        params: CursorParams,
    ) -> Result<CursorPage<Film>, ContentError> {
        Ok(self.repo.list(published_only, &params).await?)
    }
}
