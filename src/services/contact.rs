//! Contact inquiry service

use std::sync::Arc;

use crate::db::repositories::ContactRepository;
use crate::models::{ContactInquiry, CursorPage, CursorParams};
use crate::services::ContentError;
use crate::validate::{self, ContactPayload};

pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a public inquiry
    pub async fn submit(&self, payload: ContactPayload) -> Result<ContactInquiry, ContentError> {
        let input = validate::contact_inquiry(payload)?;
        Ok(self.repo.create(&input).await?)
    }

    pub async fn list(
        &self,
        params: CursorParams,
    ) -> Result<CursorPage<ContactInquiry>, ContentError> {
        Ok(self.repo.list(&params).await?)
    }

    /// Flag an inquiry as seen by the admin
    pub async fn mark_read(&self, id: &str) -> Result<(), ContentError> {
        if self.repo.mark_read(id).await? {
            Ok(())
        } else {
            Err(ContentError::NotFound(format!("contact inquiry {id}")))
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        Ok(self.repo.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxContactRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> ContactService {
        let pool = create_test_pool().await.unwrap();
        migrations::run_migrations(&pool).await.unwrap();
        ContactService::new(SqlxContactRepository::boxed(pool))
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            name: "J".to_string(),
            email: "j@x.com".to_string(),
            phone: "123".to_string(),
            details: "Engagement shoot".to_string(),
            location: "Y".to_string(),
            date: None,
            days: None,
        }
    }

    #[tokio::test]
    async fn test_submit_then_delete_lifecycle() {
        let service = setup().await;

        let stored = service.submit(payload()).await.unwrap();
        assert!(!stored.read);

        service.delete(&stored.id).await.unwrap();
        let page = service.list(CursorParams::first(10)).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let service = setup().await;
        let mut bad = payload();
        bad.email = "not-an-email".to_string();
        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_mark_read_missing_inquiry_is_not_found() {
        let service = setup().await;
        let err = service.mark_read("ghost").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}
