use anyhow::Result;
use sea_orm::prelude::DatabaseConnection;
use std::sync::Arc;

use shared::entity::subscribers;
use shared::validation::validate_contact;
use shared::{Lang, ValidationError};

use crate::repositories::{SubscriberRepository, UpsertOutcome};

pub struct SubscriberService {
    repo: SubscriberRepository,
}

impl SubscriberService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repo: SubscriberRepository::new(db),
        }
    }

    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<subscribers::Model>> {
        self.repo.find_by_telegram_id(telegram_id).await
    }

    /// Validates contact data and creates or refreshes the subscriber row.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        lang: Lang,
        telegram_id: Option<i64>,
        telegram_username: Option<&str>,
    ) -> Result<(UpsertOutcome, subscribers::Model), RegisterError> {
        validate_contact(name, email, phone)?;
        let outcome = self
            .repo
            .upsert(
                name.trim(),
                email.trim(),
                phone.trim(),
                lang,
                telegram_id,
                telegram_username,
            )
            .await?;
        Ok(outcome)
    }

    /// Preferred interface language for a Telegram user; Arabic when the
    /// user has never registered.
    pub async fn lang_for(&self, telegram_id: i64) -> Lang {
        match self.repo.find_by_telegram_id(telegram_id).await {
            Ok(Some(subscriber)) => Lang::from_code(&subscriber.lang),
            Ok(None) => Lang::default(),
            Err(error) => {
                tracing::error!(telegram_id, %error, "subscriber lookup failed");
                Lang::default()
            }
        }
    }

    pub async fn count(&self) -> Result<u64> {
        self.repo.count().await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}
