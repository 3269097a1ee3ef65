use anyhow::Result;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, QueryOrder};
use std::sync::Arc;

use shared::entity::subscribers;
use shared::Lang;

pub struct SubscriberRepository {
    db: Arc<DatabaseConnection>,
}

/// Whether an upsert created a new row or touched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl SubscriberRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<subscribers::Model>> {
        let subscriber = subscribers::Entity::find()
            .filter(subscribers::Column::TelegramId.eq(telegram_id))
            .one(self.db.as_ref())
            .await?;
        Ok(subscriber)
    }

    /// Creates a subscriber, or updates contact data in place when the
    /// telegram id is already registered.
    pub async fn upsert(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        lang: Lang,
        telegram_id: Option<i64>,
        telegram_username: Option<&str>,
    ) -> Result<(UpsertOutcome, subscribers::Model)> {
        if let Some(tg_id) = telegram_id {
            if let Some(existing) = self.find_by_telegram_id(tg_id).await? {
                let mut active: subscribers::ActiveModel = existing.into();
                active.name = ActiveValue::Set(name.to_string());
                active.email = ActiveValue::Set(email.to_string());
                active.phone = ActiveValue::Set(phone.to_string());
                active.telegram_username =
                    ActiveValue::Set(telegram_username.map(|u| u.to_string()));
                active.lang = ActiveValue::Set(lang.as_str().to_string());
                let model = active.update(self.db.as_ref()).await?;
                return Ok((UpsertOutcome::Updated, model));
            }
        }

        let active = subscribers::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            phone: ActiveValue::Set(phone.to_string()),
            telegram_username: ActiveValue::Set(telegram_username.map(|u| u.to_string())),
            telegram_id: ActiveValue::Set(telegram_id),
            lang: ActiveValue::Set(lang.as_str().to_string()),
            ..Default::default()
        };
        let model = active.insert(self.db.as_ref()).await?;
        Ok((UpsertOutcome::Created, model))
    }

    pub async fn list_all(&self) -> Result<Vec<subscribers::Model>> {
        let subscribers = subscribers::Entity::find()
            .order_by_asc(subscribers::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(subscribers)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = subscribers::Entity::find().count(self.db.as_ref()).await?;
        Ok(count)
    }
}
