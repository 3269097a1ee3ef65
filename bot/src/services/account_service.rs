use anyhow::Result;
use sea_orm::prelude::DatabaseConnection;
use std::sync::Arc;

use shared::entity::trading_accounts::{self, AccountStatus};
use shared::entity::subscribers;
use shared::{AccountPatch, NewAccount};

use crate::repositories::{AccountRepository, SubscriberRepository};

/// A persisted account change that still needs admin review. Callers
/// pass it to the notifier so the moderation message is sent (and
/// awaited) as an explicit step.
pub struct AccountEvent {
    pub account: trading_accounts::Model,
    pub subscriber: subscribers::Model,
    pub is_update: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("subscriber not registered")]
    SubscriberNotFound,
    #[error("trading account not found")]
    AccountNotFound,
    #[error("account does not belong to this user")]
    NotOwned,
    #[error("account is under review and cannot be deleted")]
    UnderReviewLocked,
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

pub struct AccountService {
    accounts: AccountRepository,
    subscribers: SubscriberRepository,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            subscribers: SubscriberRepository::new(db),
        }
    }

    pub async fn find_with_subscriber(
        &self,
        account_id: i32,
    ) -> Result<Option<(trading_accounts::Model, subscribers::Model)>> {
        self.accounts.find_with_subscriber(account_id).await
    }

    pub async fn list_for_telegram(
        &self,
        telegram_id: i64,
    ) -> Result<Option<(subscribers::Model, Vec<trading_accounts::Model>)>, AccountError> {
        let Some(subscriber) = self.subscribers.find_by_telegram_id(telegram_id).await? else {
            return Ok(None);
        };
        let accounts = self.accounts.list_by_subscriber(subscriber.id).await?;
        Ok(Some((subscriber, accounts)))
    }

    pub async fn list_by_status(
        &self,
        status: AccountStatus,
    ) -> Result<Vec<(trading_accounts::Model, subscribers::Model)>> {
        self.accounts.list_by_status(status).await
    }

    pub async fn count_by_status(&self, status: AccountStatus) -> Result<u64> {
        self.accounts.count_by_status(status).await
    }

    /// Distinct owners of at least one active account.
    pub async fn count_approved_owners(&self) -> Result<u64> {
        let rows = self.accounts.list_by_status(AccountStatus::Active).await?;
        let mut owners = std::collections::HashSet::new();
        for (_, subscriber) in rows {
            owners.insert(subscriber.id);
        }
        Ok(owners.len() as u64)
    }

    /// Stores a new account under review for the given Telegram user.
    pub async fn create_for_telegram(
        &self,
        telegram_id: i64,
        new_account: NewAccount,
    ) -> Result<AccountEvent, AccountError> {
        let subscriber = self
            .subscribers
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(AccountError::SubscriberNotFound)?;
        let account = self.accounts.insert(subscriber.id, new_account).await?;
        tracing::info!(account_id = account.id, subscriber_id = subscriber.id, "trading account created");
        Ok(AccountEvent {
            account,
            subscriber,
            is_update: false,
        })
    }

    /// Edits an owned account; any edit puts it back under review.
    pub async fn update_owned(
        &self,
        telegram_id: i64,
        account_id: i32,
        patch: AccountPatch,
    ) -> Result<AccountEvent, AccountError> {
        let (account, subscriber) = self.owned_account(telegram_id, account_id).await?;
        let account = self.accounts.apply_patch(account, patch).await?;
        tracing::info!(account_id, "trading account updated, back under review");
        Ok(AccountEvent {
            account,
            subscriber,
            is_update: true,
        })
    }

    /// Deletes an owned account. Accounts still under review are locked
    /// until an admin decides on them.
    pub async fn delete_owned(
        &self,
        telegram_id: i64,
        account_id: i32,
    ) -> Result<(), AccountError> {
        let (account, _) = self.owned_account(telegram_id, account_id).await?;
        if account.status == AccountStatus::UnderReview {
            return Err(AccountError::UnderReviewLocked);
        }
        self.accounts.delete(account_id).await?;
        tracing::info!(account_id, "trading account deleted");
        Ok(())
    }

    pub async fn activate(&self, account_id: i32) -> Result<bool> {
        self.accounts
            .set_status(account_id, AccountStatus::Active, None)
            .await
    }

    pub async fn reject(&self, account_id: i32, reason: &str) -> Result<bool> {
        self.accounts
            .set_status(account_id, AccountStatus::Rejected, Some(reason.to_string()))
            .await
    }

    pub async fn reset_sequences(&self) -> Result<()> {
        self.accounts.reset_sequences().await
    }

    async fn owned_account(
        &self,
        telegram_id: i64,
        account_id: i32,
    ) -> Result<(trading_accounts::Model, subscribers::Model), AccountError> {
        let (account, subscriber) = self
            .accounts
            .find_with_subscriber(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)?;
        if subscriber.telegram_id != Some(telegram_id) {
            return Err(AccountError::NotOwned);
        }
        Ok((account, subscriber))
    }
}
