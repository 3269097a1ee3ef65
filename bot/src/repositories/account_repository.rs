use anyhow::Result;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, QueryOrder, Statement};
use std::sync::Arc;

use shared::entity::trading_accounts::{self, AccountStatus};
use shared::entity::{account_performances, subscribers};
use shared::{AccountPatch, NewAccount};

pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, account_id: i32) -> Result<Option<trading_accounts::Model>> {
        let account = trading_accounts::Entity::find_by_id(account_id)
            .one(self.db.as_ref())
            .await?;
        Ok(account)
    }

    pub async fn find_with_subscriber(
        &self,
        account_id: i32,
    ) -> Result<Option<(trading_accounts::Model, subscribers::Model)>> {
        let found = trading_accounts::Entity::find_by_id(account_id)
            .find_also_related(subscribers::Entity)
            .one(self.db.as_ref())
            .await?;
        Ok(found.and_then(|(account, subscriber)| subscriber.map(|s| (account, s))))
    }

    pub async fn list_by_subscriber(
        &self,
        subscriber_id: i32,
    ) -> Result<Vec<trading_accounts::Model>> {
        let accounts = trading_accounts::Entity::find()
            .filter(trading_accounts::Column::SubscriberId.eq(subscriber_id))
            .order_by_asc(trading_accounts::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(accounts)
    }

    pub async fn list_by_status(
        &self,
        status: AccountStatus,
    ) -> Result<Vec<(trading_accounts::Model, subscribers::Model)>> {
        let rows = trading_accounts::Entity::find()
            .filter(trading_accounts::Column::Status.eq(status))
            .order_by_asc(trading_accounts::Column::Id)
            .find_also_related(subscribers::Entity)
            .all(self.db.as_ref())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(account, subscriber)| subscriber.map(|s| (account, s)))
            .collect())
    }

    pub async fn count_by_status(&self, status: AccountStatus) -> Result<u64> {
        let count = trading_accounts::Entity::find()
            .filter(trading_accounts::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    pub async fn insert(
        &self,
        subscriber_id: i32,
        account: NewAccount,
    ) -> Result<trading_accounts::Model> {
        let active = trading_accounts::ActiveModel {
            subscriber_id: ActiveValue::Set(subscriber_id),
            broker_name: ActiveValue::Set(account.broker_name),
            account_number: ActiveValue::Set(account.account_number),
            password: ActiveValue::Set(account.password),
            server: ActiveValue::Set(account.server),
            initial_balance: ActiveValue::Set(Some(account.initial_balance)),
            current_balance: ActiveValue::Set(Some(account.current_balance)),
            withdrawals: ActiveValue::Set(Some(account.withdrawals)),
            copy_start_date: ActiveValue::Set(Some(account.copy_start_date)),
            agent: ActiveValue::Set(Some(account.agent)),
            expected_return: ActiveValue::Set(Some(account.expected_return)),
            status: ActiveValue::Set(AccountStatus::UnderReview),
            ..Default::default()
        };
        let model = active.insert(self.db.as_ref()).await?;
        Ok(model)
    }

    /// Applies the patch and puts the account back under review with any
    /// previous rejection reason cleared.
    pub async fn apply_patch(
        &self,
        account: trading_accounts::Model,
        patch: AccountPatch,
    ) -> Result<trading_accounts::Model> {
        let mut active: trading_accounts::ActiveModel = account.into();
        if let Some(v) = patch.broker_name {
            active.broker_name = ActiveValue::Set(v);
        }
        if let Some(v) = patch.account_number {
            active.account_number = ActiveValue::Set(v);
        }
        if let Some(v) = patch.password {
            active.password = ActiveValue::Set(v);
        }
        if let Some(v) = patch.server {
            active.server = ActiveValue::Set(v);
        }
        if let Some(v) = patch.initial_balance {
            active.initial_balance = ActiveValue::Set(Some(v));
        }
        if let Some(v) = patch.current_balance {
            active.current_balance = ActiveValue::Set(Some(v));
        }
        if let Some(v) = patch.withdrawals {
            active.withdrawals = ActiveValue::Set(Some(v));
        }
        if let Some(v) = patch.copy_start_date {
            active.copy_start_date = ActiveValue::Set(Some(v));
        }
        if let Some(v) = patch.agent {
            active.agent = ActiveValue::Set(Some(v));
        }
        if let Some(v) = patch.expected_return {
            active.expected_return = ActiveValue::Set(Some(v));
        }
        active.status = ActiveValue::Set(AccountStatus::UnderReview);
        active.rejection_reason = ActiveValue::Set(None);
        let model = active.update(self.db.as_ref()).await?;
        Ok(model)
    }

    pub async fn set_status(
        &self,
        account_id: i32,
        status: AccountStatus,
        rejection_reason: Option<String>,
    ) -> Result<bool> {
        let Some(account) = self.find_by_id(account_id).await? else {
            return Ok(false);
        };
        let mut active: trading_accounts::ActiveModel = account.into();
        let reason = match status {
            AccountStatus::Rejected => rejection_reason,
            _ => None,
        };
        active.status = ActiveValue::Set(status);
        active.rejection_reason = ActiveValue::Set(reason);
        active.update(self.db.as_ref()).await?;
        Ok(true)
    }

    pub async fn delete(&self, account_id: i32) -> Result<()> {
        trading_accounts::Entity::delete_by_id(account_id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    /// Realigns MySQL AUTO_INCREMENT counters with the current max ids.
    pub async fn reset_sequences(&self) -> Result<()> {
        for table in ["subscribers", "trading_accounts", "account_performances"] {
            let row = self
                .db
                .query_one(Statement::from_string(
                    self.db.get_database_backend(),
                    format!("SELECT COALESCE(MAX(id), 0) AS max_id FROM {table}"),
                ))
                .await?;
            let max_id: i64 = match row {
                Some(row) => row.try_get("", "max_id")?,
                None => 0,
            };
            self.db
                .execute_unprepared(&format!(
                    "ALTER TABLE {table} AUTO_INCREMENT = {}",
                    max_id + 1
                ))
                .await?;
        }
        Ok(())
    }
}

pub struct PerformanceRepository {
    db: Arc<DatabaseConnection>,
}

impl PerformanceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_account(
        &self,
        trading_account_id: i32,
    ) -> Result<Option<account_performances::Model>> {
        let perf = account_performances::Entity::find()
            .filter(account_performances::Column::TradingAccountId.eq(trading_account_id))
            .one(self.db.as_ref())
            .await?;
        Ok(perf)
    }

    /// Inserts the snapshot, or overwrites the existing row for the same
    /// trading account.
    pub async fn upsert(&self, snapshot: account_performances::ActiveModel) -> Result<()> {
        use sea_orm::ActiveValue;

        let account_id = match &snapshot.trading_account_id {
            ActiveValue::Set(id) => *id,
            _ => anyhow::bail!("performance snapshot without trading_account_id"),
        };
        match self.find_by_account(account_id).await? {
            Some(existing) => {
                let mut active = snapshot;
                active.id = ActiveValue::Set(existing.id);
                active.update(self.db.as_ref()).await?;
            }
            None => {
                snapshot.insert(self.db.as_ref()).await?;
            }
        }
        Ok(())
    }
}
