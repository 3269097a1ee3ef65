use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::prelude::DatabaseConnection;
use sea_orm::ActiveValue;
use std::sync::Arc;

use shared::entity::account_performances;
use shared::entity::trading_accounts::AccountStatus;
use shared::performance;
use shared::Lang;

use crate::repositories::{AccountRepository, PerformanceRepository};

pub struct PerformanceService {
    accounts: AccountRepository,
    performances: PerformanceRepository,
}

impl PerformanceService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            performances: PerformanceRepository::new(db),
        }
    }

    /// Rebuilds the performance snapshot for every active account with
    /// complete financials. Returns how many rows were written.
    pub async fn refresh_all(&self, today: NaiveDate) -> Result<usize> {
        let rows = self.accounts.list_by_status(AccountStatus::Active).await?;
        let mut written = 0;
        for (account, subscriber) in rows {
            if !account.has_complete_financials() {
                continue;
            }
            let Some(achieved) = performance::achieved_return_label(
                account.initial_balance,
                account.current_balance,
                account.withdrawals,
            ) else {
                continue;
            };
            let Some(start) = account.copy_start_date else {
                continue;
            };
            // Snapshot durations are kept in Arabic, matching the
            // reports this table feeds.
            let duration = performance::copy_duration(start, today, Lang::Ar);

            let snapshot = account_performances::ActiveModel {
                trading_account_id: ActiveValue::Set(account.id),
                name: ActiveValue::Set(subscriber.name.clone()),
                email: ActiveValue::Set(subscriber.email.clone()),
                phone: ActiveValue::Set(subscriber.phone.clone()),
                telegram_username: ActiveValue::Set(subscriber.telegram_username.clone()),
                initial_balance: ActiveValue::Set(account.initial_balance),
                achieved_return: ActiveValue::Set(Some(achieved)),
                copy_duration: ActiveValue::Set(Some(duration)),
                ..Default::default()
            };
            self.performances.upsert(snapshot).await?;
            written += 1;
        }
        tracing::info!(written, "performance snapshots refreshed");
        Ok(written)
    }
}
