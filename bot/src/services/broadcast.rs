//! Audience selection and sequential broadcast delivery.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use sea_orm::prelude::DatabaseConnection;

use shared::entity::trading_accounts::AccountStatus;
use shared::Lang;

use crate::repositories::{AccountRepository, SubscriberRepository};

/// Who a broadcast goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    All,
    Registered,
    Approved,
}

impl Audience {
    pub fn tag(self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Registered => "registered",
            Audience::Approved => "approved",
        }
    }

    pub fn button_label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Audience::All, Lang::Ar) => "📢 بث للجميع",
            (Audience::All, Lang::En) => "📢 Broadcast to All",
            (Audience::Registered, Lang::Ar) => "👥 بث للمسجلين",
            (Audience::Registered, Lang::En) => "👥 To Registered",
            (Audience::Approved, Lang::Ar) => "✅ بث للمقبولين",
            (Audience::Approved, Lang::En) => "✅ To Approved",
        }
    }

    pub fn target_name(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Audience::All, Lang::Ar) => "جميع المشتركين",
            (Audience::All, Lang::En) => "All Subscribers",
            (Audience::Registered, Lang::Ar) => "المسجلين ببيانات",
            (Audience::Registered, Lang::En) => "Registered Users",
            (Audience::Approved, Lang::Ar) => "أصحاب الحسابات المقبولة",
            (Audience::Approved, Lang::En) => "Approved Accounts Owners",
        }
    }
}

/// Outcome counters for one finished broadcast.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub successful: usize,
    pub failed: usize,
}

impl BroadcastReport {
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}

/// Sends `text` to every chat id in order, reporting progress every ten
/// deliveries. A failed send is counted and skipped, never retried.
pub async fn deliver<S, SF, P, PF>(
    recipients: &[i64],
    mut send: S,
    mut on_progress: P,
) -> BroadcastReport
where
    S: FnMut(i64) -> SF,
    SF: Future<Output = Result<()>>,
    P: FnMut(usize, usize) -> PF,
    PF: Future<Output = ()>,
{
    let mut report = BroadcastReport::default();
    for &chat_id in recipients {
        match send(chat_id).await {
            Ok(()) => report.successful += 1,
            Err(error) => {
                tracing::error!(chat_id, %error, "broadcast delivery failed");
                report.failed += 1;
            }
        }
        let done = report.total();
        if done % 10 == 0 {
            on_progress(done, recipients.len()).await;
        }
    }
    report
}

pub struct BroadcastService {
    subscribers: SubscriberRepository,
    accounts: AccountRepository,
}

impl BroadcastService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            subscribers: SubscriberRepository::new(db.clone()),
            accounts: AccountRepository::new(db),
        }
    }

    /// Chat ids for the audience, deduplicated, insertion-ordered.
    pub async fn recipients(&self, audience: Audience) -> Result<Vec<i64>> {
        let ids = match audience {
            // Registered currently equals All: every subscriber row is a
            // completed registration.
            Audience::All | Audience::Registered => self
                .subscribers
                .list_all()
                .await?
                .into_iter()
                .filter_map(|s| s.telegram_id)
                .collect::<Vec<_>>(),
            Audience::Approved => self
                .accounts
                .list_by_status(AccountStatus::Active)
                .await?
                .into_iter()
                .filter_map(|(_, subscriber)| subscriber.telegram_id)
                .collect(),
        };
        let mut seen = HashSet::new();
        Ok(ids.into_iter().filter(|id| seen.insert(*id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn counts_failures_and_keeps_going() {
        let recipients: Vec<i64> = (1..=25).collect();
        let progress_calls = Mutex::new(Vec::new());

        let report = deliver(
            &recipients,
            |chat_id| async move {
                if chat_id % 5 == 0 {
                    anyhow::bail!("blocked");
                }
                Ok(())
            },
            |done, total| {
                progress_calls.lock().unwrap().push((done, total));
                async {}
            },
        )
        .await;

        assert_eq!(report.successful, 20);
        assert_eq!(report.failed, 5);
        assert_eq!(report.total(), 25);
        assert_eq!(*progress_calls.lock().unwrap(), vec![(10, 25), (20, 25)]);
    }

    #[tokio::test]
    async fn empty_audience_reports_zero() {
        let report = deliver(&[], |_| async { Ok(()) }, |_, _| async {}).await;
        assert_eq!(report, BroadcastReport::default());
    }
}
