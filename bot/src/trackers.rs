//! In-memory bookkeeping shared between the dispatcher and the web server.
//!
//! Nothing here survives a restart; stale entries are tolerated because
//! every consumer falls back to sending a fresh message when an edit of
//! a remembered one fails.

use std::collections::HashMap;

use teloxide::types::{ChatId, MessageId};
use tokio::sync::Mutex;

use shared::Lang;

/// Which screen a form-bearing message was sent from. Decides how the
/// chat is refreshed after a web form submission lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginTag {
    InitialRegistration,
    MainSections,
    Brokers,
    MyAccounts,
}

/// The last message in a chat that carries a web-form button.
#[derive(Debug, Clone, Copy)]
pub struct FormRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub lang: Lang,
    pub origin: OriginTag,
}

/// Remembers, per Telegram user, the most recent form-bearing message so
/// a submission from the web app can refresh the right screen.
#[derive(Default)]
pub struct FormTracker {
    inner: Mutex<HashMap<i64, FormRef>>,
}

impl FormTracker {
    pub async fn remember(&self, telegram_id: i64, form: FormRef) {
        self.inner.lock().await.insert(telegram_id, form);
    }

    pub async fn get(&self, telegram_id: i64) -> Option<FormRef> {
        self.inner.lock().await.get(&telegram_id).copied()
    }

    pub async fn forget(&self, telegram_id: i64) {
        self.inner.lock().await.remove(&telegram_id);
    }
}

/// Admin-side notification messages sent for a pending account, keyed by
/// account id. Drained (and the messages deleted) once any admin acts.
#[derive(Default)]
pub struct NotificationTracker {
    inner: Mutex<HashMap<i32, Vec<(ChatId, MessageId)>>>,
}

impl NotificationTracker {
    pub async fn append(&self, account_id: i32, chat_id: ChatId, message_id: MessageId) {
        self.inner
            .lock()
            .await
            .entry(account_id)
            .or_default()
            .push((chat_id, message_id));
    }

    /// Removes and returns every tracked notification for the account.
    pub async fn drain(&self, account_id: i32) -> Vec<(ChatId, MessageId)> {
        self.inner
            .lock()
            .await
            .remove(&account_id)
            .unwrap_or_default()
    }
}

/// Per-admin interface language. Admins are not subscribers, so their
/// choice lives outside the database.
#[derive(Default)]
pub struct AdminPrefs {
    langs: Mutex<HashMap<i64, Lang>>,
}

impl AdminPrefs {
    pub async fn set_lang(&self, telegram_id: i64, lang: Lang) {
        self.langs.lock().await.insert(telegram_id, lang);
    }

    pub async fn lang(&self, telegram_id: i64) -> Lang {
        self.langs
            .lock()
            .await
            .get(&telegram_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn form_tracker_keeps_latest_per_user() {
        let tracker = FormTracker::default();
        let first = FormRef {
            chat_id: ChatId(10),
            message_id: MessageId(1),
            lang: Lang::Ar,
            origin: OriginTag::InitialRegistration,
        };
        let second = FormRef {
            chat_id: ChatId(10),
            message_id: MessageId(2),
            lang: Lang::En,
            origin: OriginTag::MyAccounts,
        };
        tracker.remember(5, first).await;
        tracker.remember(5, second).await;

        let got = tracker.get(5).await.unwrap();
        assert_eq!(got.message_id, MessageId(2));
        assert_eq!(got.origin, OriginTag::MyAccounts);

        tracker.forget(5).await;
        assert!(tracker.get(5).await.is_none());
    }

    #[tokio::test]
    async fn notification_tracker_drains_once() {
        let tracker = NotificationTracker::default();
        tracker.append(3, ChatId(100), MessageId(7)).await;
        tracker.append(3, ChatId(200), MessageId(8)).await;
        tracker.append(4, ChatId(100), MessageId(9)).await;

        let drained = tracker.drain(3).await;
        assert_eq!(drained.len(), 2);
        assert!(tracker.drain(3).await.is_empty());
        assert_eq!(tracker.drain(4).await.len(), 1);
    }

    #[tokio::test]
    async fn admin_prefs_default_to_arabic() {
        let prefs = AdminPrefs::default();
        assert_eq!(prefs.lang(1).await, Lang::Ar);
        prefs.set_lang(1, Lang::En).await;
        assert_eq!(prefs.lang(1).await, Lang::En);
    }
}
