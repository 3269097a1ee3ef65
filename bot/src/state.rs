use std::sync::Arc;

use sea_orm::prelude::DatabaseConnection;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::prelude::*;
use teloxide::types::MessageId;

use shared::{Config, Lang};

use crate::services::account_service::AccountService;
use crate::services::broadcast::{Audience, BroadcastService};
use crate::services::performance_service::PerformanceService;
use crate::services::subscriber_service::SubscriberService;
use crate::trackers::{AdminPrefs, FormTracker, NotificationTracker};

/// Everything the dispatcher and the web server share.
pub struct AppState {
    pub config: Config,
    pub db: Arc<DatabaseConnection>,
    pub bot: Bot,
    pub subscribers: SubscriberService,
    pub accounts: AccountService,
    pub performances: PerformanceService,
    pub broadcasts: BroadcastService,
    pub forms: FormTracker,
    pub notifications: NotificationTracker,
    pub admin_prefs: AdminPrefs,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection, bot: Bot) -> Self {
        let db = Arc::new(db);
        Self {
            subscribers: SubscriberService::new(db.clone()),
            accounts: AccountService::new(db.clone()),
            performances: PerformanceService::new(db.clone()),
            broadcasts: BroadcastService::new(db.clone()),
            forms: FormTracker::default(),
            notifications: NotificationTracker::default(),
            admin_prefs: AdminPrefs::default(),
            config,
            db,
            bot,
        }
    }

    /// Interface language for a Telegram user: admins keep their own
    /// preference, everyone else follows their subscriber row.
    pub async fn display_lang(&self, telegram_id: i64) -> Lang {
        if self.config.is_admin(telegram_id) {
            self.admin_prefs.lang(telegram_id).await
        } else {
            self.subscribers.lang_for(telegram_id).await
        }
    }
}

/// An admin pressed "reject" and the bot is waiting for the free-text
/// reason in their chat.
#[derive(Clone, Debug)]
pub struct RejectionPrompt {
    pub account_id: i32,
    pub chat_id: ChatId,
    pub notification_msg: MessageId,
    pub prompt_msg: MessageId,
}

/// A broadcast draft awaiting the admin's confirmation.
#[derive(Clone, Debug)]
pub struct BroadcastDraft {
    pub audience: Audience,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub enum BotState {
    #[default]
    Idle,
    /// Normal browsing after a language pick.
    Browsing(Lang),
    AwaitingRejectionReason(RejectionPrompt),
    AwaitingBroadcastText(Audience),
    AwaitingBroadcastConfirm(BroadcastDraft),
}

pub type MyDialogue = Dialogue<BotState, InMemStorage<BotState>>;
pub type HandlerResult = Result<(), anyhow::Error>;
