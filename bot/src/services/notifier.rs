//! Outbound notifications: admin moderation notices, their retraction
//! once any admin acts, and the status notices sent back to the owner.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use shared::entity::trading_accounts::AccountStatus;
use shared::Lang;

use crate::render::{menus, no_preview};
use crate::services::account_service::AccountEvent;
use crate::state::AppState;
use crate::trackers::{FormRef, OriginTag};

/// Sends the moderation notice for a created or edited account to every
/// configured admin, each in their own language, and records the message
/// ids so they can be retracted after a decision.
pub async fn notify_admins(state: &AppState, event: &AccountEvent) -> Result<()> {
    if state.config.admin_telegram_ids.is_empty() {
        tracing::warn!("no admins configured, moderation notice dropped");
        return Ok(());
    }
    for &admin_id in &state.config.admin_telegram_ids {
        let lang = state.admin_prefs.lang(admin_id).await;
        let screen = menus::admin_account_notice(lang, event.is_update, &event.account, &event.subscriber);
        let sent = state
            .bot
            .send_message(ChatId(admin_id), screen.text)
            .parse_mode(ParseMode::Html)
            .reply_markup(screen.markup)
            .await;
        match sent {
            Ok(message) => {
                state
                    .notifications
                    .append(event.account.id, message.chat.id, message.id)
                    .await;
            }
            Err(error) => {
                tracing::error!(admin_id, %error, "failed to notify admin");
            }
        }
    }
    Ok(())
}

/// Deletes every pending moderation notice for the account from all
/// admin chats. Called once any single admin has decided.
pub async fn retract_admin_notices(state: &AppState, account_id: i32) {
    for (chat_id, message_id) in state.notifications.drain(account_id).await {
        if let Err(error) = state.bot.delete_message(chat_id, message_id).await {
            tracing::warn!(%chat_id, %error, "failed to delete moderation notice");
        }
    }
}

/// Tells the account owner about the moderation decision and refreshes
/// their accounts screen if it is on display.
pub async fn notify_owner(
    state: &AppState,
    account_id: i32,
    status: AccountStatus,
    reason: Option<&str>,
) -> Result<()> {
    let Some((account, subscriber)) = state.accounts.find_with_subscriber(account_id).await? else {
        return Ok(());
    };
    let Some(telegram_id) = subscriber.telegram_id else {
        return Ok(());
    };
    // A live form reference carries the language the user last browsed
    // in, which may be fresher than the stored row.
    let lang = match state.forms.get(telegram_id).await {
        Some(form) => form.lang,
        None => Lang::from_code(&subscriber.lang),
    };

    let agent_link = state.config.agent_link(account.agent.as_deref().unwrap_or(""));
    let screen = menus::user_status_notice(lang, &account, status, reason, &agent_link);
    state
        .bot
        .send_message(ChatId(telegram_id), screen.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(screen.markup)
        .await?;

    refresh_my_accounts_if_open(state, telegram_id, lang).await;
    Ok(())
}

/// Re-renders the "My Data & Accounts" message in place when the user
/// currently has it open; falls back to a fresh message if editing the
/// remembered one fails.
pub async fn refresh_my_accounts_if_open(state: &AppState, telegram_id: i64, lang: Lang) {
    let Some(form) = state.forms.get(telegram_id).await else {
        return;
    };
    if form.origin != OriginTag::MyAccounts {
        return;
    }
    if let Err(error) = refresh_my_accounts(state, telegram_id, lang, form).await {
        tracing::error!(telegram_id, %error, "failed to refresh accounts screen");
    }
}

async fn refresh_my_accounts(
    state: &AppState,
    telegram_id: i64,
    lang: Lang,
    form: FormRef,
) -> Result<()> {
    let Some((subscriber, accounts)) = state.accounts.list_for_telegram(telegram_id).await.map_err(anyhow::Error::from)? else {
        return Ok(());
    };
    let today = chrono::Utc::now().date_naive();
    let screen = menus::my_accounts(
        lang,
        &subscriber,
        &accounts,
        today,
        state.config.webapp_url.as_deref(),
    );

    let edited = state
        .bot
        .edit_message_text(form.chat_id, form.message_id, screen.text.clone())
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_preview())
        .reply_markup(screen.markup.clone())
        .await;

    let (chat_id, message_id) = match edited {
        Ok(message) => (message.chat.id, message.id),
        Err(_) => {
            let sent = state
                .bot
                .send_message(ChatId(telegram_id), screen.text)
                .parse_mode(ParseMode::Html)
                .link_preview_options(no_preview())
                .reply_markup(screen.markup)
                .await?;
            (sent.chat.id, sent.id)
        }
    };
    state
        .forms
        .remember(
            telegram_id,
            FormRef {
                chat_id,
                message_id,
                lang,
                origin: OriginTag::MyAccounts,
            },
        )
        .await;
    Ok(())
}
