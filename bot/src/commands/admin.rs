//! /admin panel: menus, statistics, account lists and settings.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use rust_i18n::t;

use shared::entity::trading_accounts::AccountStatus;
use shared::Lang;

use crate::commands::CallbackCtx;
use crate::render::menus::{self, Screen, StatsSummary};
use crate::render::no_preview;
use crate::state::{AppState, BotState, HandlerResult, MyDialogue};

async fn edit_screen(bot: &Bot, ctx: CallbackCtx, screen: Screen) -> HandlerResult {
    bot.edit_message_text(ctx.chat_id, ctx.message_id, screen.text)
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_preview())
        .reply_markup(screen.markup)
        .await?;
    Ok(())
}

/// Shows a short confirmation on the pressed message, then replaces it
/// with the follow-up screen.
async fn flash_then(
    bot: &Bot,
    ctx: CallbackCtx,
    flash: &str,
    hold: Duration,
    screen: Screen,
) -> HandlerResult {
    bot.edit_message_text(ctx.chat_id, ctx.message_id, flash)
        .await?;
    tokio::time::sleep(hold).await;
    edit_screen(bot, ctx, screen).await
}

/// /admin entry point.
pub async fn handle_admin(bot: Bot, msg: Message, state: std::sync::Arc<AppState>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    if !state.config.is_admin(user_id) {
        let lang = state.display_lang(user_id).await;
        bot.send_message(msg.chat.id, t!("common.not_authorized", locale = lang.as_str()))
            .await?;
        return Ok(());
    }
    let lang = state.admin_prefs.lang(user_id).await;
    let screen = menus::admin_panel(lang);
    bot.send_message(msg.chat.id, screen.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(screen.markup)
        .await?;
    Ok(())
}

pub async fn show_panel(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    edit_screen(bot, ctx, menus::admin_panel(lang)).await
}

pub async fn show_broadcast_menu(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    edit_screen(bot, ctx, menus::admin_broadcast_menu(lang)).await
}

pub async fn show_accounts_menu(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    edit_screen(bot, ctx, menus::admin_accounts_menu(lang)).await
}

pub async fn show_settings(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    edit_screen(bot, ctx, menus::admin_settings(lang)).await
}

pub async fn show_stats(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let subscribers = state.subscribers.count().await?;
    let stats = StatsSummary {
        subscribers,
        registered: subscribers,
        approved_owners: state.accounts.count_approved_owners().await?,
        under_review: state.accounts.count_by_status(AccountStatus::UnderReview).await?,
        active: state.accounts.count_by_status(AccountStatus::Active).await?,
        rejected: state.accounts.count_by_status(AccountStatus::Rejected).await?,
    };
    edit_screen(bot, ctx, menus::admin_stats(lang, &stats)).await
}

pub async fn show_change_language(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    edit_screen(bot, ctx, menus::admin_change_language(lang)).await
}

pub async fn set_language(
    bot: &Bot,
    state: &AppState,
    ctx: CallbackCtx,
    lang: Lang,
) -> HandlerResult {
    state.admin_prefs.set_lang(ctx.user_id, lang).await;
    flash_then(
        bot,
        ctx,
        &t!("admin.lang_changed", locale = lang.as_str()),
        Duration::from_secs(1),
        menus::admin_panel(lang),
    )
    .await
}

pub async fn show_accounts_list(
    bot: &Bot,
    state: &AppState,
    ctx: CallbackCtx,
    status: AccountStatus,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let rows = state.accounts.list_by_status(status).await?;
    edit_screen(bot, ctx, menus::admin_accounts_list(lang, status, &rows)).await
}

pub async fn update_performances(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let locale = lang.as_str();
    let today = chrono::Utc::now().date_naive();
    let flash = match state.performances.refresh_all(today).await {
        Ok(updated) => {
            tracing::info!(updated, "performance snapshots refreshed from settings");
            t!("admin.perf_updated", locale = locale)
        }
        Err(error) => {
            tracing::error!(%error, "performance refresh failed");
            t!("admin.perf_update_failed", locale = locale)
        }
    };
    flash_then(
        bot,
        ctx,
        &flash,
        Duration::from_secs(2),
        menus::admin_settings(lang),
    )
    .await
}

pub async fn reset_sequences(bot: &Bot, state: &AppState, ctx: CallbackCtx) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let locale = lang.as_str();
    let flash = match state.accounts.reset_sequences().await {
        Ok(()) => t!("admin.seq_reset", locale = locale),
        Err(error) => {
            tracing::error!(%error, "sequence reset failed");
            t!("admin.seq_reset_failed", locale = locale)
        }
    };
    flash_then(
        bot,
        ctx,
        &flash,
        Duration::from_secs(2),
        menus::admin_settings(lang),
    )
    .await
}

/// Leaves the panel and drops back to the regular main sections.
pub async fn exit_panel(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    dialogue.update(BotState::Browsing(lang)).await?;
    flash_then(
        bot,
        ctx,
        &t!("admin.exited", locale = lang.as_str()),
        Duration::from_secs(1),
        menus::main_sections(lang),
    )
    .await
}
