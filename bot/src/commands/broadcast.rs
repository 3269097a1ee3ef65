//! Admin broadcast flow: pick an audience, draft the text, confirm, send.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use rust_i18n::t;

use crate::commands::CallbackCtx;
use crate::render::menus;
use crate::services::broadcast::{deliver, Audience};
use crate::state::{AppState, BotState, BroadcastDraft, HandlerResult, MyDialogue};

/// An audience button was pressed: ask for the message text.
pub async fn prompt_for_text(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
    audience: Audience,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    dialogue.update(BotState::AwaitingBroadcastText(audience)).await?;
    let screen = menus::broadcast_prompt(lang);
    bot.edit_message_text(ctx.chat_id, ctx.message_id, screen.text)
        .reply_markup(screen.markup)
        .await?;
    Ok(())
}

/// The admin replied with the draft; show it back with the recipient
/// count and ask for confirmation.
pub async fn receive_draft(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    audience: Audience,
    state: std::sync::Arc<AppState>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let lang = state.admin_prefs.lang(user_id).await;
    let Some(text) = msg.text().map(str::to_owned) else {
        bot.send_message(msg.chat.id, t!("admin.broadcast_prompt", locale = lang.as_str()))
            .await?;
        return Ok(());
    };

    let count = state.broadcasts.recipients(audience).await?.len();
    let screen = menus::broadcast_confirm(lang, audience, count, &text);
    bot.send_message(msg.chat.id, screen.text)
        .reply_markup(screen.markup)
        .await?;
    dialogue
        .update(BotState::AwaitingBroadcastConfirm(BroadcastDraft {
            audience,
            text,
        }))
        .await?;
    Ok(())
}

/// "Yes, send": deliver the draft with live progress on the pressed
/// message, then report and return to the panel.
pub async fn execute(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let locale = lang.as_str();

    let Ok(Some(BotState::AwaitingBroadcastConfirm(draft))) = dialogue.get().await else {
        bot.edit_message_text(
            ctx.chat_id,
            ctx.message_id,
            t!("admin.broadcast_expired", locale = locale).into_owned(),
        )
        .await?;
        return Ok(());
    };
    dialogue.update(BotState::Browsing(lang)).await?;

    let recipients = state.broadcasts.recipients(draft.audience).await?;
    bot.edit_message_text(
        ctx.chat_id,
        ctx.message_id,
        t!("admin.broadcast_progress_start", locale = locale, count = recipients.len()).into_owned(),
    )
    .await?;

    let report = deliver(
        &recipients,
        |chat_id| {
            let bot = bot.clone();
            let text = draft.text.clone();
            async move {
                bot.send_message(ChatId(chat_id), text).await?;
                Ok(())
            }
        },
        |done, total| {
            let bot = bot.clone();
            async move {
                let progress = t!(
                    "admin.broadcast_progress",
                    locale = locale,
                    done = done,
                    total = total
                );
                if let Err(error) = bot
                    .edit_message_text(ctx.chat_id, ctx.message_id, progress.into_owned())
                    .await
                {
                    tracing::warn!(%error, "failed to update broadcast progress");
                }
            }
        },
    )
    .await;

    tracing::info!(
        audience = draft.audience.tag(),
        successful = report.successful,
        failed = report.failed,
        "broadcast finished"
    );
    bot.edit_message_text(
        ctx.chat_id,
        ctx.message_id,
        t!(
            "admin.broadcast_report",
            locale = locale,
            target = draft.audience.target_name(lang),
            successful = report.successful,
            failed = report.failed,
            total = report.total()
        )
        .into_owned(),
    )
    .await?;

    let panel = menus::admin_panel(lang);
    bot.send_message(ctx.chat_id, panel.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(panel.markup)
        .await?;
    Ok(())
}

/// Abandons the draft at any point and returns to the panel.
pub async fn cancel(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    dialogue.update(BotState::Browsing(lang)).await?;
    let panel = menus::admin_panel(lang);
    bot.edit_message_text(ctx.chat_id, ctx.message_id, panel.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(panel.markup)
        .await?;
    Ok(())
}
