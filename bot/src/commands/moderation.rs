//! Admin moderation: activating and rejecting submitted accounts.

use teloxide::prelude::*;

use rust_i18n::t;

use shared::entity::trading_accounts::AccountStatus;

use crate::commands::CallbackCtx;
use crate::services::notifier;
use crate::state::{AppState, BotState, HandlerResult, MyDialogue, RejectionPrompt};

/// "Activate" on a moderation notice: flip the status, tell the owner,
/// clear every admin's copy of the notice.
pub async fn activate(
    bot: &Bot,
    state: &AppState,
    ctx: CallbackCtx,
    account_id: i32,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let locale = lang.as_str();
    if !state.accounts.activate(account_id).await? {
        bot.send_message(ctx.chat_id, t!("admin.activate_failed", locale = locale))
            .await?;
        return Ok(());
    }
    tracing::info!(account_id, admin_id = ctx.user_id, "account activated");

    notifier::notify_owner(state, account_id, AccountStatus::Active, None).await?;

    if let Err(error) = bot.delete_message(ctx.chat_id, ctx.message_id).await {
        tracing::warn!(%error, "failed to delete pressed moderation notice");
    }
    notifier::retract_admin_notices(state, account_id).await;

    bot.send_message(ctx.chat_id, t!("admin.account_activated", locale = locale))
        .await?;
    Ok(())
}

/// "Reject" on a moderation notice: ask this admin for the reason.
pub async fn start_rejection(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
    account_id: i32,
) -> HandlerResult {
    let lang = state.admin_prefs.lang(ctx.user_id).await;
    let prompt = bot
        .send_message(ctx.chat_id, t!("admin.rejection_prompt", locale = lang.as_str()))
        .await?;
    dialogue
        .update(BotState::AwaitingRejectionReason(RejectionPrompt {
            account_id,
            chat_id: ctx.chat_id,
            notification_msg: ctx.message_id,
            prompt_msg: prompt.id,
        }))
        .await?;
    Ok(())
}

/// The admin typed the rejection reason: persist it, tell the owner,
/// then clean the prompt and every pending notice out of the chats.
pub async fn receive_rejection_reason(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    prompt: RejectionPrompt,
    state: std::sync::Arc<AppState>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let lang = state.admin_prefs.lang(user.id.0 as i64).await;
    let locale = lang.as_str();

    let reason = msg.text().map(str::trim).unwrap_or_default();
    if reason.is_empty() {
        bot.send_message(msg.chat.id, t!("admin.rejection_empty", locale = locale))
            .await?;
        return Ok(());
    }

    if !state.accounts.reject(prompt.account_id, reason).await? {
        bot.send_message(msg.chat.id, t!("admin.reject_failed", locale = locale))
            .await?;
        dialogue.update(BotState::Browsing(lang)).await?;
        return Ok(());
    }
    tracing::info!(
        account_id = prompt.account_id,
        admin_id = user.id.0,
        "account rejected"
    );

    notifier::notify_owner(
        &state,
        prompt.account_id,
        AccountStatus::Rejected,
        Some(reason),
    )
    .await?;

    // The pressed notice, the reason prompt and the typed reply are all
    // transient; only the confirmation stays in the chat.
    for message_id in [prompt.notification_msg, prompt.prompt_msg, msg.id] {
        if let Err(error) = bot.delete_message(prompt.chat_id, message_id).await {
            tracing::warn!(%error, "failed to clean up rejection flow message");
        }
    }
    notifier::retract_admin_notices(&state, prompt.account_id).await;

    bot.send_message(msg.chat.id, t!("admin.account_rejected", locale = locale))
        .await?;
    dialogue.update(BotState::Browsing(lang)).await?;
    Ok(())
}
