pub mod admin;
pub mod broadcast;
pub mod moderation;
pub mod start;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::utils::command::BotCommands;

use rust_i18n::t;

use crate::callback::CallbackAction;
use crate::state::{AppState, BotState, HandlerResult, MyDialogue};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "choose a language and start")]
    Start,
    #[command(description = "open the admin panel")]
    Admin,
}

/// Where a callback press happened.
#[derive(Clone, Copy)]
pub struct CallbackCtx {
    pub user_id: i64,
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Single entry point for every callback query: answer it, parse the
/// payload, enforce the admin guard, then hand off by action.
pub async fn dispatch_callback(
    bot: Bot,
    dialogue: MyDialogue,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Ok(action) = data.parse::<CallbackAction>() else {
        tracing::warn!(data, "unrecognized callback payload");
        return Ok(());
    };
    let Some(msg) = q.message else {
        return Ok(());
    };
    let ctx = CallbackCtx {
        user_id: q.from.id.0 as i64,
        chat_id: msg.chat().id,
        message_id: msg.id(),
    };

    if action.requires_admin() && !state.config.is_admin(ctx.user_id) {
        let lang = state.display_lang(ctx.user_id).await;
        bot.send_message(ctx.chat_id, t!("common.not_authorized_action", locale = lang.as_str()))
            .await?;
        return Ok(());
    }

    match action {
        CallbackAction::Lang(lang) => start::set_language(&bot, &dialogue, &state, ctx, lang).await,
        CallbackAction::BackLanguage => start::show_language_picker(&bot, ctx).await,
        CallbackAction::BackMain => start::show_main_sections(&bot, &dialogue, &state, ctx).await,
        CallbackAction::Section(section) => {
            start::show_section(&bot, &dialogue, &state, ctx, section).await
        }
        CallbackAction::CopyTrading => start::show_brokers(&bot, &dialogue, &state, ctx).await,
        CallbackAction::MyAccounts => start::show_my_accounts(&bot, &dialogue, &state, ctx).await,
        CallbackAction::AddTradingAccount => {
            start::open_account_form(&bot, &dialogue, &state, ctx).await
        }
        CallbackAction::EditMyData => start::open_edit_form(&bot, &dialogue, &state, ctx).await,
        CallbackAction::Service(service) => {
            start::show_service(&bot, &dialogue, &state, ctx, service).await
        }
        CallbackAction::ConfirmNotification(_) => {
            // The owner acknowledged a status notice; just clear it.
            if let Err(error) = bot.delete_message(ctx.chat_id, ctx.message_id).await {
                tracing::warn!(%error, "failed to delete acknowledged notice");
            }
            Ok(())
        }
        CallbackAction::AdminMain => admin::show_panel(&bot, &state, ctx).await,
        CallbackAction::AdminBroadcastMenu => admin::show_broadcast_menu(&bot, &state, ctx).await,
        CallbackAction::AdminAccountsMenu => admin::show_accounts_menu(&bot, &state, ctx).await,
        CallbackAction::AdminSettings => admin::show_settings(&bot, &state, ctx).await,
        CallbackAction::AdminStats => admin::show_stats(&bot, &state, ctx).await,
        CallbackAction::AdminChangeLanguage => admin::show_change_language(&bot, &state, ctx).await,
        CallbackAction::AdminSetLang(lang) => admin::set_language(&bot, &state, ctx, lang).await,
        CallbackAction::AdminAccounts(status) => {
            admin::show_accounts_list(&bot, &state, ctx, status).await
        }
        CallbackAction::AdminBroadcast(audience) => {
            broadcast::prompt_for_text(&bot, &dialogue, &state, ctx, audience).await
        }
        CallbackAction::AdminConfirmBroadcast => {
            broadcast::execute(&bot, &dialogue, &state, ctx).await
        }
        CallbackAction::AdminCancelBroadcast => {
            broadcast::cancel(&bot, &dialogue, &state, ctx).await
        }
        CallbackAction::AdminUpdatePerformances => {
            admin::update_performances(&bot, &state, ctx).await
        }
        CallbackAction::AdminResetSequences => admin::reset_sequences(&bot, &state, ctx).await,
        CallbackAction::AdminExit => admin::exit_panel(&bot, &dialogue, &state, ctx).await,
        CallbackAction::ActivateAccount(account_id) => {
            moderation::activate(&bot, &state, ctx, account_id).await
        }
        CallbackAction::RejectAccount(account_id) => {
            moderation::start_rejection(&bot, &dialogue, &state, ctx, account_id).await
        }
    }
}

/// Language for a handler given the live dialogue, falling back to the
/// stored preference.
pub async fn resolve_lang(
    dialogue: &MyDialogue,
    state: &AppState,
    user_id: i64,
) -> shared::Lang {
    match dialogue.get().await {
        Ok(Some(BotState::Browsing(lang))) => lang,
        _ => state.display_lang(user_id).await,
    }
}
