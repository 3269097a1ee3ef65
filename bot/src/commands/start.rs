//! /start, language selection and the subscriber-facing menus.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use rust_i18n::t;

use shared::Lang;

use crate::callback::{Section, Service};
use crate::commands::CallbackCtx;
use crate::render::keyboard::{column, web_app};
use crate::render::menus::{self, Screen};
use crate::render::no_preview;
use crate::state::{AppState, BotState, HandlerResult, MyDialogue};
use crate::trackers::{FormRef, OriginTag};

/// Replaces the pressed message with the given screen.
async fn edit_screen(bot: &Bot, ctx: CallbackCtx, screen: Screen) -> HandlerResult {
    bot.edit_message_text(ctx.chat_id, ctx.message_id, screen.text)
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_preview())
        .reply_markup(screen.markup)
        .await?;
    Ok(())
}

/// Remembers the pressed message as the user's live screen so a web-form
/// submission can refresh it in place.
async fn remember_screen(state: &AppState, ctx: CallbackCtx, lang: Lang, origin: OriginTag) {
    state
        .forms
        .remember(
            ctx.user_id,
            FormRef {
                chat_id: ctx.chat_id,
                message_id: ctx.message_id,
                lang,
                origin,
            },
        )
        .await;
}

/// /start always re-opens the language picker.
pub async fn handle_start(bot: Bot, dialogue: MyDialogue, msg: Message) -> HandlerResult {
    dialogue.update(BotState::Idle).await?;
    let screen = menus::language();
    bot.send_message(msg.chat.id, screen.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(screen.markup)
        .await?;
    Ok(())
}

pub async fn show_language_picker(bot: &Bot, ctx: CallbackCtx) -> HandlerResult {
    edit_screen(bot, ctx, menus::language()).await
}

/// A language was picked: registered users land on the main sections,
/// everyone else gets the registration form first.
pub async fn set_language(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
    lang: Lang,
) -> HandlerResult {
    dialogue.update(BotState::Browsing(lang)).await?;
    if state.config.is_admin(ctx.user_id) {
        state.admin_prefs.set_lang(ctx.user_id, lang).await;
    }

    let registered = state
        .subscribers
        .find_by_telegram_id(ctx.user_id)
        .await?
        .is_some();
    if registered {
        remember_screen(state, ctx, lang, OriginTag::MainSections).await;
        edit_screen(bot, ctx, menus::main_sections(lang)).await
    } else {
        remember_screen(state, ctx, lang, OriginTag::InitialRegistration).await;
        edit_screen(
            bot,
            ctx,
            menus::registration(lang, state.config.webapp_url.as_deref()),
        )
        .await
    }
}

pub async fn show_main_sections(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    remember_screen(state, ctx, lang, OriginTag::MainSections).await;
    edit_screen(bot, ctx, menus::main_sections(lang)).await
}

pub async fn show_section(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
    section: Section,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    remember_screen(state, ctx, lang, OriginTag::MainSections).await;
    let screen = match section {
        Section::Forex => menus::forex(lang),
        Section::Dev => menus::dev(lang),
    };
    edit_screen(bot, ctx, screen).await
}

pub async fn show_service(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
    service: Service,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    edit_screen(bot, ctx, menus::service(lang, service)).await
}

/// "Copy Trading": brokers for registered users, registration form for
/// everyone else (the brokers screen follows once the form is in).
pub async fn show_brokers(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    let registered = state
        .subscribers
        .find_by_telegram_id(ctx.user_id)
        .await?
        .is_some();
    if registered {
        remember_screen(state, ctx, lang, OriginTag::Brokers).await;
        edit_screen(bot, ctx, menus::brokers(lang, false)).await
    } else {
        remember_screen(state, ctx, lang, OriginTag::Brokers).await;
        edit_screen(
            bot,
            ctx,
            menus::registration(lang, state.config.webapp_url.as_deref()),
        )
        .await
    }
}

pub async fn show_my_accounts(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    let Some((subscriber, accounts)) = state.accounts.list_for_telegram(ctx.user_id).await? else {
        bot.send_message(ctx.chat_id, menus::not_registered_alert(lang))
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    };
    let today = chrono::Utc::now().date_naive();
    remember_screen(state, ctx, lang, OriginTag::MyAccounts).await;
    edit_screen(
        bot,
        ctx,
        menus::my_accounts(
            lang,
            &subscriber,
            &accounts,
            today,
            state.config.webapp_url.as_deref(),
        ),
    )
    .await
}

/// Sends a standalone message carrying a single web-app button, after a
/// short "opening…" flash on the pressed message.
async fn send_form_button(
    bot: &Bot,
    state: &AppState,
    ctx: CallbackCtx,
    lang: Lang,
    path: &str,
    flash_key: &str,
    prompt_key: &str,
    button_key: &str,
) -> HandlerResult {
    let locale = lang.as_str();
    let Some(base) = state.config.webapp_url.as_deref() else {
        bot.send_message(ctx.chat_id, t!("common.cannot_open_form", locale = locale))
            .await?;
        return Ok(());
    };
    bot.edit_message_text(
        ctx.chat_id,
        ctx.message_id,
        t!(flash_key, locale = locale).into_owned(),
    )
    .await?;

    let url = format!("{}{}?lang={}", base.trim_end_matches('/'), path, locale);
    bot.send_message(ctx.chat_id, t!(prompt_key, locale = locale).into_owned())
        .reply_markup(column(vec![web_app(
            t!(button_key, locale = locale).into_owned(),
            &url,
        )]))
        .await?;
    Ok(())
}

pub async fn open_account_form(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    if state.subscribers.find_by_telegram_id(ctx.user_id).await?.is_none() {
        bot.send_message(ctx.chat_id, t!("common.register_first", locale = lang.as_str()))
            .await?;
        return Ok(());
    }
    send_form_button(
        bot,
        state,
        ctx,
        lang,
        "/existing-account",
        "common.opening_account_form",
        "common.account_form_prompt",
        "common.open_account_form",
    )
    .await
}

pub async fn open_edit_form(
    bot: &Bot,
    dialogue: &MyDialogue,
    state: &AppState,
    ctx: CallbackCtx,
) -> HandlerResult {
    let lang = super::resolve_lang(dialogue, state, ctx.user_id).await;
    if state.subscribers.find_by_telegram_id(ctx.user_id).await?.is_none() {
        bot.send_message(ctx.chat_id, menus::edit_guard_notice(lang))
            .await?;
        return Ok(());
    }
    send_form_button(
        bot,
        state,
        ctx,
        lang,
        "/edit-accounts",
        "common.opening_edit_form",
        "common.edit_form_prompt",
        "common.open_edit_form",
    )
    .await
}

/// Any free text outside a dialogue prompt: admins get the tool list,
/// everyone else a nudge back to the buttons.
pub async fn handle_free_text(
    bot: Bot,
    msg: Message,
    state: std::sync::Arc<AppState>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let lang = state.display_lang(user_id).await;
    let locale = lang.as_str();
    if state.config.is_admin(user_id) {
        bot.send_message(msg.chat.id, t!("admin.help", locale = locale))
            .parse_mode(ParseMode::Html)
            .await?;
    } else {
        bot.send_message(msg.chat.id, t!("common.use_buttons", locale = locale))
            .await?;
    }
    Ok(())
}
