//! JSON endpoints behind the web-app forms, plus the keyed performance
//! refresh hook.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use rust_i18n::t;

use shared::entity::trading_accounts::{self, AccountStatus};
use shared::{AccountPatch, Lang, NewAccount};

use crate::render::{menus, no_preview};
use crate::repositories::UpsertOutcome;
use crate::services::account_service::AccountError;
use crate::services::notifier;
use crate::services::subscriber_service::RegisterError;
use crate::state::AppState;
use crate::trackers::{FormRef, OriginTag};

/// Telegram identity forwarded by the web-app pages.
#[derive(Debug, Deserialize)]
pub struct TgUser {
    pub id: i64,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

/// Page language beats the Telegram client language; both may be
/// absent when the form is opened outside Telegram.
fn page_lang(explicit: Option<&str>, tg_user: Option<&TgUser>) -> Lang {
    let code = explicit
        .or_else(|| tg_user.and_then(|user| user.language_code.as_deref()))
        .unwrap_or_default();
    Lang::from_code(code)
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub lang: Option<String>,
    pub tg_user: Option<TgUser>,
}

#[derive(Debug, Deserialize)]
pub struct AccountPayload {
    pub broker_name: String,
    pub account_number: String,
    pub password: String,
    pub server: String,
    pub initial_balance: String,
    pub current_balance: String,
    pub withdrawals: String,
    pub copy_start_date: String,
    pub agent: String,
    pub expected_return: String,
    pub lang: Option<String>,
    pub tg_user: TgUser,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountPayload {
    pub id: i32,
    pub tg_user: TgUser,
    pub lang: Option<String>,
    pub broker_name: Option<String>,
    pub account_number: Option<String>,
    pub password: Option<String>,
    pub server: Option<String>,
    pub initial_balance: Option<String>,
    pub current_balance: Option<String>,
    pub withdrawals: Option<String>,
    pub copy_start_date: Option<String>,
    pub agent: Option<String>,
    pub expected_return: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountPayload {
    pub id: i32,
    pub tg_user: TgUser,
    pub lang: Option<String>,
}

/// What the edit-accounts page sees. The stored password never leaves
/// the server.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: i32,
    pub broker_name: String,
    pub account_number: String,
    pub server: String,
    pub initial_balance: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub withdrawals: Option<Decimal>,
    pub copy_start_date: Option<NaiveDate>,
    pub agent: Option<String>,
    pub expected_return: Option<String>,
    pub status: AccountStatus,
    pub rejection_reason: Option<String>,
}

impl From<trading_accounts::Model> for AccountView {
    fn from(account: trading_accounts::Model) -> Self {
        AccountView {
            id: account.id,
            broker_name: account.broker_name,
            account_number: account.account_number,
            server: account.server,
            initial_balance: account.initial_balance,
            current_balance: account.current_balance,
            withdrawals: account.withdrawals,
            copy_start_date: account.copy_start_date,
            agent: account.agent,
            expected_return: account.expected_return,
            status: account.status,
            rejection_reason: account.rejection_reason,
        }
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    tracing::error!(%error, "request failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn account_error(error: AccountError) -> Response {
    match error {
        AccountError::SubscriberNotFound => api_error(StatusCode::NOT_FOUND, "User not found"),
        AccountError::AccountNotFound => api_error(StatusCode::NOT_FOUND, "Account not found"),
        AccountError::NotOwned => {
            api_error(StatusCode::FORBIDDEN, "Account does not belong to this user")
        }
        AccountError::UnderReviewLocked => api_error(
            StatusCode::BAD_REQUEST,
            "Account is under review and cannot be deleted",
        ),
        AccountError::Db(error) => internal_error(error),
    }
}

/// After a registration lands, replace the remembered screen: an open
/// accounts screen is refreshed in place, the first-contact form turns
/// into the main sections, everything else lands on the brokers list.
async fn refresh_after_registration(state: &AppState, telegram_id: i64, lang: Lang) {
    let Some(form) = state.forms.get(telegram_id).await else {
        return;
    };
    if form.origin == OriginTag::MyAccounts {
        notifier::refresh_my_accounts_if_open(state, telegram_id, lang).await;
        return;
    }

    let (screen, origin) = if form.origin == OriginTag::InitialRegistration {
        (menus::main_sections(lang), OriginTag::MainSections)
    } else {
        (menus::brokers(lang, true), OriginTag::Brokers)
    };
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
            match state
                .bot
                .send_message(ChatId(telegram_id), screen.text)
                .parse_mode(ParseMode::Html)
                .link_preview_options(no_preview())
                .reply_markup(screen.markup)
                .await
            {
                Ok(sent) => (sent.chat.id, sent.id),
                Err(error) => {
                    tracing::error!(telegram_id, %error, "failed to show post-registration screen");
                    return;
                }
            }
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
                origin,
            },
        )
        .await;
}

/// POST /webapp/submit
pub async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Response {
    let lang = page_lang(payload.lang.as_deref(), payload.tg_user.as_ref());
    let result = state
        .subscribers
        .register(
            &payload.name,
            &payload.email,
            &payload.phone,
            lang,
            payload.tg_user.as_ref().map(|user| user.id),
            payload
                .tg_user
                .as_ref()
                .and_then(|user| user.username.as_deref()),
        )
        .await;
    let (outcome, _) = match result {
        Ok(ok) => ok,
        Err(RegisterError::Invalid(error)) => {
            return api_error(StatusCode::BAD_REQUEST, error.to_string())
        }
        Err(RegisterError::Db(error)) => return internal_error(error),
    };

    if let Some(user) = payload.tg_user.as_ref() {
        refresh_after_registration(&state, user.id, lang).await;
    }

    let message = match outcome {
        UpsertOutcome::Created => "Registered successfully.",
        UpsertOutcome::Updated => "Updated successfully.",
    };
    Json(json!({ "success": true, "message": message })).into_response()
}

/// POST /webapp/existing-account/submit
pub async fn submit_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AccountPayload>,
) -> Response {
    let lang = page_lang(payload.lang.as_deref(), Some(&payload.tg_user));
    let new_account = match NewAccount::parse(
        &payload.broker_name,
        &payload.account_number,
        &payload.password,
        &payload.server,
        &payload.initial_balance,
        &payload.current_balance,
        &payload.withdrawals,
        &payload.copy_start_date,
        &payload.agent,
        &payload.expected_return,
    ) {
        Ok(account) => account,
        Err(error) => return api_error(StatusCode::BAD_REQUEST, error.to_string()),
    };

    let event = match state
        .accounts
        .create_for_telegram(payload.tg_user.id, new_account)
        .await
    {
        Ok(event) => event,
        Err(error) => return account_error(error),
    };

    if let Err(error) = notifier::notify_admins(&state, &event).await {
        tracing::error!(%error, "admin notification failed");
    }

    if let Err(error) = state
        .bot
        .send_message(
            ChatId(payload.tg_user.id),
            t!("user.account_saved", locale = lang.as_str()).into_owned(),
        )
        .await
    {
        tracing::warn!(%error, "failed to confirm saved account in chat");
    }
    notifier::refresh_my_accounts_if_open(&state, payload.tg_user.id, lang).await;

    Json(json!({ "success": true, "message": "Saved successfully." })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct AccountsQuery {
    pub tg_id: i64,
}

/// GET /api/trading_accounts?tg_id=…
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AccountsQuery>,
) -> Response {
    match state.accounts.list_for_telegram(query.tg_id).await {
        Ok(Some((_, accounts))) => {
            let views: Vec<AccountView> = accounts.into_iter().map(AccountView::from).collect();
            Json(views).into_response()
        }
        Ok(None) => api_error(StatusCode::NOT_FOUND, "User not found"),
        Err(error) => account_error(error),
    }
}

/// POST /api/update_trading_account
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateAccountPayload>,
) -> Response {
    let lang = page_lang(payload.lang.as_deref(), Some(&payload.tg_user));
    let patch = match AccountPatch::parse(
        payload.broker_name.as_deref(),
        payload.account_number.as_deref(),
        payload.password.as_deref(),
        payload.server.as_deref(),
        payload.initial_balance.as_deref(),
        payload.current_balance.as_deref(),
        payload.withdrawals.as_deref(),
        payload.copy_start_date.as_deref(),
        payload.agent.as_deref(),
        payload.expected_return.as_deref(),
    ) {
        Ok(patch) => patch,
        Err(error) => return api_error(StatusCode::BAD_REQUEST, error.to_string()),
    };

    let event = match state
        .accounts
        .update_owned(payload.tg_user.id, payload.id, patch)
        .await
    {
        Ok(event) => event,
        Err(error) => return account_error(error),
    };

    if let Err(error) = notifier::notify_admins(&state, &event).await {
        tracing::error!(%error, "admin notification failed");
    }
    notifier::refresh_my_accounts_if_open(&state, payload.tg_user.id, lang).await;

    Json(json!({ "success": true })).into_response()
}

/// POST /api/delete_trading_account
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeleteAccountPayload>,
) -> Response {
    let lang = page_lang(payload.lang.as_deref(), Some(&payload.tg_user));
    if let Err(error) = state
        .accounts
        .delete_owned(payload.tg_user.id, payload.id)
        .await
    {
        return account_error(error);
    }
    notifier::refresh_my_accounts_if_open(&state, payload.tg_user.id, lang).await;
    Json(json!({ "success": true })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub key: Option<String>,
}

/// GET /update-performances?key=… — shared-secret hook for cron.
pub async fn refresh_performances(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RefreshQuery>,
) -> Response {
    if query.key.as_deref() != Some(state.config.performance_refresh_key.as_str()) {
        return api_error(StatusCode::FORBIDDEN, "Invalid key");
    }
    let today = chrono::Utc::now().date_naive();
    match state.performances.refresh_all(today).await {
        Ok(updated) => {
            tracing::info!(updated, "performance snapshots refreshed");
            Json(json!({ "success": true, "updated": updated })).into_response()
        }
        Err(error) => internal_error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_tolerates_missing_telegram_identity() {
        let payload: RegisterPayload = serde_json::from_str(
            r#"{"name":"Ali","email":"ali@example.com","phone":"+100200300","lang":"en"}"#,
        )
        .unwrap();
        assert!(payload.tg_user.is_none());
        assert_eq!(
            page_lang(payload.lang.as_deref(), payload.tg_user.as_ref()),
            Lang::En
        );
    }

    #[test]
    fn page_lang_falls_back_to_client_language() {
        let user = TgUser {
            id: 7,
            username: None,
            language_code: Some("en".to_string()),
        };
        assert_eq!(page_lang(None, Some(&user)), Lang::En);
        assert_eq!(page_lang(Some("ar"), Some(&user)), Lang::Ar);
        assert_eq!(page_lang(None, None), Lang::Ar);
    }
}
