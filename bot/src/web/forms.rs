//! HTML pages opened inside the Telegram web app.

use std::sync::Arc;

use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use shared::Lang;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
    pub edit: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PageQuery {
    fn lang(&self) -> Lang {
        Lang::from_code(self.lang.as_deref().unwrap_or(""))
    }
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    lang: &'static str,
    rtl: bool,
    edit: bool,
    name: String,
    email: String,
    phone: String,
}

#[derive(Template)]
#[template(path = "existing_account.html")]
struct AccountTemplate {
    lang: &'static str,
    rtl: bool,
    agents: Vec<String>,
}

#[derive(Template)]
#[template(path = "edit_accounts.html")]
struct EditAccountsTemplate {
    lang: &'static str,
    rtl: bool,
    agents: Vec<String>,
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(error) => {
            tracing::error!(%error, "template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Registration form; also serves the prefilled "edit my data" variant.
pub async fn register_page(Query(query): Query<PageQuery>) -> Response {
    let lang = query.lang();
    render(RegisterTemplate {
        lang: lang.as_str(),
        rtl: lang.is_arabic(),
        edit: query.edit.as_deref() == Some("1"),
        name: query.name.clone().unwrap_or_default(),
        email: query.email.clone().unwrap_or_default(),
        phone: query.phone.clone().unwrap_or_default(),
    })
}

/// New trading account form.
pub async fn account_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let lang = query.lang();
    render(AccountTemplate {
        lang: lang.as_str(),
        rtl: lang.is_arabic(),
        agents: state.config.agents_list.clone(),
    })
}

/// Edit/delete screen for the accounts the user already owns; the page
/// loads them over `/api/trading_accounts`.
pub async fn edit_accounts_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let lang = query.lang();
    render(EditAccountsTemplate {
        lang: lang.as_str(),
        rtl: lang.is_arabic(),
        agents: state.config.agents_list.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_page_locks_accounts_still_under_review() {
        let page = EditAccountsTemplate {
            lang: "en",
            rtl: false,
            agents: vec!["Agent A".to_string()],
        }
        .render()
        .unwrap();
        assert!(page.contains("account.status === 'under_review'"));
        assert!(page.contains("input.disabled = locked"));
        assert!(page.contains("Account under review - cannot edit"));
        assert!(page.contains("Account under review - cannot delete"));
    }

    #[test]
    fn register_page_prefills_edit_variant() {
        let page = RegisterTemplate {
            lang: "en",
            rtl: false,
            edit: true,
            name: "Ali".to_string(),
            email: "ali@example.com".to_string(),
            phone: "+100200300".to_string(),
        }
        .render()
        .unwrap();
        assert!(page.contains("ali@example.com"));
    }
}
