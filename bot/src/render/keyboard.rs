//! Inline keyboard layout helpers.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};

use crate::callback::CallbackAction;

pub fn cb(label: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.into(), action.to_string())
}

/// URL button; degrades to an inert callback button if the URL is invalid.
pub fn link(label: impl Into<String>, url: &str) -> InlineKeyboardButton {
    match url.parse() {
        Ok(parsed) => InlineKeyboardButton::url(label.into(), parsed),
        Err(_) => InlineKeyboardButton::callback(label.into(), "invalid_url".to_string()),
    }
}

/// Telegram web-app button; same degradation as [`link`].
pub fn web_app(label: impl Into<String>, url: &str) -> InlineKeyboardButton {
    match url.parse() {
        Ok(parsed) => InlineKeyboardButton::web_app(label.into(), WebAppInfo { url: parsed }),
        Err(_) => InlineKeyboardButton::callback(label.into(), "invalid_url".to_string()),
    }
}

/// Lays the given buttons out two per row, then appends each trailing
/// button on a full-width row of its own.
pub fn grid(
    buttons: Vec<InlineKeyboardButton>,
    trailing: Vec<InlineKeyboardButton>,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(2).map(|pair| pair.to_vec()).collect();
    for button in trailing {
        rows.push(vec![button]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// One button per row.
pub fn column(buttons: Vec<InlineKeyboardButton>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(buttons.into_iter().map(|b| vec![b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pairs_buttons_and_keeps_trailing_full_width() {
        let markup = grid(
            vec![
                cb("a", CallbackAction::MyAccounts),
                cb("b", CallbackAction::CopyTrading),
                cb("c", CallbackAction::EditMyData),
            ],
            vec![cb("back", CallbackAction::BackMain)],
        );
        let rows = &markup.inline_keyboard;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 1);
    }
}
