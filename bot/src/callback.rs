//! Typed callback data carried on inline keyboard buttons.
//!
//! Every button the bot sends encodes a [`CallbackAction`]; incoming
//! callback queries are parsed back into the enum before dispatch, so
//! unknown or malformed payloads are rejected in one place.

use std::fmt;
use std::str::FromStr;

use shared::entity::trading_accounts::AccountStatus;
use shared::Lang;

use crate::services::broadcast::Audience;

/// A non-admin section of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Forex,
    Dev,
}

impl Section {
    pub fn tag(self) -> &'static str {
        match self {
            Section::Forex => "forex",
            Section::Dev => "dev",
        }
    }
}

/// One of the development-services sub-entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Indicators,
    Experts,
    Bots,
    Web,
}

impl Service {
    pub fn tag(self) -> &'static str {
        match self {
            Service::Indicators => "indicators",
            Service::Experts => "experts",
            Service::Bots => "bots",
            Service::Web => "web",
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Service::Indicators, Lang::Ar) => "📊 برمجة المؤشرات",
            (Service::Indicators, Lang::En) => "📊 Indicator Development",
            (Service::Experts, Lang::Ar) => "🤖 برمجة الإكسبرتات",
            (Service::Experts, Lang::En) => "🤖 Expert Advisor Development",
            (Service::Bots, Lang::Ar) => "💬 برمجة بوتات التليجرام",
            (Service::Bots, Lang::En) => "💬 Telegram Bot Development",
            (Service::Web, Lang::Ar) => "🌐 برمجة المواقع",
            (Service::Web, Lang::En) => "🌐 Web Development",
        }
    }
}

/// Everything a button press can ask the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Lang(Lang),
    BackLanguage,
    BackMain,
    Section(Section),
    CopyTrading,
    MyAccounts,
    AddTradingAccount,
    EditMyData,
    Service(Service),
    ConfirmNotification(i32),
    AdminMain,
    AdminBroadcastMenu,
    AdminAccountsMenu,
    AdminSettings,
    AdminStats,
    AdminChangeLanguage,
    AdminSetLang(Lang),
    AdminAccounts(AccountStatus),
    AdminBroadcast(Audience),
    AdminConfirmBroadcast,
    AdminCancelBroadcast,
    AdminUpdatePerformances,
    AdminResetSequences,
    AdminExit,
    ActivateAccount(i32),
    RejectAccount(i32),
}

impl CallbackAction {
    /// True for actions that must only be honoured for configured admins.
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            CallbackAction::AdminMain
                | CallbackAction::AdminBroadcastMenu
                | CallbackAction::AdminAccountsMenu
                | CallbackAction::AdminSettings
                | CallbackAction::AdminStats
                | CallbackAction::AdminChangeLanguage
                | CallbackAction::AdminSetLang(_)
                | CallbackAction::AdminAccounts(_)
                | CallbackAction::AdminBroadcast(_)
                | CallbackAction::AdminConfirmBroadcast
                | CallbackAction::AdminCancelBroadcast
                | CallbackAction::AdminUpdatePerformances
                | CallbackAction::AdminResetSequences
                | CallbackAction::AdminExit
                | CallbackAction::ActivateAccount(_)
                | CallbackAction::RejectAccount(_)
        )
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::Lang(lang) => write!(f, "lang_{}", lang.as_str()),
            CallbackAction::BackLanguage => write!(f, "back_language"),
            CallbackAction::BackMain => write!(f, "back_main"),
            CallbackAction::Section(s) => write!(f, "section_{}", s.tag()),
            CallbackAction::CopyTrading => write!(f, "copy_trading"),
            CallbackAction::MyAccounts => write!(f, "my_accounts"),
            CallbackAction::AddTradingAccount => write!(f, "add_trading_account"),
            CallbackAction::EditMyData => write!(f, "edit_my_data"),
            CallbackAction::Service(s) => write!(f, "service_{}", s.tag()),
            CallbackAction::ConfirmNotification(id) => write!(f, "confirm_notification_{id}"),
            CallbackAction::AdminMain => write!(f, "admin_main"),
            CallbackAction::AdminBroadcastMenu => write!(f, "admin_broadcast_menu"),
            CallbackAction::AdminAccountsMenu => write!(f, "admin_accounts_menu"),
            CallbackAction::AdminSettings => write!(f, "admin_settings"),
            CallbackAction::AdminStats => write!(f, "admin_stats"),
            CallbackAction::AdminChangeLanguage => write!(f, "admin_change_language"),
            CallbackAction::AdminSetLang(lang) => write!(f, "admin_lang_{}", lang.as_str()),
            CallbackAction::AdminAccounts(status) => {
                write!(f, "admin_accounts_{}", status_tag(*status))
            }
            CallbackAction::AdminBroadcast(a) => write!(f, "admin_broadcast_{}", a.tag()),
            CallbackAction::AdminConfirmBroadcast => write!(f, "admin_confirm_broadcast"),
            CallbackAction::AdminCancelBroadcast => write!(f, "admin_cancel_broadcast"),
            CallbackAction::AdminUpdatePerformances => write!(f, "admin_update_performances"),
            CallbackAction::AdminResetSequences => write!(f, "admin_reset_sequences"),
            CallbackAction::AdminExit => write!(f, "admin_exit"),
            CallbackAction::ActivateAccount(id) => write!(f, "activate_account_{id}"),
            CallbackAction::RejectAccount(id) => write!(f, "reject_account_{id}"),
        }
    }
}

fn status_tag(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::UnderReview => "under_review",
        AccountStatus::Active => "approved",
        AccountStatus::Rejected => "rejected",
    }
}

impl FromStr for CallbackAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "lang_ar" => CallbackAction::Lang(Lang::Ar),
            "lang_en" => CallbackAction::Lang(Lang::En),
            "back_language" => CallbackAction::BackLanguage,
            "back_main" => CallbackAction::BackMain,
            "section_forex" => CallbackAction::Section(Section::Forex),
            "section_dev" => CallbackAction::Section(Section::Dev),
            "copy_trading" => CallbackAction::CopyTrading,
            "my_accounts" => CallbackAction::MyAccounts,
            "add_trading_account" => CallbackAction::AddTradingAccount,
            "edit_my_data" => CallbackAction::EditMyData,
            "service_indicators" => CallbackAction::Service(Service::Indicators),
            "service_experts" => CallbackAction::Service(Service::Experts),
            "service_bots" => CallbackAction::Service(Service::Bots),
            "service_web" => CallbackAction::Service(Service::Web),
            "admin_main" => CallbackAction::AdminMain,
            "admin_broadcast_menu" => CallbackAction::AdminBroadcastMenu,
            "admin_accounts_menu" => CallbackAction::AdminAccountsMenu,
            "admin_settings" => CallbackAction::AdminSettings,
            "admin_stats" => CallbackAction::AdminStats,
            "admin_change_language" => CallbackAction::AdminChangeLanguage,
            "admin_lang_ar" => CallbackAction::AdminSetLang(Lang::Ar),
            "admin_lang_en" => CallbackAction::AdminSetLang(Lang::En),
            "admin_accounts_under_review" => {
                CallbackAction::AdminAccounts(AccountStatus::UnderReview)
            }
            "admin_accounts_approved" => CallbackAction::AdminAccounts(AccountStatus::Active),
            "admin_accounts_rejected" => CallbackAction::AdminAccounts(AccountStatus::Rejected),
            "admin_broadcast_all" => CallbackAction::AdminBroadcast(Audience::All),
            "admin_broadcast_registered" => CallbackAction::AdminBroadcast(Audience::Registered),
            "admin_broadcast_approved" => CallbackAction::AdminBroadcast(Audience::Approved),
            "admin_confirm_broadcast" => CallbackAction::AdminConfirmBroadcast,
            "admin_cancel_broadcast" => CallbackAction::AdminCancelBroadcast,
            "admin_update_performances" => CallbackAction::AdminUpdatePerformances,
            "admin_reset_sequences" => CallbackAction::AdminResetSequences,
            "admin_exit" => CallbackAction::AdminExit,
            other => {
                if let Some(id) = parse_id(other, "confirm_notification_") {
                    CallbackAction::ConfirmNotification(id)
                } else if let Some(id) = parse_id(other, "activate_account_") {
                    CallbackAction::ActivateAccount(id)
                } else if let Some(id) = parse_id(other, "reject_account_") {
                    CallbackAction::RejectAccount(id)
                } else {
                    return Err(());
                }
            }
        };
        Ok(action)
    }
}

fn parse_id(data: &str, prefix: &str) -> Option<i32> {
    data.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_variant() {
        let actions = [
            CallbackAction::Lang(Lang::Ar),
            CallbackAction::Lang(Lang::En),
            CallbackAction::BackLanguage,
            CallbackAction::BackMain,
            CallbackAction::Section(Section::Forex),
            CallbackAction::Section(Section::Dev),
            CallbackAction::CopyTrading,
            CallbackAction::MyAccounts,
            CallbackAction::AddTradingAccount,
            CallbackAction::EditMyData,
            CallbackAction::Service(Service::Indicators),
            CallbackAction::Service(Service::Experts),
            CallbackAction::Service(Service::Bots),
            CallbackAction::Service(Service::Web),
            CallbackAction::ConfirmNotification(42),
            CallbackAction::AdminMain,
            CallbackAction::AdminBroadcastMenu,
            CallbackAction::AdminAccountsMenu,
            CallbackAction::AdminSettings,
            CallbackAction::AdminStats,
            CallbackAction::AdminChangeLanguage,
            CallbackAction::AdminSetLang(Lang::En),
            CallbackAction::AdminAccounts(AccountStatus::UnderReview),
            CallbackAction::AdminAccounts(AccountStatus::Active),
            CallbackAction::AdminAccounts(AccountStatus::Rejected),
            CallbackAction::AdminBroadcast(Audience::All),
            CallbackAction::AdminBroadcast(Audience::Registered),
            CallbackAction::AdminBroadcast(Audience::Approved),
            CallbackAction::AdminConfirmBroadcast,
            CallbackAction::AdminCancelBroadcast,
            CallbackAction::AdminUpdatePerformances,
            CallbackAction::AdminResetSequences,
            CallbackAction::AdminExit,
            CallbackAction::ActivateAccount(7),
            CallbackAction::RejectAccount(123),
        ];
        for action in actions {
            let encoded = action.to_string();
            let decoded: CallbackAction = encoded.parse().unwrap();
            assert_eq!(decoded, action, "mismatch for {encoded}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<CallbackAction>().is_err());
        assert!("activate_account_".parse::<CallbackAction>().is_err());
        assert!("activate_account_xyz".parse::<CallbackAction>().is_err());
        assert!("frobnicate".parse::<CallbackAction>().is_err());
    }

    #[test]
    fn admin_actions_are_guarded() {
        assert!(CallbackAction::ActivateAccount(1).requires_admin());
        assert!(CallbackAction::AdminBroadcast(Audience::All).requires_admin());
        assert!(!CallbackAction::MyAccounts.requires_admin());
        assert!(!CallbackAction::ConfirmNotification(1).requires_admin());
    }
}
