//! Screen builders: header + body text + inline keyboard for every menu
//! the bot can show. Handlers only decide *which* screen to send.

use chrono::NaiveDate;
use rust_i18n::t;
use teloxide::types::InlineKeyboardMarkup;
use url::Url;

use shared::entity::trading_accounts::{self, AccountStatus};
use shared::entity::subscribers;
use shared::performance;
use shared::Lang;

use crate::callback::{CallbackAction, Section, Service};
use crate::render::header::{build_header, build_header_framed};
use crate::render::keyboard::{cb, column, grid, link, web_app};
use crate::services::broadcast::Audience;

pub const SUPPORT_URL: &str = "https://t.me/Nagyfx";
pub const ONEROYAL_URL: &str = "https://vc.cabinet.oneroyal.com/ar/links/go/10118";
pub const SCOPE_URL: &str = "https://my.tickmill.com?utm_campaign=ib_link&utm_content=IB60363655&utm_medium=Open+Account&utm_source=link&lp=https%3A%2F%2Fmy.tickmill.com%2Far%2Fsign-up%2F";

/// A fully rendered bot screen.
pub struct Screen {
    pub text: String,
    pub markup: InlineKeyboardMarkup,
}

fn back_label(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => "🔙 رجوع",
        Lang::En => "🔙 Back",
    }
}

fn back_to_forex(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => "🔙 الرجوع لتداول الفوركس",
        Lang::En => "🔙 Back to Forex",
    }
}

fn my_accounts_label(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => "👤 بياناتي وحساباتي",
        Lang::En => "👤 My Data & Accounts",
    }
}

/// `{base}{path}?lang={lang}` for the plain web-app entry points.
fn form_url(base: &str, path: &str, lang: Lang) -> String {
    format!("{}{}?lang={}", base.trim_end_matches('/'), path, lang.as_str())
}

/// Registration form URL prefilled with the subscriber's current data.
fn edit_data_url(base: &str, lang: Lang, sub: &subscribers::Model) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("lang", lang.as_str())
                .append_pair("edit", "1")
                .append_pair("name", &sub.name)
                .append_pair("email", &sub.email)
                .append_pair("phone", &sub.phone);
            url.to_string()
        }
        Err(_) => base.to_string(),
    }
}

pub fn language() -> Screen {
    Screen {
        text: build_header("Language | اللغة", Lang::En),
        markup: InlineKeyboardMarkup::new(vec![vec![
            cb("🇺🇸 English", CallbackAction::Lang(Lang::En)),
            cb("🇪🇬 العربية", CallbackAction::Lang(Lang::Ar)),
        ]]),
    }
}

pub fn main_sections(lang: Lang) -> Screen {
    let (title, forex, dev, back) = match lang {
        Lang::Ar => (
            "الأقسام الرئيسية",
            "💹 تداول الفوركس",
            "💻 خدمات البرمجة",
            "🔙 الرجوع للغة",
        ),
        Lang::En => (
            "Main Sections",
            "💹 Forex Trading",
            "💻 Programming Services",
            "🔙 Back to language",
        ),
    };
    Screen {
        text: build_header(title, lang),
        markup: column(vec![
            cb(forex, CallbackAction::Section(Section::Forex)),
            cb(dev, CallbackAction::Section(Section::Dev)),
            cb(back, CallbackAction::BackLanguage),
        ]),
    }
}

/// First-contact registration prompt with the web-app form button.
pub fn registration(lang: Lang, webapp_url: Option<&str>) -> Screen {
    let (title, open_label, back) = match lang {
        Lang::Ar => (
            "من فضلك ادخل البيانات",
            "📝 افتح نموذج التسجيل",
            "🔙 الرجوع للغة",
        ),
        Lang::En => (
            "Please enter your data",
            "📝 Open registration form",
            "🔙 Back to language",
        ),
    };
    let mut buttons = Vec::new();
    if let Some(base) = webapp_url {
        buttons.push(web_app(open_label, &form_url(base, "", lang)));
    }
    buttons.push(cb(back, CallbackAction::BackLanguage));
    Screen {
        text: build_header(title, lang),
        markup: column(buttons),
    }
}

pub fn forex(lang: Lang) -> Screen {
    let (title, copy, agent_test) = match lang {
        Lang::Ar => (
            "تداول الفوركس",
            "📊 نسخ الصفقات",
            "🤖 طلب اختبار أنظمة YesFX (الوكلاء فقط)",
        ),
        Lang::En => (
            "Forex Trading",
            "📊 Copy Trading",
            "🤖 Request to Test YesFX Systems (Agents Only)",
        ),
    };
    let back = match lang {
        Lang::Ar => "🔙 الرجوع للقائمة الرئيسية",
        Lang::En => "🔙 Back to main menu",
    };
    Screen {
        text: build_header(title, lang),
        markup: column(vec![
            cb(copy, CallbackAction::CopyTrading),
            link(agent_test, SUPPORT_URL),
            cb(back, CallbackAction::BackMain),
        ]),
    }
}

pub fn dev(lang: Lang) -> Screen {
    let title = match lang {
        Lang::Ar => "خدمات البرمجة",
        Lang::En => "Programming Services",
    };
    let back = match lang {
        Lang::Ar => "🔙 الرجوع للقائمة الرئيسية",
        Lang::En => "🔙 Back to main menu",
    };
    let services = [
        Service::Indicators,
        Service::Experts,
        Service::Bots,
        Service::Web,
    ];
    Screen {
        text: build_header(title, lang),
        markup: column(
            services
                .iter()
                .map(|s| cb(s.label(lang), CallbackAction::Service(*s)))
                .chain(std::iter::once(cb(back, CallbackAction::BackMain)))
                .collect(),
        ),
    }
}

pub fn service(lang: Lang, service: Service) -> Screen {
    let title = match (service, lang) {
        (Service::Indicators, Lang::Ar) => "برمجة المؤشرات",
        (Service::Indicators, Lang::En) => "Indicators Programming",
        (Service::Experts, Lang::Ar) => "برمجة الاكسبيرتات",
        (Service::Experts, Lang::En) => "Expert Advisors Programming",
        (Service::Bots, Lang::Ar) => "بوتات التليجرام",
        (Service::Bots, Lang::En) => "Telegram Bots",
        (Service::Web, Lang::Ar) => "مواقع الويب",
        (Service::Web, Lang::En) => "Web Development",
    };
    let support = match lang {
        Lang::Ar => "💬 التواصل مع الدعم",
        Lang::En => "💬 Contact Support",
    };
    let body = t!("user.service_description", locale = lang.as_str(), service = title);
    Screen {
        text: format!("{}\n\n{}", build_header(title, lang), body),
        markup: column(vec![
            link(support, SUPPORT_URL),
            cb(back_label(lang), CallbackAction::Section(Section::Dev)),
        ]),
    }
}

/// Broker links screen. `just_registered` prepends the success flash
/// shown after a web-form registration lands here.
pub fn brokers(lang: Lang, just_registered: bool) -> Screen {
    let title = match lang {
        Lang::Ar => "اختر وسيطك الآن",
        Lang::En => "Choose your broker now",
    };
    let flash = if just_registered {
        t!("user.brokers_registered", locale = lang.as_str()).into_owned()
    } else {
        String::new()
    };
    Screen {
        text: format!("{}\n\n{}", build_header(title, lang), flash),
        markup: grid(
            vec![link("🏦 Oneroyall", ONEROYAL_URL), link("🏦 Scope", SCOPE_URL)],
            vec![
                cb(my_accounts_label(lang), CallbackAction::MyAccounts),
                cb(back_to_forex(lang), CallbackAction::CopyTrading),
            ],
        ),
    }
}

/// Short guard for the edit-data button; the accounts screen uses the
/// framed alert below.
pub fn edit_guard_notice(lang: Lang) -> String {
    t!("common.not_registered", locale = lang.as_str()).into_owned()
}

pub fn not_registered_alert(lang: Lang) -> String {
    let title = format!("⚠️ {}", t!("common.alert", locale = lang.as_str()));
    format!(
        "{}\n\n{}",
        build_header(&title, lang),
        t!("common.register_first", locale = lang.as_str())
    )
}

fn status_text(status: AccountStatus, lang: Lang, reason: Option<&str>) -> String {
    let locale = lang.as_str();
    match (status, reason) {
        (AccountStatus::UnderReview, _) => t!("accounts.status_under_review", locale = locale).into_owned(),
        (AccountStatus::Active, _) => t!("accounts.status_active", locale = locale).into_owned(),
        (AccountStatus::Rejected, Some(reason)) => {
            t!("accounts.status_rejected_reason", locale = locale, reason = reason).into_owned()
        }
        (AccountStatus::Rejected, None) => t!("accounts.status_rejected", locale = locale).into_owned(),
    }
}

fn account_block(
    lang: Lang,
    index: usize,
    account: &trading_accounts::Model,
    today: NaiveDate,
) -> String {
    let locale = lang.as_str();
    let status = status_text(account.status, lang, account.rejection_reason.as_deref());

    // Arabic lines open with an RLM so mixed digits keep RTL ordering.
    let mut block = match lang {
        Lang::Ar => format!(
            "\n\u{200F}{index}. <b>{}</b> - {}\n   \u{200F}🖥️ {}\n",
            account.broker_name, account.account_number, account.server
        ),
        Lang::En => format!(
            "\n{index}. <b>{}</b> - {}\n   🖥️ {}\n",
            account.broker_name, account.account_number, account.server
        ),
    };
    block.push_str(&t!("accounts.field_status", locale = locale, v = status));
    block.push('\n');

    if let Some(v) = account.initial_balance {
        block.push_str(&t!("accounts.field_initial_balance", locale = locale, v = v));
        block.push('\n');
    }
    if let Some(v) = account.current_balance {
        block.push_str(&t!("accounts.field_current_balance", locale = locale, v = v));
        block.push('\n');
    }
    if let Some(v) = account.withdrawals {
        block.push_str(&t!("accounts.field_withdrawals", locale = locale, v = v));
        block.push('\n');
    }
    if let Some(v) = account.copy_start_date {
        block.push_str(&t!("accounts.field_start_date", locale = locale, v = v));
        block.push('\n');
    }
    if let Some(v) = account.agent.as_deref() {
        block.push_str(&t!("accounts.field_agent", locale = locale, v = v));
        block.push('\n');
    }
    if let Some(v) = account.expected_return.as_deref() {
        block.push_str(&t!("accounts.field_expected_return", locale = locale, v = v));
        block.push('\n');
    }

    if account.has_complete_financials() {
        let achieved = performance::achieved_return(
            account.initial_balance,
            account.current_balance,
            account.withdrawals,
        );
        match (achieved, account.copy_start_date) {
            (Some(ret), Some(start)) => {
                let period = performance::copy_duration(start, today, lang);
                block.push_str(&t!(
                    "accounts.field_achieved_return",
                    locale = locale,
                    value = performance::format_achieved_return(ret),
                    period = period
                ));
            }
            _ => {
                block.push_str(&t!(
                    "accounts.field_achieved_pending",
                    locale = locale,
                    v = performance::calculating_placeholder(lang)
                ));
            }
        }
    } else {
        block.push_str(&t!(
            "accounts.field_achieved_pending",
            locale = locale,
            v = performance::incomplete_placeholder(lang)
        ));
    }
    block.push('\n');
    block
}

/// "My Data & Accounts": subscriber contact card plus one block per
/// trading account with live achieved-return figures.
pub fn my_accounts(
    lang: Lang,
    subscriber: &subscribers::Model,
    accounts: &[trading_accounts::Model],
    today: NaiveDate,
    webapp_url: Option<&str>,
) -> Screen {
    let locale = lang.as_str();
    let (add_label, edit_accounts_label, edit_data_label) = match lang {
        Lang::Ar => ("➕ إضافة حساب تداول", "✏️ تعديل حساباتي", "✏️ تعديل بياناتي"),
        Lang::En => ("➕ Add Trading Account", "✏️ Edit My Accounts", "✏️ Edit my data"),
    };

    let mut text = format!(
        "{}\n\n{}\n{}\n{}\n\n{}\n",
        build_header(my_accounts_label(lang), lang),
        t!("accounts.name", locale = locale, v = subscriber.name),
        t!("accounts.email", locale = locale, v = subscriber.email),
        t!("accounts.phone", locale = locale, v = subscriber.phone),
        t!("accounts.list_header", locale = locale),
    );
    if accounts.is_empty() {
        text.push('\n');
        text.push_str(&t!("accounts.none_yet", locale = locale));
    } else {
        for (i, account) in accounts.iter().enumerate() {
            text.push_str(&account_block(lang, i + 1, account, today));
        }
    }

    let mut buttons = Vec::new();
    if let Some(base) = webapp_url {
        buttons.push(web_app(add_label, &form_url(base, "/existing-account", lang)));
        if !accounts.is_empty() {
            buttons.push(web_app(
                edit_accounts_label,
                &form_url(base, "/edit-accounts", lang),
            ));
        }
        buttons.push(web_app(edit_data_label, &edit_data_url(base, lang, subscriber)));
    }
    buttons.push(cb(back_to_forex(lang), CallbackAction::Section(Section::Forex)));

    Screen {
        text,
        markup: column(buttons),
    }
}

pub fn admin_panel(lang: Lang) -> Screen {
    let (title, broadcast, stats, accounts, settings, exit) = match lang {
        Lang::Ar => (
            "لوحة التحكم الإدارية",
            "📢 البث والرسائل",
            "📊 الإحصائيات والتقارير",
            "🏦 إدارة الحسابات",
            "⚙️ الإعدادات",
            "🚪 خروج",
        ),
        Lang::En => (
            "Admin Control Panel",
            "📢 Broadcasting & Messages",
            "📊 Statistics & Reports",
            "🏦 Accounts Management",
            "⚙️ Settings",
            "🚪 Exit",
        ),
    };
    Screen {
        text: build_header(title, lang),
        markup: grid(
            vec![
                cb(broadcast, CallbackAction::AdminBroadcastMenu),
                cb(stats, CallbackAction::AdminStats),
                cb(accounts, CallbackAction::AdminAccountsMenu),
                cb(settings, CallbackAction::AdminSettings),
            ],
            vec![cb(exit, CallbackAction::AdminExit)],
        ),
    }
}

pub fn admin_broadcast_menu(lang: Lang) -> Screen {
    let title = match lang {
        Lang::Ar => "البث والرسائل",
        Lang::En => "Broadcasting & Messages",
    };
    let audiences = [Audience::All, Audience::Registered, Audience::Approved];
    Screen {
        text: build_header(title, lang),
        markup: grid(
            audiences
                .iter()
                .map(|a| cb(a.button_label(lang), CallbackAction::AdminBroadcast(*a)))
                .collect(),
            vec![cb(back_label(lang), CallbackAction::AdminMain)],
        ),
    }
}

pub fn admin_accounts_menu(lang: Lang) -> Screen {
    let (title, under_review, approved, rejected) = match lang {
        Lang::Ar => (
            "إدارة الحسابات",
            "⏳ الحسابات قيد المراجعة",
            "✅ الحسابات المقبولة",
            "❌ الحسابات المرفوضة",
        ),
        Lang::En => (
            "Accounts Management",
            "⏳ Under Review",
            "✅ Approved",
            "❌ Rejected",
        ),
    };
    Screen {
        text: build_header(title, lang),
        markup: grid(
            vec![
                cb(under_review, CallbackAction::AdminAccounts(AccountStatus::UnderReview)),
                cb(approved, CallbackAction::AdminAccounts(AccountStatus::Active)),
                cb(rejected, CallbackAction::AdminAccounts(AccountStatus::Rejected)),
            ],
            vec![cb(back_label(lang), CallbackAction::AdminMain)],
        ),
    }
}

pub fn admin_settings(lang: Lang) -> Screen {
    let (title, language, performances, sequences) = match lang {
        Lang::Ar => (
            "الإعدادات",
            "🌐 تغيير اللغة",
            "🔄 تحديث الأداء",
            "🔄 إعادة تعيين التسلسل",
        ),
        Lang::En => (
            "Settings",
            "🌐 Change Language",
            "🔄 Update Performances",
            "🔄 Reset Sequences",
        ),
    };
    Screen {
        text: build_header(title, lang),
        markup: column(vec![
            cb(language, CallbackAction::AdminChangeLanguage),
            cb(performances, CallbackAction::AdminUpdatePerformances),
            cb(sequences, CallbackAction::AdminResetSequences),
            cb(back_label(lang), CallbackAction::AdminMain),
        ]),
    }
}

pub fn admin_change_language(lang: Lang) -> Screen {
    let title = match lang {
        Lang::Ar => "تغيير اللغة",
        Lang::En => "Change Language",
    };
    Screen {
        text: build_header(title, lang),
        markup: InlineKeyboardMarkup::new(vec![
            vec![
                cb("🇪🇬 العربية", CallbackAction::AdminSetLang(Lang::Ar)),
                cb("🇺🇸 English", CallbackAction::AdminSetLang(Lang::En)),
            ],
            vec![cb(back_label(lang), CallbackAction::AdminSettings)],
        ]),
    }
}

/// Aggregate counters shown on the statistics screen.
pub struct StatsSummary {
    pub subscribers: u64,
    pub registered: u64,
    pub approved_owners: u64,
    pub under_review: u64,
    pub active: u64,
    pub rejected: u64,
}

pub fn admin_stats(lang: Lang, stats: &StatsSummary) -> Screen {
    let title = match lang {
        Lang::Ar => "الإحصائيات والتقارير",
        Lang::En => "Statistics & Reports",
    };
    let body = t!(
        "admin.stats_body",
        locale = lang.as_str(),
        subscribers = stats.subscribers,
        registered = stats.registered,
        approved = stats.approved_owners,
        under_review = stats.under_review,
        active = stats.active,
        rejected = stats.rejected
    );
    Screen {
        text: format!("{}\n\n{}", build_header(title, lang), body),
        markup: column(vec![cb(back_label(lang), CallbackAction::AdminMain)]),
    }
}

pub fn admin_accounts_list(
    lang: Lang,
    status: AccountStatus,
    rows: &[(trading_accounts::Model, subscribers::Model)],
) -> Screen {
    let locale = lang.as_str();
    let (title, empty_key) = match (status, lang) {
        (AccountStatus::UnderReview, Lang::Ar) => ("الحسابات قيد المراجعة", "admin.no_accounts_under_review"),
        (AccountStatus::UnderReview, Lang::En) => ("Accounts Under Review", "admin.no_accounts_under_review"),
        (AccountStatus::Active, Lang::Ar) => ("الحسابات المقبولة", "admin.no_accounts_approved"),
        (AccountStatus::Active, Lang::En) => ("Approved Accounts", "admin.no_accounts_approved"),
        (AccountStatus::Rejected, Lang::Ar) => ("الحسابات المرفوضة", "admin.no_accounts_rejected"),
        (AccountStatus::Rejected, Lang::En) => ("Rejected Accounts", "admin.no_accounts_rejected"),
    };

    let mut text = format!("{}\n\n", build_header(title, lang));
    if rows.is_empty() {
        text.push_str(&t!(empty_key, locale = locale));
    } else {
        for (account, subscriber) in rows {
            text.push_str(&format!(
                "🏦 {} - {}\n👤 {} ({})\n\n",
                account.broker_name,
                account.account_number,
                subscriber.name,
                subscriber
                    .telegram_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ));
        }
    }
    Screen {
        text,
        markup: column(vec![cb(back_label(lang), CallbackAction::AdminAccountsMenu)]),
    }
}

pub fn broadcast_prompt(lang: Lang) -> Screen {
    let cancel = match lang {
        Lang::Ar => "❌ إلغاء",
        Lang::En => "❌ Cancel",
    };
    Screen {
        text: t!("admin.broadcast_prompt", locale = lang.as_str()).into_owned(),
        markup: column(vec![cb(cancel, CallbackAction::AdminCancelBroadcast)]),
    }
}

pub fn broadcast_confirm(lang: Lang, audience: Audience, count: usize, draft: &str) -> Screen {
    let (yes, cancel) = match lang {
        Lang::Ar => ("✅ نعم، إرسال", "❌ إلغاء"),
        Lang::En => ("✅ Yes, Send", "❌ Cancel"),
    };
    Screen {
        text: t!(
            "admin.broadcast_confirm",
            locale = lang.as_str(),
            target = audience.target_name(lang),
            count = count,
            message = draft
        )
        .into_owned(),
        markup: InlineKeyboardMarkup::new(vec![vec![
            cb(yes, CallbackAction::AdminConfirmBroadcast),
            cb(cancel, CallbackAction::AdminCancelBroadcast),
        ]]),
    }
}

/// Congratulation / rejection notices sent to the account owner after
/// moderation. Passwords never appear here.
pub fn user_status_notice(
    lang: Lang,
    account: &trading_accounts::Model,
    status: AccountStatus,
    reason: Option<&str>,
    agent_link: &str,
) -> Screen {
    let locale = lang.as_str();
    let text = match status {
        AccountStatus::Active => {
            let header = build_header_framed(
                &t!("user.congrats_title", locale = locale),
                lang,
                '🎉',
            );
            let body = t!(
                "user.congrats_body",
                locale = locale,
                broker = account.broker_name,
                account = account.account_number,
                server = account.server
            );
            format!("{header}\n{body}")
        }
        _ => {
            let header = build_header_framed(
                &t!("user.rejected_title", locale = locale),
                lang,
                '❗',
            );
            let reason_line = match reason {
                Some(reason) => t!("user.rejected_reason_line", locale = locale, reason = reason).into_owned(),
                None => String::new(),
            };
            let body = t!(
                "user.rejected_body",
                locale = locale,
                reason_line = reason_line,
                broker = account.broker_name,
                account = account.account_number,
                agent = agent_link
            );
            format!("{header}\n{body}")
        }
    };
    Screen {
        text,
        markup: column(vec![cb(
            t!("user.ok_button", locale = locale).into_owned(),
            CallbackAction::ConfirmNotification(account.id),
        )]),
    }
}

/// Moderation notice sent to each admin when an account is created or
/// edited. The password column is deliberately masked.
pub fn admin_account_notice(
    lang: Lang,
    is_update: bool,
    account: &trading_accounts::Model,
    subscriber: &subscribers::Model,
) -> Screen {
    let locale = lang.as_str();
    let title_key = if is_update {
        "admin.notify_updated_account"
    } else {
        "admin.notify_new_account"
    };
    let title = t!(title_key, locale = locale);
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
    let opt_num = |v: &Option<rust_decimal::Decimal>| {
        v.map(|d| d.to_string()).unwrap_or_else(|| "N/A".to_string())
    };
    let body = t!(
        "admin.notify_body",
        locale = locale,
        name = subscriber.name,
        email = subscriber.email,
        phone = subscriber.phone,
        username = opt(&subscriber.telegram_username),
        telegram_id = subscriber
            .telegram_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        broker = account.broker_name,
        account = account.account_number,
        password = "••••••",
        server = account.server,
        expected_return = opt(&account.expected_return),
        agent = opt(&account.agent),
        initial_balance = opt_num(&account.initial_balance),
        current_balance = opt_num(&account.current_balance),
        withdrawals = opt_num(&account.withdrawals),
        copy_start_date = account
            .copy_start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        id = account.id
    );
    let (activate, reject) = match lang {
        Lang::Ar => ("✅ تفعيل الحساب", "❌ رفض الحساب"),
        Lang::En => ("✅ Activate Account", "❌ Reject Account"),
    };
    Screen {
        text: format!("{}\n{}", build_header(&title, lang), body),
        markup: InlineKeyboardMarkup::new(vec![vec![
            cb(activate, CallbackAction::ActivateAccount(account.id)),
            cb(reject, CallbackAction::RejectAccount(account.id)),
        ]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn subscriber() -> subscribers::Model {
        subscribers::Model {
            id: 1,
            name: "Omar".into(),
            email: "omar@example.com".into(),
            phone: "+20100000000".into(),
            telegram_username: Some("omar".into()),
            telegram_id: Some(555),
            lang: "en".into(),
        }
    }

    fn account() -> trading_accounts::Model {
        trading_accounts::Model {
            id: 9,
            subscriber_id: 1,
            broker_name: "Oneroyal".into(),
            account_number: "123456".into(),
            password: "hunter2".into(),
            server: "OneRoyal-Live".into(),
            initial_balance: Some(dec!(1000)),
            current_balance: Some(dec!(1100)),
            withdrawals: Some(dec!(100)),
            copy_start_date: NaiveDate::from_ymd_opt(2026, 6, 1),
            agent: Some("Ahmed".into()),
            expected_return: Some("X2 = 20% - 30%".into()),
            status: AccountStatus::Active,
            rejection_reason: None,
            created_at: None,
        }
    }

    #[test]
    fn my_accounts_never_renders_password() {
        let sub = subscriber();
        let acc = account();
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let screen = my_accounts(Lang::En, &sub, std::slice::from_ref(&acc), today, Some("https://forms.example"));
        assert!(!screen.text.contains("hunter2"));
        assert!(screen.text.contains("Oneroyal"));
        assert!(screen.text.contains("20%"));
        // 65 days elapsed
        assert!(screen.text.contains("2 months and 5 days"));
    }

    #[test]
    fn admin_notice_masks_password() {
        let sub = subscriber();
        let acc = account();
        let screen = admin_account_notice(Lang::En, false, &acc, &sub);
        assert!(!screen.text.contains("hunter2"));
        assert!(screen.text.contains("••••••"));
        assert!(screen.text.contains("123456"));
        let rows = &screen.markup.inline_keyboard;
        assert_eq!(rows[0][0].text, "✅ Activate Account");
    }

    #[test]
    fn rejection_notice_includes_reason_and_agent() {
        let mut acc = account();
        acc.status = AccountStatus::Rejected;
        let screen = user_status_notice(
            Lang::En,
            &acc,
            AccountStatus::Rejected,
            Some("incomplete data"),
            "@Omarkin9",
        );
        assert!(screen.text.contains("incomplete data"));
        assert!(screen.text.contains("@Omarkin9"));
        assert!(!screen.text.contains("hunter2"));
    }

    #[test]
    fn incomplete_account_shows_placeholder() {
        let sub = subscriber();
        let mut acc = account();
        acc.withdrawals = None;
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let screen = my_accounts(Lang::En, &sub, std::slice::from_ref(&acc), today, None);
        assert!(screen.text.contains("Requires complete data"));
    }

    #[test]
    fn edit_guard_notice_is_short_and_localized() {
        assert_eq!(
            edit_guard_notice(Lang::En),
            "⚠️ You haven't registered yet."
        );
        assert!(edit_guard_notice(Lang::Ar).contains("لم تقم بالتسجيل"));
    }

    #[test]
    fn edit_data_url_is_prefilled_and_escaped() {
        let mut sub = subscriber();
        sub.name = "Omar Kin".into();
        let url = edit_data_url("https://forms.example/webapp", Lang::En, &sub);
        assert!(url.contains("edit=1"));
        assert!(url.contains("lang=en"));
        assert!(url.contains("Omar%20Kin") || url.contains("Omar+Kin"));
    }
}
