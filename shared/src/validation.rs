//! Boundary validation for form submissions.
//!
//! Every numeric/date field is parsed exactly once, here; the rest of the
//! system only ever sees typed values.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9\-\s]{6,20}$").expect("phone regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid number in field: {0}")]
    InvalidNumber(&'static str),
    #[error("Invalid date in field: {0}")]
    InvalidDate(&'static str),
    #[error("Name too short or missing.")]
    NameTooShort,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Invalid phone.")]
    InvalidPhone,
}

pub fn validate_contact(name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if !PHONE_RE.is_match(phone.trim()) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_decimal(value: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    required(value, field)?
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidNumber(field))
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let trimmed = required(value, field)?;
    // HTML date inputs send YYYY-MM-DD; tolerate a trailing time component.
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(field))
}

/// A fully validated trading-account submission; all ten business fields
/// are required on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub broker_name: String,
    pub account_number: String,
    pub password: String,
    pub server: String,
    pub initial_balance: Decimal,
    pub current_balance: Decimal,
    pub withdrawals: Decimal,
    pub copy_start_date: NaiveDate,
    pub agent: String,
    pub expected_return: String,
}

impl NewAccount {
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        broker_name: &str,
        account_number: &str,
        password: &str,
        server: &str,
        initial_balance: &str,
        current_balance: &str,
        withdrawals: &str,
        copy_start_date: &str,
        agent: &str,
        expected_return: &str,
    ) -> Result<Self, ValidationError> {
        Ok(NewAccount {
            broker_name: required(broker_name, "broker_name")?.to_string(),
            account_number: required(account_number, "account_number")?.to_string(),
            password: required(password, "password")?.to_string(),
            server: required(server, "server")?.to_string(),
            initial_balance: parse_decimal(initial_balance, "initial_balance")?,
            current_balance: parse_decimal(current_balance, "current_balance")?,
            withdrawals: parse_decimal(withdrawals, "withdrawals")?,
            copy_start_date: parse_date(copy_start_date, "copy_start_date")?,
            agent: required(agent, "agent")?.to_string(),
            expected_return: required(expected_return, "expected_return")?.to_string(),
        })
    }
}

/// A partial update; only fields that are present are validated and applied,
/// but a present field must still carry a usable value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub broker_name: Option<String>,
    pub account_number: Option<String>,
    pub password: Option<String>,
    pub server: Option<String>,
    pub initial_balance: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub withdrawals: Option<Decimal>,
    pub copy_start_date: Option<NaiveDate>,
    pub agent: Option<String>,
    pub expected_return: Option<String>,
}

impl AccountPatch {
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        broker_name: Option<&str>,
        account_number: Option<&str>,
        password: Option<&str>,
        server: Option<&str>,
        initial_balance: Option<&str>,
        current_balance: Option<&str>,
        withdrawals: Option<&str>,
        copy_start_date: Option<&str>,
        agent: Option<&str>,
        expected_return: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let text = |v: Option<&str>, field| v.map(|s| required(s, field).map(str::to_string)).transpose();
        Ok(AccountPatch {
            broker_name: text(broker_name, "broker_name")?,
            account_number: text(account_number, "account_number")?,
            password: text(password, "password")?,
            server: text(server, "server")?,
            initial_balance: initial_balance
                .map(|s| parse_decimal(s, "initial_balance"))
                .transpose()?,
            current_balance: current_balance
                .map(|s| parse_decimal(s, "current_balance"))
                .transpose()?,
            withdrawals: withdrawals.map(|s| parse_decimal(s, "withdrawals")).transpose()?,
            copy_start_date: copy_start_date
                .map(|s| parse_date(s, "copy_start_date"))
                .transpose()?,
            agent: text(agent, "agent")?,
            expected_return: text(expected_return, "expected_return")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_account(password: &str) -> Result<NewAccount, ValidationError> {
        NewAccount::parse(
            "Oneroyal",
            "123456",
            password,
            "Oneroyal-Live",
            "1000",
            "1100.50",
            "100",
            "2025-01-15",
            "Agent A",
            "X1 = 10% - 15%",
        )
    }

    #[test]
    fn full_submission_parses() {
        let acc = full_account("secret").unwrap();
        assert_eq!(acc.initial_balance, dec!(1000));
        assert_eq!(acc.current_balance, dec!(1100.50));
        assert_eq!(acc.copy_start_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        assert_eq!(
            full_account("   "),
            Err(ValidationError::MissingField("password"))
        );
    }

    #[test]
    fn bad_number_and_date_are_rejected() {
        let bad_number = NewAccount::parse(
            "Oneroyal", "1", "p", "s", "abc", "1", "1", "2025-01-15", "a", "x",
        );
        assert_eq!(bad_number, Err(ValidationError::InvalidNumber("initial_balance")));

        let bad_date = NewAccount::parse(
            "Oneroyal", "1", "p", "s", "1", "1", "1", "15/01/2025", "a", "x",
        );
        assert_eq!(bad_date, Err(ValidationError::InvalidDate("copy_start_date")));
    }

    #[test]
    fn date_with_time_component_is_accepted() {
        let acc = NewAccount::parse(
            "Oneroyal", "1", "p", "s", "1", "1", "1", "2025-01-15T00:00:00Z", "a", "x",
        )
        .unwrap();
        assert_eq!(acc.copy_start_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let patch = AccountPatch::parse(
            Some("Scope"),
            None,
            None,
            None,
            Some("2000"),
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(patch.broker_name.as_deref(), Some("Scope"));
        assert_eq!(patch.initial_balance, Some(dec!(2000)));
        assert_eq!(patch.server, None);

        let bad = AccountPatch::parse(
            Some(""),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(bad, Err(ValidationError::MissingField("broker_name")));
    }

    #[test]
    fn contact_validation() {
        assert!(validate_contact("Ahmed Ali", "a@b.com", "+20123456789").is_ok());
        assert_eq!(
            validate_contact("A", "a@b.com", "+20123456789"),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            validate_contact("Ahmed", "not-an-email", "+20123456789"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_contact("Ahmed", "a@b.com", "12"),
            Err(ValidationError::InvalidPhone)
        );
    }
}
