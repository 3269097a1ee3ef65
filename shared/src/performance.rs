//! Achieved-return and copy-duration math.
//!
//! Pure functions over the stored financial fields; incomplete or degenerate
//! inputs produce `None` / a localized placeholder, never an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::lang::Lang;

/// Integer percentage `(current + withdrawals - initial) / initial * 100`,
/// rounded half-to-even. `None` when any input is missing or initial <= 0.
pub fn achieved_return(
    initial: Option<Decimal>,
    current: Option<Decimal>,
    withdrawals: Option<Decimal>,
) -> Option<Decimal> {
    let initial = initial?;
    let current = current?;
    let withdrawals = withdrawals?;
    if initial <= Decimal::ZERO {
        return None;
    }
    let profit = current + withdrawals - initial;
    Some((profit / initial * Decimal::ONE_HUNDRED).round())
}

pub fn format_achieved_return(percent: Decimal) -> String {
    format!("{}%", percent)
}

/// Snapshot label for the performance table. Complete financials with a
/// non-positive initial balance read as `"0%"` rather than dropping the
/// account from the report; `None` only when a field is missing.
pub fn achieved_return_label(
    initial: Option<Decimal>,
    current: Option<Decimal>,
    withdrawals: Option<Decimal>,
) -> Option<String> {
    if let Some(percent) = achieved_return(initial, current, withdrawals) {
        return Some(format_achieved_return(percent));
    }
    if initial? <= Decimal::ZERO && current.is_some() && withdrawals.is_some() {
        Some("0%".to_string())
    } else {
        None
    }
}

/// Elapsed time since `start`, in whole 30-day months plus remainder days.
pub fn copy_duration(start: NaiveDate, today: NaiveDate, lang: Lang) -> String {
    let total_days = (today - start).num_days().max(0);
    let months = total_days / 30;
    let days = total_days % 30;

    match lang {
        Lang::Ar => {
            if months > 0 {
                if days > 0 {
                    format!("{} شهر و{} يوم", months, days)
                } else {
                    format!("{} شهر", months)
                }
            } else {
                format!("{} يوم", total_days)
            }
        }
        Lang::En => {
            let plural = |n: i64, unit: &str| {
                if n == 1 {
                    format!("{} {}", n, unit)
                } else {
                    format!("{} {}s", n, unit)
                }
            };
            if months > 0 {
                if days > 0 {
                    format!("{} and {}", plural(months, "month"), plural(days, "day"))
                } else {
                    plural(months, "month")
                }
            } else {
                plural(total_days, "day")
            }
        }
    }
}

/// Shown when the financial fields are present but the return cannot be
/// computed (initial balance of zero).
pub fn calculating_placeholder(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => "جاري الحساب",
        Lang::En => "Calculating...",
    }
}

/// Shown when one of the four financial fields is missing.
pub fn incomplete_placeholder(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => "يتطلب بيانات كاملة",
        Lang::En => "Requires complete data",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn achieved_return_basic() {
        let r = achieved_return(Some(dec!(1000)), Some(dec!(1100)), Some(dec!(100)));
        assert_eq!(r, Some(dec!(20)));
        assert_eq!(format_achieved_return(r.unwrap()), "20%");
    }

    #[test]
    fn achieved_return_rounds_to_integer() {
        // (1125 - 1000) / 1000 * 100 = 12.5 -> 12 (half to even)
        let r = achieved_return(Some(dec!(1000)), Some(dec!(1125)), Some(dec!(0)));
        assert_eq!(r, Some(dec!(12)));
        let r = achieved_return(Some(dec!(1000)), Some(dec!(1135)), Some(dec!(0)));
        assert_eq!(r, Some(dec!(14)));
    }

    #[test]
    fn achieved_return_loss_is_negative() {
        let r = achieved_return(Some(dec!(1000)), Some(dec!(800)), Some(dec!(100)));
        assert_eq!(r, Some(dec!(-10)));
    }

    #[test]
    fn achieved_return_guards() {
        assert_eq!(achieved_return(None, Some(dec!(1)), Some(dec!(1))), None);
        assert_eq!(achieved_return(Some(dec!(0)), Some(dec!(1)), Some(dec!(1))), None);
        assert_eq!(achieved_return(Some(dec!(-5)), Some(dec!(1)), Some(dec!(1))), None);
        assert_eq!(achieved_return(Some(dec!(1000)), None, Some(dec!(1))), None);
        assert_eq!(achieved_return(Some(dec!(1000)), Some(dec!(1)), None), None);
    }

    #[test]
    fn zero_initial_balance_snapshots_as_zero_percent() {
        let label = achieved_return_label(Some(dec!(0)), Some(dec!(500)), Some(dec!(100)));
        assert_eq!(label.as_deref(), Some("0%"));
        let label = achieved_return_label(Some(dec!(1000)), Some(dec!(1100)), Some(dec!(100)));
        assert_eq!(label.as_deref(), Some("20%"));
        assert_eq!(achieved_return_label(Some(dec!(0)), None, Some(dec!(1))), None);
        assert_eq!(achieved_return_label(None, Some(dec!(1)), Some(dec!(1))), None);
    }

    #[test]
    fn duration_65_days_is_two_months_and_five_days() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let start = today - chrono::Duration::days(65);
        assert_eq!(copy_duration(start, today, Lang::En), "2 months and 5 days");
        assert_eq!(copy_duration(start, today, Lang::Ar), "2 شهر و5 يوم");
    }

    #[test]
    fn duration_under_one_month_is_days_only() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let start = today - chrono::Duration::days(20);
        assert_eq!(copy_duration(start, today, Lang::En), "20 days");
        assert_eq!(copy_duration(start, today, Lang::Ar), "20 يوم");
    }

    #[test]
    fn duration_singulars() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        assert_eq!(
            copy_duration(today - chrono::Duration::days(1), today, Lang::En),
            "1 day"
        );
        assert_eq!(
            copy_duration(today - chrono::Duration::days(31), today, Lang::En),
            "1 month and 1 day"
        );
        assert_eq!(
            copy_duration(today - chrono::Duration::days(60), today, Lang::En),
            "2 months"
        );
    }

    #[test]
    fn duration_never_negative() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let start = today + chrono::Duration::days(3);
        assert_eq!(copy_duration(start, today, Lang::En), "0 days");
    }
}
