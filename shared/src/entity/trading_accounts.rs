//! `SeaORM` Entity, written by hand

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review status of a submitted trading account. Every edit sends the
/// account back to `UnderReview`; deletion is refused while it is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountStatus {
    #[sea_orm(string_value = "under_review")]
    #[serde(rename = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "active")]
    #[serde(rename = "active")]
    Active,
    #[sea_orm(string_value = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trading_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subscriber_id: i32,
    pub broker_name: String,
    pub account_number: String,
    /// Never rendered into chat messages or API responses.
    pub password: String,
    pub server: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub initial_balance: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub current_balance: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub withdrawals: Option<Decimal>,
    #[sea_orm(nullable)]
    pub copy_start_date: Option<Date>,
    #[sea_orm(nullable)]
    pub agent: Option<String>,
    #[sea_orm(nullable)]
    pub expected_return: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub status: AccountStatus,
    /// Present iff status is Rejected.
    #[sea_orm(nullable)]
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscribers::Entity",
        from = "Column::SubscriberId",
        to = "super::subscribers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Subscribers,
    #[sea_orm(has_many = "super::account_performances::Entity")]
    AccountPerformances,
}

impl Related<super::subscribers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscribers.def()
    }
}

impl Related<super::account_performances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountPerformances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All four financial fields present, the precondition for the
    /// performance snapshot and the achieved-return line.
    pub fn has_complete_financials(&self) -> bool {
        self.initial_balance.is_some()
            && self.current_balance.is_some()
            && self.withdrawals.is_some()
            && self.copy_start_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn status_round_trips_through_stored_strings() {
        for (status, s) in [
            (AccountStatus::UnderReview, "under_review"),
            (AccountStatus::Active, "active"),
            (AccountStatus::Rejected, "rejected"),
        ] {
            assert_eq!(status.to_value(), s);
            assert_eq!(AccountStatus::try_from_value(&s.to_string()).unwrap(), status);
        }
    }
}
