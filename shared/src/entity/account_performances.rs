//! `SeaORM` Entity, written by hand
//!
//! Denormalized reporting cache, one row per active trading account.
//! Overwritten on every recompute pass; never authoritative.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_performances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub trading_account_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(nullable)]
    pub telegram_username: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub initial_balance: Option<Decimal>,
    /// Formatted integer percentage, e.g. "25%".
    #[sea_orm(nullable)]
    pub achieved_return: Option<String>,
    /// Localized elapsed string, e.g. "2 months and 5 days".
    #[sea_orm(nullable)]
    pub copy_duration: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trading_accounts::Entity",
        from = "Column::TradingAccountId",
        to = "super::trading_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TradingAccounts,
}

impl Related<super::trading_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TradingAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
