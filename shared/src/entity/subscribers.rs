//! `SeaORM` Entity, written by hand

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscribers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(nullable)]
    pub telegram_username: Option<String>,
    /// Null until the subscriber first talks to the bot.
    #[sea_orm(unique, nullable)]
    pub telegram_id: Option<i64>,
    pub lang: String, // "ar" or "en"
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trading_accounts::Entity")]
    TradingAccounts,
}

impl Related<super::trading_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TradingAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
