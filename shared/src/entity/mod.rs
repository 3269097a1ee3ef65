pub mod account_performances;
pub mod subscribers;
pub mod trading_accounts;
