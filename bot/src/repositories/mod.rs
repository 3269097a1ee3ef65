pub mod account_repository;
pub mod subscriber_repository;

pub use account_repository::{AccountRepository, PerformanceRepository};
pub use subscriber_repository::{SubscriberRepository, UpsertOutcome};
