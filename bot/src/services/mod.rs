pub mod account_service;
pub mod broadcast;
pub mod notifier;
pub mod performance_service;
pub mod subscriber_service;
