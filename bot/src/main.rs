use std::sync::Arc;

use anyhow::Result;
use migration::MigratorTrait;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{dialogue, UpdateHandler};
use teloxide::prelude::*;

mod callback;
mod commands;
mod render;
mod repositories;
mod services;
mod state;
mod trackers;
mod web;

rust_i18n::i18n!("locales", fallback = "en");

use crate::commands::{admin, broadcast, moderation, start, Command};
use crate::state::{AppState, BotState};

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::handle_start))
        .branch(case![Command::Admin].endpoint(admin::handle_admin));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(
            case![BotState::AwaitingRejectionReason(prompt)]
                .endpoint(moderation::receive_rejection_reason),
        )
        .branch(case![BotState::AwaitingBroadcastText(audience)].endpoint(broadcast::receive_draft))
        .branch(dptree::endpoint(start::handle_free_text));

    let callback_query_handler =
        Update::filter_callback_query().endpoint(commands::dispatch_callback);

    dialogue::enter::<Update, InMemStorage<BotState>, BotState, _>()
        .branch(message_handler)
        .branch(callback_query_handler)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    tracing::info!("Starting YesFX intake bot...");

    let config = shared::Config::from_env()?;
    let db = shared::get_db_connection(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database ready");

    let bot = Bot::new(&config.bot_token);
    let state = Arc::new(AppState::new(config, db, bot.clone()));

    let web_state = state.clone();
    tokio::spawn(async move {
        if let Err(error) = web::serve(web_state).await {
            tracing::error!(%error, "web server stopped");
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<BotState>::new(), state])
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    Ok(())
}
