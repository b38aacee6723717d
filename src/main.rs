//! CollectorOuphe Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use CollectorOuphe::{
    config::Settings,
    handlers::{BotRouter, Command, InboundMessage},
    models::TelegramUser,
    services::{self, ServiceFactory},
    utils::logging::{self, log_error},
    OupheError,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging).context("failed to initialize logging")?;

    info!("Starting {}...", CollectorOuphe::info());

    // Initialize services
    info!("Initializing services...");
    let factory = ServiceFactory::new(&settings)
        .await
        .context("failed to initialize services")?;

    let bot = Bot::new(&settings.bot.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to publish the command list");
    }

    let bot_username = services::resolve_bot_username(&bot, &settings.bot.username)
        .await
        .context("failed to resolve the bot username")?;

    let router = Arc::new(BotRouter::new(
        factory.state_store.clone(),
        factory.collector.clone(),
        factory.token_cache.clone(),
        bot_username,
    ));

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("CollectorOuphe bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("CollectorOuphe bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(handle_message)
}

/// Run a text message through the router and send the reply
async fn handle_message(bot: Bot, msg: Message, router: Arc<BotRouter>) -> HandlerResult {
    let text = msg.text().unwrap_or_default().to_string();
    let user = msg.from.as_ref().map(TelegramUser::from);
    let inbound = InboundMessage::new(user, msg.chat.id, text);

    if let Some(reply) = router.handle(inbound).await {
        if let Err(e) = bot.send_message(msg.chat.id, reply).await {
            let err = OupheError::from(e);
            log_error(&err, msg.from.as_ref().map(|user| user.id.0 as i64), "Failed to send reply");
            return Err(err.into());
        }
    }

    Ok(())
}
