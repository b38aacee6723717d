//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CollectorOuphe bot.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::{LogFormat, LoggingConfig};
use crate::state::ConversationLabel;
use crate::utils::errors::{ErrorSeverity, OupheError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "collector-ouphe.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json = config.format == LogFormat::Json;
    let stdout_text = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));
    let stdout_json = json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout));
    let file_text = (!json).then(|| tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking.clone()));
    let file_json = json.then(|| tracing_subscriber::fmt::layer().json().with_writer(non_blocking));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_text)
        .with(stdout_json)
        .with(file_text)
        .with(file_json)
        .try_init()
        .map_err(|e| OupheError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    info!(format = ?config.format, "Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log a conversation label change
pub fn log_state_transition(user_id: i64, from: ConversationLabel, to: ConversationLabel) {
    debug!(
        user_id = user_id,
        from = %from,
        to = %to,
        "Conversation state transition"
    );
}

/// Log a rejected registration gate check
pub fn log_unregistered(user_id: i64, text: &str) {
    warn!(
        user_id = user_id,
        text = text,
        "Message from unregistered user"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log an error at the level matching its severity
pub fn log_error(err: &OupheError, user_id: Option<i64>, context: &str) {
    let severity = err.severity();
    let recoverable = err.is_recoverable();
    match severity {
        ErrorSeverity::Info => info!(user_id = user_id, error = %err, recoverable, "{}", context),
        ErrorSeverity::Warning => warn!(user_id = user_id, error = %err, recoverable, "{}", context),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(user_id = user_id, error = %err, severity = %severity, recoverable, "{}", context)
        }
    }
}
