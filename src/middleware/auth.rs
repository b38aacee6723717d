//! Registration gate
//!
//! Every message passes through here before it reaches the conversation
//! middleware. Unregistered users may only use `/register`; registered users
//! get their auth token attached to the request context.

use tracing::{debug, error, info};
use crate::handlers::replies;
use crate::models::TelegramUser;
use crate::services::AuthService;
use crate::state::AuthToken;
use crate::utils::logging::{log_unregistered, log_user_action};

/// Outcome of the registration check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Registered user; continue with this token
    Proceed(AuthToken),
    /// Stop here and send this reply
    Respond(String),
}

/// Registration middleware in front of the conversation core
#[derive(Clone)]
pub struct RegistrationGate {
    auth: AuthService,
}

impl RegistrationGate {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    /// Check the sender of a message
    ///
    /// `register` is true when the message is the `/register` command, which
    /// is handled entirely by the gate.
    pub async fn check(&self, user: &TelegramUser, text: &str, register: bool) -> GateDecision {
        let token = self.auth.is_registered(user.id).await;

        match (token, register) {
            (Some(_), true) => {
                debug!(user_id = user.id, "Registration requested by a registered user");
                GateDecision::Respond(replies::ALREADY_REGISTERED.to_string())
            }
            (Some(token), false) => GateDecision::Proceed(token),
            (None, true) => match self.auth.register(user).await {
                Ok(_) => {
                    info!(user_id = user.id, "User registered");
                    log_user_action(user.id, "register", None);
                    GateDecision::Respond(replies::REGISTERED.to_string())
                }
                Err(e) => {
                    error!(user_id = user.id, error = %e, "Registration failed");
                    GateDecision::Respond(replies::REGISTRATION_FAILED.to_string())
                }
            },
            (None, false) => {
                log_unregistered(user.id, text);
                GateDecision::Respond(replies::NOT_REGISTERED.to_string())
            }
        }
    }
}
