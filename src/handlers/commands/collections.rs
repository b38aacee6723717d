//! Collection command handlers
//!
//! Create, rename and delete are two-step flows. The ask step stores an
//! awaiting label and prompts; the next free-text message from the same user
//! is the respond step, which validates the input, calls the collector and
//! resets the label whatever the outcome.

use std::sync::Arc;
use tracing::{debug, error, info, warn};
use crate::handlers::replies;
use crate::models::{find_by_name, Collection};
use crate::services::CollectorApi;
use crate::state::{AuthToken, ConversationLabel, PendingRequest, StateStore};
use crate::utils::errors::CollectorError;
use crate::utils::helpers::{split_rename_input, validate_collection_name, NameCheck};
use crate::utils::logging::{log_api_error, log_error, log_state_transition, log_user_action};

/// Text sent back to the user
type Reply = String;

/// Ask/respond handlers for collection management
#[derive(Clone)]
pub struct CollectionHandler {
    store: Arc<dyn StateStore>,
    api: Arc<dyn CollectorApi>,
}

impl CollectionHandler {
    pub fn new(store: Arc<dyn StateStore>, api: Arc<dyn CollectorApi>) -> Self {
        Self { store, api }
    }

    /// Handle /collections
    pub async fn list(&self, request: &PendingRequest) -> Reply {
        let Some(token) = self.token(request) else {
            return replies::OPERATION_FAILED.to_string();
        };

        match self.api.list_collections(token).await {
            Ok(collections) if collections.is_empty() => replies::NO_COLLECTIONS.to_string(),
            Ok(collections) => replies::collection_list(collections.iter().map(|c| c.name.as_str())),
            Err(e) => {
                log_api_error("collector", &e.to_string(), Some("list collections"));
                replies::OPERATION_FAILED.to_string()
            }
        }
    }

    /// Handle /collection_new
    pub async fn ask_create(&self, request: &PendingRequest) -> Reply {
        self.ask(request, ConversationLabel::AwaitingCreateName, replies::ask_create()).await
    }

    /// Handle /collection_rename
    pub async fn ask_rename(&self, request: &PendingRequest) -> Reply {
        self.ask(request, ConversationLabel::AwaitingRenameNames, replies::ASK_RENAME.to_string()).await
    }

    /// Handle /collection_delete
    pub async fn ask_delete(&self, request: &PendingRequest) -> Reply {
        self.ask(request, ConversationLabel::AwaitingDeleteName, replies::ASK_DELETE.to_string()).await
    }

    /// Name of a new collection; ignored unless awaiting one
    pub async fn respond_create(&self, request: &PendingRequest) -> Option<Reply> {
        if request.label() != ConversationLabel::AwaitingCreateName {
            return None;
        }
        let reply = self.create(request).await;
        self.reset(request).await;
        Some(reply)
    }

    /// Old and new name of a collection; ignored unless awaiting them
    pub async fn respond_rename(&self, request: &PendingRequest) -> Option<Reply> {
        if request.label() != ConversationLabel::AwaitingRenameNames {
            return None;
        }
        let reply = self.rename(request).await;
        self.reset(request).await;
        Some(reply)
    }

    /// Name of the collection to delete; ignored unless awaiting one
    pub async fn respond_delete(&self, request: &PendingRequest) -> Option<Reply> {
        if request.label() != ConversationLabel::AwaitingDeleteName {
            return None;
        }
        let reply = self.delete(request).await;
        self.reset(request).await;
        Some(reply)
    }

    async fn ask(&self, request: &PendingRequest, awaiting: ConversationLabel, prompt: Reply) -> Reply {
        let current = request.label();
        if !current.is_idle() {
            debug!(user_id = request.user_id, label = %current, "Flow already in progress");
            return replies::BUSY.to_string();
        }

        if let Err(e) = self.store.set_state(request.user_id, awaiting).await {
            log_error(&e, Some(request.user_id), "Failed to store conversation state");
            return replies::TRY_AGAIN_LATER.to_string();
        }

        log_state_transition(request.user_id, current, awaiting);
        prompt
    }

    async fn create(&self, request: &PendingRequest) -> Reply {
        let name = request.text.trim();
        if let Some(reply) = reject_new_name(name) {
            return reply;
        }
        let Some(token) = self.token(request) else {
            return replies::OPERATION_FAILED.to_string();
        };

        match self.api.create_collection(token, name).await {
            Ok(collection) => {
                info!(user_id = request.user_id, collection_id = %collection.id, "Collection created");
                log_user_action(request.user_id, "collection_new", Some(name));
                replies::created(name)
            }
            Err(e) => self.failed(request, "create collection", &e),
        }
    }

    async fn rename(&self, request: &PendingRequest) -> Reply {
        let Some((old_name, new_name)) = split_rename_input(&request.text) else {
            return replies::RENAME_FORMAT.to_string();
        };
        if let Some(reply) = reject_new_name(new_name) {
            return reply;
        }
        let Some(token) = self.token(request) else {
            return replies::OPERATION_FAILED.to_string();
        };
        let collection = match self.lookup(request, token, old_name).await {
            Ok(collection) => collection,
            Err(reply) => return reply,
        };

        match self.api.rename_collection(token, &collection.id, new_name).await {
            Ok(()) => {
                info!(user_id = request.user_id, collection_id = %collection.id, "Collection renamed");
                log_user_action(request.user_id, "collection_rename", Some(new_name));
                replies::renamed(old_name, new_name)
            }
            Err(e) => self.failed(request, "rename collection", &e),
        }
    }

    async fn delete(&self, request: &PendingRequest) -> Reply {
        let name = request.text.trim();
        if name.is_empty() {
            return replies::NAME_EMPTY.to_string();
        }
        let Some(token) = self.token(request) else {
            return replies::OPERATION_FAILED.to_string();
        };
        let collection = match self.lookup(request, token, name).await {
            Ok(collection) => collection,
            Err(reply) => return reply,
        };

        match self.api.delete_collection(token, &collection.id).await {
            Ok(()) => {
                info!(user_id = request.user_id, collection_id = %collection.id, "Collection deleted");
                log_user_action(request.user_id, "collection_delete", Some(name));
                replies::deleted(name)
            }
            Err(e) => self.failed(request, "delete collection", &e),
        }
    }

    /// Existing collection of the user with this exact name
    async fn lookup(&self, request: &PendingRequest, token: &AuthToken, name: &str) -> Result<Collection, Reply> {
        let collections = self
            .api
            .list_collections(token)
            .await
            .map_err(|e| self.failed(request, "list collections", &e))?;

        find_by_name(&collections, name).cloned().ok_or_else(|| {
            debug!(user_id = request.user_id, name = name, "Collection not found");
            replies::COLLECTION_NOT_FOUND.to_string()
        })
    }

    fn token<'a>(&self, request: &'a PendingRequest) -> Option<&'a AuthToken> {
        let token = request.token();
        if token.is_none() {
            error!(user_id = request.user_id, error = %CollectorError::MissingToken, "No auth token in context");
        }
        token
    }

    fn failed(&self, request: &PendingRequest, operation: &str, e: &CollectorError) -> Reply {
        warn!(user_id = request.user_id, operation = operation, "Collector call failed");
        log_api_error("collector", &e.to_string(), Some(operation));
        replies::OPERATION_FAILED.to_string()
    }

    async fn reset(&self, request: &PendingRequest) {
        match self.store.clear_state(request.user_id).await {
            Ok(()) => log_state_transition(request.user_id, request.label(), ConversationLabel::Default),
            Err(e) => log_error(&e, Some(request.user_id), "Failed to reset conversation state"),
        }
    }
}

fn reject_new_name(name: &str) -> Option<Reply> {
    match validate_collection_name(name) {
        NameCheck::Ok => None,
        NameCheck::Empty => Some(replies::NAME_EMPTY.to_string()),
        NameCheck::TooLong => Some(replies::name_too_long()),
    }
}
