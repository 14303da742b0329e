//! Application state wiring the chat service together.
//!
//! AppState is generic over the intent-resolver and history-store ports so
//! the router can be exercised with fakes. [`ConcreteAppState`] pins it to
//! the AWS implementations used by the binary.

use std::sync::Arc;

use lexbridge_core::chat::service::ChatService;
use lexbridge_core::repository::history::ChatHistoryStore;
use lexbridge_core::repository::intent::IntentResolver;
use lexbridge_infra::aws::AwsCredentials;
use lexbridge_infra::config::BridgeConfig;
use lexbridge_infra::dynamodb::DynamoDbHistoryStore;
use lexbridge_infra::lex::LexRuntimeClient;

/// Concrete chat service pinned to Lex and DynamoDB.
pub type ConcreteChatService = ChatService<LexRuntimeClient, DynamoDbHistoryStore>;

/// Concrete state used by the `lexbridge` binary.
pub type ConcreteAppState = AppState<LexRuntimeClient, DynamoDbHistoryStore>;

/// Shared application state. Cheap to clone.
pub struct AppState<R: IntentResolver, H: ChatHistoryStore> {
    pub chat: Arc<ChatService<R, H>>,
}

impl<R: IntentResolver, H: ChatHistoryStore> AppState<R, H> {
    pub fn new(chat: ChatService<R, H>) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}

impl<R: IntentResolver, H: ChatHistoryStore> Clone for AppState<R, H> {
    fn clone(&self) -> Self {
        Self {
            chat: Arc::clone(&self.chat),
        }
    }
}

impl ConcreteAppState {
    /// Build clients and configuration once, at process start.
    ///
    /// Fails if any required configuration or credential is missing.
    pub fn init() -> anyhow::Result<Self> {
        let config = BridgeConfig::from_env()?;
        let credentials = Arc::new(AwsCredentials::from_env()?);
        Self::from_parts(config, credentials)
    }

    /// Build state from already-resolved configuration and credentials.
    pub fn from_parts(
        config: BridgeConfig,
        credentials: Arc<AwsCredentials>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;

        let resolver = LexRuntimeClient::new(
            http.clone(),
            Arc::clone(&credentials),
            config.region.clone(),
            config.lex_endpoint.clone(),
        );
        let history = DynamoDbHistoryStore::new(
            http,
            credentials,
            config.region.clone(),
            config.dynamodb_endpoint.clone(),
            config.table_name.clone(),
        );

        tracing::info!(
            bot_id = %config.bot_id,
            bot_alias_id = %config.bot_alias_id,
            locale_id = %config.locale_id,
            table = %config.table_name,
            region = %config.region,
            "Chat bridge configured"
        );

        Ok(Self::new(ChatService::new(
            resolver,
            history,
            config.bot_target(),
        )))
    }
}
