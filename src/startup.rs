//! Process startup: logging and dependency wiring.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::ai::{OpenAIConfig, OpenAIProvider};
use crate::adapters::cache::InMemoryResponseCache;
use crate::adapters::http::TurnsAppState;
use crate::adapters::storage::{FileStateStore, InMemoryStateStore, RedisStateStore};
use crate::adapters::tools;
use crate::application::ProcessTurnHandler;
use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::domain::tools::ToolRegistryError;
use crate::ports::{AIError, LlmProvider, StateStore, StateStoreError};

/// Failures that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid tool configuration: {0}")]
    Tools(#[from] ToolRegistryError),

    #[error("LLM provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("State store setup failed: {0}")]
    Storage(#[from] StateStoreError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production logs are JSON.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Builds every adapter from configuration and wires the turn handler.
pub async fn build_state(config: &AppConfig) -> Result<TurnsAppState, StartupError> {
    let provider: Option<Arc<dyn LlmProvider>> = match &config.ai.api_key {
        Some(key) if config.ai.has_api_key() => {
            let openai = OpenAIConfig::from_secret(key.clone())
                .with_model(&config.ai.model)
                .with_base_url(&config.ai.base_url)
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries);
            info!(model = %config.ai.model, "LLM provider configured");
            Some(Arc::new(OpenAIProvider::new(openai)?))
        }
        _ => {
            warn!("No LLM API key configured; turns will return setup instructions");
            None
        }
    };

    let state_store = state_store(config).await?;
    let registry = tools::from_config(&config.tools)?;
    info!(tools = registry.len(), "Tool registry built");

    let handler = ProcessTurnHandler::new(
        provider,
        state_store,
        Arc::new(registry),
        Arc::new(InMemoryResponseCache::default()),
        config.agent.persona_prompt(),
    )
    .with_completion_timeout(config.ai.completion_budget())
    .with_history_scope(config.agent.history_scope)
    .with_sampling(config.ai.temperature, config.ai.max_tokens);

    Ok(TurnsAppState {
        handler: Arc::new(handler),
    })
}

async fn state_store(config: &AppConfig) -> Result<Arc<dyn StateStore>, StartupError> {
    let storage = &config.storage;
    let store: Arc<dyn StateStore> = match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryStateStore::new()),
        StorageBackend::File => Arc::new(FileStateStore::new(&storage.path)),
        StorageBackend::Redis => {
            let url = storage.redis_url.as_deref().unwrap_or_default();
            let store = RedisStateStore::connect(url).await?;
            match storage.ttl_secs {
                Some(ttl) => Arc::new(store.with_ttl(ttl)),
                None => Arc::new(store),
            }
        }
    };
    info!(backend = ?storage.backend, "State store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_builds_unconfigured_state() {
        let state = build_state(&AppConfig::default()).await.unwrap();
        assert!(!state.handler.is_configured());
    }

    #[tokio::test]
    async fn api_key_enables_provider() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some(secrecy::Secret::new("sk-test".to_string()));

        let state = build_state(&config).await.unwrap();
        assert!(state.handler.is_configured());
    }

    #[tokio::test]
    async fn invalid_tool_name_fails_startup() {
        let mut config = AppConfig::default();
        config.tools.push(crate::config::ToolConfig {
            name: "Bad Name".to_string(),
            description: "x".to_string(),
            parameters: None,
            url: "http://tools.internal".to_string(),
            paths: vec![crate::domain::conversation::ConversationPath::Sales],
            timeout_secs: 5,
        });

        assert!(matches!(
            build_state(&config).await,
            Err(StartupError::Tools(_))
        ));
    }
}
