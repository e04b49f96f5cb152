// src/cli/app.rs — Wiring shared by every subcommand

use std::path::Path;
use std::sync::Arc;

use crate::consistency::ConsistencyService;
use crate::infra::config::Config;
use crate::infra::paths;
use crate::journal::JournalService;
use crate::provider::openai::OpenAIProvider;
use crate::provider::GuardedProvider;
use crate::store::Store;
use crate::therapist::ChatService;

pub struct App {
    pub config: Config,
    pub account: String,
    pub store: Arc<Store>,
    pub consistency: Arc<ConsistencyService>,
    pub journal: JournalService,
}

impl App {
    /// Open the default database under the data dir.
    pub fn open(config: Config, account: Option<String>) -> anyhow::Result<Self> {
        paths::ensure_dirs()?;
        let store = Store::open(&paths::db_path())?;
        Ok(Self::with_store(config, account, Arc::new(store)))
    }

    pub fn open_at(config: Config, account: Option<String>, db: &Path) -> anyhow::Result<Self> {
        let store = Store::open(db)?;
        Ok(Self::with_store(config, account, Arc::new(store)))
    }

    pub fn with_store(config: Config, account: Option<String>, store: Arc<Store>) -> Self {
        let account = account.unwrap_or_else(|| config.account.id.clone());
        let consistency = Arc::new(ConsistencyService::new(
            store.clone(),
            store.clone(),
            config.goals.clone(),
        ));
        let journal = JournalService::new(store.clone(), consistency.clone());
        Self {
            config,
            account,
            store,
            consistency,
            journal,
        }
    }

    /// Chat service, with the external provider attached when it is enabled
    /// and has a credential.
    pub fn chat_service(&self) -> ChatService {
        let chat = ChatService::new(self.store.clone(), &self.config.chat);
        if !self.config.provider.enabled {
            return chat;
        }
        match OpenAIProvider::from_config(&self.config.provider) {
            Ok(provider) => {
                let guarded = GuardedProvider::from_config(Arc::new(provider), &self.config.provider);
                tracing::info!(provider = guarded.id(), model = %self.config.provider.model, "External completions enabled");
                chat.with_provider(guarded, self.config.provider.clone())
            }
            Err(e) => {
                tracing::warn!("External completions disabled: {}", e);
                chat
            }
        }
    }
}
