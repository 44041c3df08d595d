//! Shared services handed to every component.

use std::sync::Arc;

use cre8tly_core::routing::{EntryRouter, PendingNavigation, RuntimeProbe};
use cre8tly_core::time::Instant;
use cre8tly_core::{
    AudioRegistry, Canvas, ClientError, SharedStore, StorageError, Theme, ThemePreference,
    TokenStore, UploadClient,
};
use thiserror::Error;

use crate::commands::Command;
use crate::config::AppConfig;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Upload client error: {0}")]
    Client(#[from] ClientError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Owns the app-wide services. Components receive references from here
/// instead of reaching for globals.
#[derive(Debug)]
pub struct AppContext {
    config: AppConfig,
    audio: Arc<AudioRegistry>,
    theme: ThemePreference,
    tokens: TokenStore,
    router: EntryRouter,
    upload: UploadClient,
}

impl AppContext {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        let tokens = TokenStore::new(store.clone());
        let theme = ThemePreference::load(store);
        let router = EntryRouter::new(config.routes.clone()).with_delay(config.navigation_delay());
        let upload = UploadClient::new(config.upload.clone(), tokens.clone());
        log::info!("Context ready, theme {}", theme.theme());
        Self {
            config,
            audio: Arc::new(AudioRegistry::new()),
            theme,
            tokens,
            router,
            upload,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry shared by every audio player.
    pub fn audio(&self) -> Arc<AudioRegistry> {
        Arc::clone(&self.audio)
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn theme_mut(&mut self) -> &mut ThemePreference {
        &mut self.theme
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn upload(&self) -> &UploadClient {
        &self.upload
    }

    pub fn router(&self) -> &EntryRouter {
        &self.router
    }

    /// Detect the runtime and schedule the entry navigation.
    pub fn start(&self, probe: &dyn RuntimeProbe, now: Instant) -> PendingNavigation {
        let pending = self.router.schedule(probe, now);
        log::info!(
            "Running in {} shell, navigating to {} in {:?}",
            pending.runtime(),
            self.router.resolve(pending.runtime()),
            self.router.delay()
        );
        pending
    }

    /// Apply an editor command to `canvas`.
    pub fn dispatch(&mut self, command: Command, canvas: &mut Canvas) -> AppResult<()> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::SelectAll => canvas.select_all(),
            Command::Duplicate => {
                let created = canvas.duplicate_selected();
                log::info!("Duplicated {} shapes", created.len());
            }
            Command::Delete => canvas.delete_selected(),
            Command::Undo => {
                canvas.undo();
            }
            Command::Redo => {
                canvas.redo();
            }
            Command::Escape => {
                canvas.clear_selection();
                canvas.close_side_panel();
            }
            Command::ToggleTheme => {
                let theme = self.theme.toggle()?;
                log::info!("Theme switched to {}", theme);
            }
        }
        Ok(())
    }
}
