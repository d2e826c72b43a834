//! Host engine the wizard talks to

pub mod catalog;
pub mod local;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::i18n::Localization;
use crate::types::CreationStatus;
use crate::wizard::settings::Settings;

pub use catalog::Catalog;
pub use local::LocalEngine;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("folder selection was cancelled")]
    PickCancelled,
    #[error("engine event channel closed")]
    ChannelClosed,
    #[error("failed to read locale file: {0}")]
    Locale(#[from] std::io::Error),
    #[error("failed to parse locale file: {0}")]
    LocaleParse(#[from] serde_yaml_ng::Error),
}

/// Notifications the engine pushes to the UI loop
#[derive(Debug)]
pub enum EngineEvent {
    /// The user asked to abort the wizard
    WizardReset,
    /// A folder picker should be shown; answer through the responder
    FolderRequested(oneshot::Sender<PathBuf>),
    ProjectCreated {
        status: CreationStatus,
        directory: PathBuf,
    },
}

#[async_trait]
pub trait Engine: Send + Sync {
    /// Resolves once, before the wizard is wired up
    async fn request_localization(&self, keys: &[&str]) -> Result<Localization, EngineError>;

    fn reset_wizard(&self);

    /// Fire-and-forget; the outcome arrives as an [`EngineEvent`]
    fn create_project(&self, settings: &Settings);

    async fn pick_folder(&self) -> Result<PathBuf, EngineError>;
}
