//! Engine backed by the local filesystem and the UI event loop

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};

use super::{Engine, EngineError, EngineEvent};
use crate::i18n::Localization;
use crate::types::CreationStatus;
use crate::wizard::settings::Settings;

pub const PROJECT_FILE: &str = "project.json";

pub struct LocalEngine {
    events: mpsc::UnboundedSender<EngineEvent>,
    locale: Option<PathBuf>,
    overwrite: bool,
}

impl LocalEngine {
    pub fn new(events: mpsc::UnboundedSender<EngineEvent>, locale: Option<PathBuf>) -> Self {
        Self {
            events,
            locale,
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn emit(&self, event: EngineEvent) {
        if self.events.send(event).is_err() {
            tracing::warn!("engine event dropped, UI loop is gone");
        }
    }
}

/// Creates `<project_path>/<project_name>` and writes the settings into
/// its project file.
pub fn write_project(settings: &Settings, overwrite: bool) -> (CreationStatus, PathBuf) {
    let directory = Path::new(&settings.project_path).join(&settings.project_name);
    let project_file = directory.join(PROJECT_FILE);

    if directory.exists() {
        let non_empty = fs::read_dir(&directory)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if !overwrite && non_empty && project_file.exists() {
            return (CreationStatus::ProjectExists, directory);
        }
    } else if let Err(err) = fs::create_dir_all(&directory) {
        tracing::error!(path = %directory.display(), "failed to create project directory: {err}");
        return (CreationStatus::ProjectFileCreationFailed, directory);
    }

    let written = serde_json::to_string_pretty(settings)
        .map_err(anyhow::Error::from)
        .and_then(|json| fs::write(&project_file, json).map_err(anyhow::Error::from));

    match written {
        Ok(()) => (CreationStatus::Success, directory),
        Err(err) => {
            tracing::error!(path = %project_file.display(), "failed to write project file: {err}");
            (CreationStatus::ProjectFileCreationFailed, directory)
        }
    }
}

#[async_trait]
impl Engine for LocalEngine {
    async fn request_localization(&self, keys: &[&str]) -> Result<Localization, EngineError> {
        let builtin = Localization::builtin();
        let Some(path) = &self.locale else {
            return Ok(builtin.subset(keys, &builtin));
        };

        let contents = tokio::fs::read_to_string(path).await?;
        let custom: Localization = serde_yaml_ng::from_str(&contents)?;
        if custom.is_empty() {
            tracing::warn!(path = %path.display(), "locale file has no entries");
        }
        tracing::debug!(path = %path.display(), entries = custom.len(), "locale loaded");
        Ok(custom.subset(keys, &builtin))
    }

    fn reset_wizard(&self) {
        self.emit(EngineEvent::WizardReset);
    }

    fn create_project(&self, settings: &Settings) {
        let (status, directory) = write_project(settings, self.overwrite);
        tracing::info!(?status, path = %directory.display(), "project creation finished");
        self.emit(EngineEvent::ProjectCreated { status, directory });
    }

    async fn pick_folder(&self) -> Result<PathBuf, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(EngineEvent::FolderRequested(tx))
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::PickCancelled)
    }
}
