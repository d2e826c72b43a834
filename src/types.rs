use serde::{Deserialize, Serialize};
use std::fmt;

/// Text inputs of the location form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Path,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Path => "path",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which selection map a dropdown writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    System,
    Manager,
}

/// Outcome of a project creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationStatus {
    Success,
    /// Target folder already holds a project file
    ProjectExists,
    ProjectFileCreationFailed,
}

impl CreationStatus {
    pub fn message(&self) -> &'static str {
        match self {
            CreationStatus::Success => "Project created",
            CreationStatus::ProjectExists => "A project already exists in that folder",
            CreationStatus::ProjectFileCreationFailed => "Failed to write the project file",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CreationStatus::Success)
    }
}
