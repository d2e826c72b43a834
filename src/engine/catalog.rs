//! Catalog of core systems and optional plugins offered by the wizard

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::wizard::settings::{CategoryMap, Plugin, Settings};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml_ng::Error,
    },
}

/// Core systems plus optional plugins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub systems: CategoryMap,
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml_ng::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads `path` when given, otherwise the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(builtin_catalog()),
        }
    }

    /// Fresh wizard settings seeded from this catalog
    pub fn into_settings(self) -> Settings {
        Settings {
            systems: self.systems,
            plugins: self.plugins,
            ..Default::default()
        }
    }
}

fn categories(pairs: &[(&str, &[&str])]) -> CategoryMap {
    pairs
        .iter()
        .map(|(category, names)| {
            (
                category.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            )
        })
        .collect()
}

/// Plugins bundled with the engine
pub fn builtin_catalog() -> Catalog {
    Catalog {
        systems: categories(&[("script", &["lua"]), ("movement", &["basic"])]),
        plugins: vec![
            Plugin::new("OgrePlugin").with_systems(categories(&[("render", &["ogre"])])),
            Plugin::new("SDL").with_managers(categories(&[("window", &["SDL"]), ("input", &["SDL"])])),
            Plugin::new("OisInput").with_managers(categories(&[("input", &["ois"])])),
            Plugin::new("ImGUI").with_systems(categories(&[("imgui", &["imgui"])])),
            Plugin::new("RecastNavigation").with_systems(categories(&[
                ("recast", &["recast"]),
                ("movement", &["recast"]),
            ])),
            Plugin::new("RocketUI").with_systems(categories(&[("ui", &["rocket"])])),
            Plugin::new("ParticleUniverse"),
        ],
    }
}
