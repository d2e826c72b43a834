//! Localized strings used by the wizard

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const PATH_EMPTY: &str = "wizard.create.errors.path_empty";
pub const NAME_EMPTY: &str = "wizard.create.errors.name_empty";
pub const PLUGIN_INSTALLED: &str = "wizard.create.plugins_config.installed";
pub const PLUGIN_NOT_INSTALLED: &str = "wizard.create.plugins_config.not_installed";
pub const NOT_SET: &str = "wizard.create.systems_config.not_set";
pub const WINDOW_MANAGER: &str = "wizard.create.summary_config.window_manager";
pub const NO_WINDOW_MANAGER: &str = "wizard.create.summary_config.no_window_manager";
pub const INPUT_MANAGER: &str = "wizard.create.summary_config.input_manager";
pub const NO_INPUT_MANAGER: &str = "wizard.create.summary_config.no_input_manager";

/// Every key the wizard asks the engine for at startup
pub const WIZARD_KEYS: [&str; 9] = [
    PATH_EMPTY,
    NAME_EMPTY,
    PLUGIN_INSTALLED,
    PLUGIN_NOT_INSTALLED,
    NOT_SET,
    WINDOW_MANAGER,
    NO_WINDOW_MANAGER,
    INPUT_MANAGER,
    NO_INPUT_MANAGER,
];

/// Key -> translated string table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localization {
    strings: IndexMap<String, String>,
}

impl Localization {
    /// English strings for all wizard keys
    pub fn builtin() -> Self {
        let mut lm = Self::default();
        lm.insert(PATH_EMPTY, "Please choose a project folder");
        lm.insert(NAME_EMPTY, "Please enter a project name");
        lm.insert(PLUGIN_INSTALLED, "Installed");
        lm.insert(PLUGIN_NOT_INSTALLED, "Not installed");
        lm.insert(NOT_SET, "Not set");
        lm.insert(WINDOW_MANAGER, "Window manager: ");
        lm.insert(NO_WINDOW_MANAGER, "No window manager selected");
        lm.insert(INPUT_MANAGER, "Input manager: ");
        lm.insert(NO_INPUT_MANAGER, "No input manager selected");
        lm
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Returns the translation, or the key itself when it is missing
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Keeps only the requested keys, filling gaps from `fallback`
    pub fn subset(&self, keys: &[&str], fallback: &Localization) -> Localization {
        let mut out = Localization::default();
        for key in keys {
            let value = self
                .strings
                .get(*key)
                .or_else(|| fallback.strings.get(*key))
                .cloned()
                .unwrap_or_else(|| key.to_string());
            out.insert(*key, value);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let lm = Localization::default();
        assert_eq!(lm.get(NOT_SET), NOT_SET);
    }

    #[test]
    fn test_builtin_covers_wizard_keys() {
        let lm = Localization::builtin();
        for key in WIZARD_KEYS {
            assert_ne!(lm.get(key), key, "missing builtin string for {key}");
        }
    }

    #[test]
    fn test_subset_prefers_overrides() {
        let mut custom = Localization::default();
        custom.insert(NOT_SET, "Nicht gesetzt");
        let lm = custom.subset(&[NOT_SET, NAME_EMPTY], &Localization::builtin());
        assert_eq!(lm.len(), 2);
        assert_eq!(lm.get(NOT_SET), "Nicht gesetzt");
        assert_eq!(lm.get(NAME_EMPTY), "Please enter a project name");
    }

    #[test]
    fn test_deserialize_flat_yaml() {
        let yaml = "wizard.create.systems_config.not_set: \"-\"\n";
        let lm: Localization = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(lm.get(NOT_SET), "-");
    }
}
