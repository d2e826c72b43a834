//! Project settings accumulated across wizard steps

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::SelectionKind;

/// Category name -> available implementation names, in first-seen order
pub type CategoryMap = IndexMap<String, Vec<String>>;

/// Category name -> chosen implementation. A missing key means "not set".
pub type Selection = IndexMap<String, String>;

/// Extra options a plugin contributes once enabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systems: Option<CategoryMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managers: Option<CategoryMap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub details: PluginDetails,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: false,
            details: PluginDetails::default(),
        }
    }

    pub fn with_systems(mut self, systems: CategoryMap) -> Self {
        self.details.systems = Some(systems);
        self
    }

    pub fn with_managers(mut self, managers: CategoryMap) -> Self {
        self.details.managers = Some(managers);
        self
    }
}

/// Payload handed to the engine when the project is created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub project_name: String,
    pub project_path: String,
    pub plugins: Vec<Plugin>,
    pub systems: CategoryMap,
    pub additional_systems: CategoryMap,
    pub managers: CategoryMap,
    pub selected_systems: Selection,
    pub selected_managers: Selection,
}

impl Settings {
    /// Full project directory as shown in the summary
    pub fn project_dir(&self) -> String {
        format!("{}/{}", self.project_path, self.project_name)
    }

    pub fn enabled_plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter().filter(|p| p.enabled)
    }

    /// Updates the `enabled` flag of the plugin called `name`.
    /// Returns false when no such plugin exists.
    pub fn set_plugin_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.plugins.iter_mut().find(|p| p.name == name) {
            Some(plugin) => {
                plugin.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Rebuilds `additional_systems` and `managers` from scratch out of the
    /// enabled plugins.
    pub fn recompute_plugin_contributions(&mut self) {
        let mut additional_systems = CategoryMap::new();
        let mut managers = CategoryMap::new();

        for plugin in self.plugins.iter().filter(|p| p.enabled) {
            if let Some(systems) = &plugin.details.systems {
                merge_categories(&mut additional_systems, systems);
            }
            if let Some(plugin_managers) = &plugin.details.managers {
                merge_categories(&mut managers, plugin_managers);
            }
        }

        self.additional_systems = additional_systems;
        self.managers = managers;
    }

    pub fn selection_mut(&mut self, kind: SelectionKind) -> &mut Selection {
        match kind {
            SelectionKind::System => &mut self.selected_systems,
            SelectionKind::Manager => &mut self.selected_managers,
        }
    }
}

/// Appends `src` lists onto `dst`, keeping the category order of `dst` and
/// adding unseen categories at the end.
pub fn merge_categories(dst: &mut CategoryMap, src: &CategoryMap) {
    for (category, implementations) in src {
        dst.entry(category.clone())
            .or_default()
            .extend(implementations.iter().cloned());
    }
}

/// Applies a dropdown change: an empty value clears the category, anything
/// else sets it.
pub fn apply_selection(selection: &mut Selection, category: &str, value: &str) {
    if value.is_empty() {
        selection.shift_remove(category);
    } else {
        selection.insert(category.to_string(), value.to_string());
    }
}
