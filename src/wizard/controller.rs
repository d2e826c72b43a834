//! Step transitions and settings bookkeeping

use std::sync::Arc;

use crate::engine::Engine;
use crate::i18n::{self, Localization};
use crate::types::{FieldId, SelectionKind};
use crate::wizard::dropdown::build_dropdowns;
use crate::wizard::settings::{apply_selection, Settings};
use crate::wizard::step::{WizardState, WizardStep};
use crate::wizard::view::{NavButtons, SummaryView, WizardView};

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: WizardStep, to: WizardStep },
    /// The current step refused to be left
    Blocked,
    /// Nothing to do (same step, out of range, or already submitted)
    Unchanged,
    /// Abort was forwarded to the engine
    Reset,
    /// Settings were handed to the engine
    Submitted,
}

pub struct WizardController {
    engine: Arc<dyn Engine>,
    lm: Localization,
    state: WizardState,
    settings: Settings,
    view: WizardView,
}

impl WizardController {
    pub fn new(engine: Arc<dyn Engine>, lm: Localization, settings: Settings) -> Self {
        let state = WizardState::default();
        let mut view = WizardView::new(&lm, state.current(), state.last_index());
        view.location.name = settings.project_name.clone();
        view.location.path = settings.project_path.clone();

        let mut controller = Self {
            engine,
            lm,
            state,
            settings,
            view,
        };
        controller.refresh_plugin_labels();
        controller
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view(&self) -> &WizardView {
        &self.view
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current()
    }

    /// Starts over with fresh settings, keeping the engine and strings
    pub fn reset(&mut self, settings: Settings) {
        *self = Self::new(Arc::clone(&self.engine), self.lm.clone(), settings);
    }

    pub fn handle_step_click(&mut self, target: usize) -> NavOutcome {
        if target == self.state.current_step_index {
            return NavOutcome::Unchanged;
        }
        self.transition_to(target)
    }

    pub fn go_back(&mut self) -> NavOutcome {
        if self.state.is_first() {
            tracing::info!("wizard cancelled at first step");
            self.engine.reset_wizard();
            return NavOutcome::Reset;
        }
        self.transition_to(self.state.current_step_index - 1)
    }

    pub fn go_next(&mut self) -> NavOutcome {
        if !self.state.is_last() {
            return self.transition_to(self.state.current_step_index + 1);
        }

        if !self.view.nav.complete_enabled {
            return NavOutcome::Unchanged;
        }
        self.view.nav.complete_enabled = false;
        tracing::info!(
            project = %self.settings.project_name,
            path = %self.settings.project_path,
            "submitting project creation"
        );
        self.engine.create_project(&self.settings);
        NavOutcome::Submitted
    }

    pub fn transition_to(&mut self, target: usize) -> NavOutcome {
        let Some(to) = self.state.get(target) else {
            tracing::warn!(index = target, "ignoring transition to unknown step");
            return NavOutcome::Unchanged;
        };
        let from = self.state.current();

        if !self.leave_step(from) {
            tracing::debug!(step = from.id(), "transition blocked");
            return NavOutcome::Blocked;
        }

        self.enter_step(to);

        self.state.current_step_index = target;
        self.view.active = to;
        let complete_enabled = self.view.nav.complete_enabled;
        self.view.nav = NavButtons::for_position(target, self.state.last_index());
        self.view.nav.complete_enabled = complete_enabled;

        tracing::debug!(from = from.id(), to = to.id(), "step changed");
        NavOutcome::Moved { from, to }
    }

    /// Runs when `step` is left; false keeps the wizard on it
    fn leave_step(&mut self, step: WizardStep) -> bool {
        match step {
            WizardStep::Location => {
                self.settings.project_path = self.view.location.path.clone();
                self.settings.project_name = self.view.location.name.clone();
                match self.view.location.validate() {
                    Ok(()) => true,
                    Err(errors) => {
                        for err in &errors {
                            tracing::warn!(field = %err.field, "{}", err.message);
                        }
                        false
                    }
                }
            }
            WizardStep::Plugins => {
                self.settings.recompute_plugin_contributions();
                true
            }
            WizardStep::Systems | WizardStep::Summary => true,
        }
    }

    /// Prepares the page for `step` from the current settings
    fn enter_step(&mut self, step: WizardStep) {
        match step {
            WizardStep::Systems => self.build_selection_dropdowns(),
            WizardStep::Summary => self.build_summary(),
            WizardStep::Location | WizardStep::Plugins => {}
        }
    }

    fn build_selection_dropdowns(&mut self) {
        let not_set = self.lm.get(i18n::NOT_SET);
        self.view.system_dropdowns = build_dropdowns(
            SelectionKind::System,
            &[&self.settings.systems, &self.settings.additional_systems],
            &self.settings.selected_systems,
            not_set,
        );
        self.view.manager_dropdowns = build_dropdowns(
            SelectionKind::Manager,
            &[&self.settings.managers],
            &self.settings.selected_managers,
            not_set,
        );
    }

    fn build_summary(&mut self) {
        let settings = &self.settings;
        let manager_line = |category: &str, label_key: &str, none_key: &str| {
            match settings.selected_managers.get(category) {
                Some(value) => format!("{}{}", self.lm.get(label_key), value),
                None => self.lm.get(none_key).to_string(),
            }
        };

        self.view.summary = SummaryView {
            name: settings.project_name.clone(),
            path: settings.project_dir(),
            plugins: settings.enabled_plugins().map(|p| p.name.clone()).collect(),
            systems: settings
                .selected_systems
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            window_manager: manager_line("window", i18n::WINDOW_MANAGER, i18n::NO_WINDOW_MANAGER),
            input_manager: manager_line("input", i18n::INPUT_MANAGER, i18n::NO_INPUT_MANAGER),
        };
    }

    /// Checkbox change on the plugins page
    pub fn set_plugin_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if !self.settings.set_plugin_enabled(name, enabled) {
            tracing::warn!(plugin = name, "toggle for unknown plugin");
            return false;
        }
        tracing::debug!(plugin = name, enabled, "plugin toggled");
        let label = self.plugin_label(enabled);
        self.view.plugin_labels.insert(name.to_string(), label);
        true
    }

    pub fn toggle_plugin(&mut self, name: &str) -> bool {
        let enabled = self
            .settings
            .plugins
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.enabled);
        match enabled {
            Some(enabled) => self.set_plugin_enabled(name, !enabled),
            None => false,
        }
    }

    /// Dropdown change on the systems page. Values the category's dropdown
    /// does not offer are ignored.
    pub fn select(&mut self, kind: SelectionKind, category: &str, value: &str) {
        let dropdowns = match kind {
            SelectionKind::System => &mut self.view.system_dropdowns,
            SelectionKind::Manager => &mut self.view.manager_dropdowns,
        };
        let offered = dropdowns
            .iter_mut()
            .find(|d| d.category == category)
            .is_some_and(|dropdown| dropdown.select_value(value));
        if !offered {
            tracing::warn!(?kind, category, value, "selection not offered, ignored");
            return;
        }

        apply_selection(self.settings.selection_mut(kind), category, value);
        tracing::debug!(?kind, category, value, "selection changed");
    }

    /// Moves dropdown `index` (systems first, then managers) by `step` options
    pub fn cycle_dropdown(&mut self, index: usize, step: isize) {
        let Some(dropdown) = self.view.dropdown_at(index) else {
            return;
        };
        let kind = dropdown.kind;
        let category = dropdown.category.clone();
        let value = dropdown.cycle(step).to_string();
        self.select(kind, &category, &value);
    }

    pub fn edit_field(&mut self, field: FieldId) -> &mut String {
        self.view.location.value_mut(field)
    }

    /// Re-validates a field that lost focus
    pub fn blur_field(&mut self, field: FieldId) {
        if let Err(err) = self.view.location.validate_field(field) {
            tracing::trace!(field = %err.field, "field invalid on blur");
        }
    }

    /// Result of a folder pick: only the path input changes
    pub fn set_path_field(&mut self, path: impl Into<String>) {
        self.view.location.set(FieldId::Path, path);
    }

    fn plugin_label(&self, enabled: bool) -> String {
        let key = if enabled {
            i18n::PLUGIN_INSTALLED
        } else {
            i18n::PLUGIN_NOT_INSTALLED
        };
        self.lm.get(key).to_string()
    }

    fn refresh_plugin_labels(&mut self) {
        let labels = self
            .settings
            .plugins
            .iter()
            .map(|p| (p.name.clone(), self.plugin_label(p.enabled)))
            .collect();
        self.view.plugin_labels = labels;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::wizard::settings::{CategoryMap, Plugin};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEngine {
        resets: Mutex<usize>,
        created: Mutex<Vec<Settings>>,
    }

    #[async_trait]
    impl Engine for RecordingEngine {
        async fn request_localization(&self, _keys: &[&str]) -> Result<Localization, EngineError> {
            Ok(Localization::builtin())
        }

        fn reset_wizard(&self) {
            *self.resets.lock().unwrap() += 1;
        }

        fn create_project(&self, settings: &Settings) {
            self.created.lock().unwrap().push(settings.clone());
        }

        async fn pick_folder(&self) -> Result<PathBuf, EngineError> {
            Err(EngineError::PickCancelled)
        }
    }

    fn categories(pairs: &[(&str, &[&str])]) -> CategoryMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn controller_with(settings: Settings) -> (WizardController, Arc<RecordingEngine>) {
        let engine = Arc::new(RecordingEngine::default());
        let controller = WizardController::new(engine.clone(), Localization::builtin(), settings);
        (controller, engine)
    }

    fn filled_location(controller: &mut WizardController) {
        *controller.edit_field(FieldId::Name) = "demo".into();
        *controller.edit_field(FieldId::Path) = "/home/u".into();
    }

    #[test]
    fn test_empty_location_blocks_next() {
        let (mut controller, _) = controller_with(Settings::default());
        assert_eq!(controller.go_next(), NavOutcome::Blocked);
        assert_eq!(controller.state().current_step_index, 0);
        assert!(controller.view().location.error(FieldId::Name).is_some());

        *controller.edit_field(FieldId::Name) = "demo".into();
        assert_eq!(controller.go_next(), NavOutcome::Blocked);
        assert!(controller.view().location.error(FieldId::Name).is_none());
        assert!(controller.view().location.error(FieldId::Path).is_some());
    }

    #[test]
    fn test_step_click_on_active_step_is_noop() {
        let (mut controller, _) = controller_with(Settings::default());
        assert_eq!(controller.handle_step_click(0), NavOutcome::Unchanged);
        // an empty form would have produced inline errors if the leave ran
        assert!(controller.view().location.error(FieldId::Name).is_none());
    }

    #[test]
    fn test_step_click_jumps_and_is_gated() {
        let (mut controller, _) = controller_with(Settings::default());
        assert_eq!(controller.handle_step_click(3), NavOutcome::Blocked);
        filled_location(&mut controller);
        assert_eq!(
            controller.handle_step_click(3),
            NavOutcome::Moved {
                from: WizardStep::Location,
                to: WizardStep::Summary
            }
        );
        assert!(controller.view().nav.complete);
    }

    #[test]
    fn test_out_of_range_target_ignored() {
        let (mut controller, _) = controller_with(Settings::default());
        filled_location(&mut controller);
        assert_eq!(controller.transition_to(9), NavOutcome::Unchanged);
        assert_eq!(controller.state().current_step_index, 0);
    }

    #[test]
    fn test_back_at_first_step_resets() {
        let (mut controller, engine) = controller_with(Settings::default());
        assert_eq!(controller.go_back(), NavOutcome::Reset);
        assert_eq!(*engine.resets.lock().unwrap(), 1);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let (mut controller, _) = controller_with(Settings::default());
        filled_location(&mut controller);
        for _ in 0..10 {
            controller.go_next();
            assert!(controller.state().current_step_index <= controller.state().last_index());
        }
        for _ in 0..10 {
            controller.go_back();
            assert!(controller.state().current_step_index <= controller.state().last_index());
        }
        assert_eq!(controller.state().current_step_index, 0);
    }

    #[test]
    fn test_plugin_contributions_follow_toggles() {
        let settings = Settings {
            plugins: vec![Plugin::new("glfw").with_systems(categories(&[("window", &["GLFW"])]))],
            ..Default::default()
        };
        let (mut controller, _) = controller_with(settings);
        filled_location(&mut controller);
        controller.go_next();

        assert!(controller.set_plugin_enabled("glfw", true));
        assert_eq!(controller.view().plugin_labels["glfw"], "Installed");
        // nothing is recomputed until the plugins step is left
        assert!(controller.settings().additional_systems.is_empty());

        controller.go_next();
        assert_eq!(controller.settings().additional_systems["window"], vec!["GLFW"]);

        controller.go_back();
        assert!(controller.toggle_plugin("glfw"));
        assert_eq!(controller.view().plugin_labels["glfw"], "Not installed");
        controller.go_next();
        assert!(controller.settings().additional_systems.get("window").is_none());
    }

    #[test]
    fn test_sentinel_clears_selection() {
        let settings = Settings {
            systems: categories(&[("window", &["GLFW"])]),
            ..Default::default()
        };
        let (mut controller, _) = controller_with(settings);
        filled_location(&mut controller);
        controller.handle_step_click(2);

        controller.select(SelectionKind::System, "window", "GLFW");
        assert_eq!(controller.settings().selected_systems["window"], "GLFW");
        assert_eq!(controller.view().system_dropdowns[0].selected_index(), 1);

        controller.select(SelectionKind::System, "window", "");
        assert!(controller.settings().selected_systems.get("window").is_none());
        assert_eq!(controller.view().system_dropdowns[0].selected_index(), 0);
    }

    #[test]
    fn test_select_ignores_values_not_offered() {
        let settings = Settings {
            systems: categories(&[("window", &["GLFW"])]),
            ..Default::default()
        };
        let (mut controller, _) = controller_with(settings);
        filled_location(&mut controller);
        controller.handle_step_click(2);
        controller.select(SelectionKind::System, "window", "GLFW");

        controller.select(SelectionKind::System, "window", "Vulkan");
        assert_eq!(controller.settings().selected_systems["window"], "GLFW");
        assert_eq!(controller.view().system_dropdowns[0].selected().value, "GLFW");

        controller.select(SelectionKind::System, "audio", "SDL");
        assert!(controller.settings().selected_systems.get("audio").is_none());
    }

    #[test]
    fn test_dropdowns_reflect_existing_selection() {
        let mut settings = Settings {
            systems: categories(&[("render", &["ogre"])]),
            plugins: vec![Plugin::new("sdl")
                .with_managers(categories(&[("window", &["SDL"]), ("input", &["SDL"])]))],
            ..Default::default()
        };
        settings.selected_systems.insert("render".into(), "ogre".into());
        let (mut controller, _) = controller_with(settings);
        filled_location(&mut controller);
        controller.go_next();
        controller.set_plugin_enabled("sdl", true);
        controller.go_next();

        let view = controller.view();
        assert_eq!(view.system_dropdowns.len(), 1);
        assert!(view.system_dropdowns[0].options[1].selected);
        assert_eq!(view.manager_dropdowns.len(), 2);
        assert_eq!(view.dropdown_count(), 3);

        controller.cycle_dropdown(1, 1);
        assert_eq!(controller.settings().selected_managers["window"], "SDL");
    }

    #[test]
    fn test_summary_manager_lines() {
        let settings = Settings {
            plugins: vec![Plugin::new("sdl").with_managers(categories(&[("window", &["SDL"])]))],
            ..Default::default()
        };
        let (mut controller, _) = controller_with(settings);
        filled_location(&mut controller);
        controller.go_next();
        controller.set_plugin_enabled("sdl", true);
        controller.go_next();
        controller.select(SelectionKind::Manager, "window", "SDL");
        controller.go_next();

        let summary = &controller.view().summary;
        assert_eq!(summary.window_manager, "Window manager: SDL");
        assert_eq!(summary.input_manager, "No input manager selected");
    }

    #[test]
    fn test_folder_pick_only_sets_path_field() {
        let (mut controller, _) = controller_with(Settings::default());
        controller.set_path_field("/srv/projects");
        assert_eq!(controller.view().location.path, "/srv/projects");
        assert!(controller.settings().project_path.is_empty());
    }

    #[test]
    fn test_end_to_end_creation() {
        let (mut controller, engine) = controller_with(Settings {
            plugins: vec![Plugin::new("physx").with_systems(categories(&[("physics", &["PhysX"])]))],
            ..Default::default()
        });
        assert_eq!(controller.current_step(), WizardStep::Location);

        filled_location(&mut controller);
        controller.go_next();
        assert_eq!(controller.current_step(), WizardStep::Plugins);
        assert_eq!(controller.state().current_step_index, 1);

        controller.set_plugin_enabled("physx", true);
        controller.go_next();
        assert_eq!(
            controller.settings().additional_systems,
            categories(&[("physics", &["PhysX"])])
        );
        assert_eq!(controller.current_step(), WizardStep::Systems);

        controller.select(SelectionKind::System, "physics", "PhysX");
        assert_eq!(controller.settings().selected_systems.len(), 1);
        assert_eq!(controller.settings().selected_systems["physics"], "PhysX");

        controller.go_next();
        let summary = &controller.view().summary;
        assert_eq!(summary.name, "demo");
        assert_eq!(summary.path, "/home/u/demo");
        assert_eq!(summary.plugins, vec!["physx"]);
        assert_eq!(summary.systems, vec![("physics".to_string(), "PhysX".to_string())]);

        assert_eq!(controller.go_next(), NavOutcome::Submitted);
        assert!(!controller.view().nav.complete_enabled);
        assert_eq!(controller.go_next(), NavOutcome::Unchanged);

        let created = engine.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].project_name, "demo");
        assert_eq!(created[0].selected_systems["physics"], "PhysX");
    }

    #[test]
    fn test_reset_rebuilds_state() {
        let (mut controller, _) = controller_with(Settings::default());
        filled_location(&mut controller);
        controller.go_next();
        controller.reset(Settings::default());
        assert_eq!(controller.state().current_step_index, 0);
        assert!(controller.view().location.name.is_empty());
    }
}
