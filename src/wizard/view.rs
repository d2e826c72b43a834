//! View model the renderer draws from

use indexmap::IndexMap;

use crate::i18n::Localization;
use crate::wizard::dropdown::Dropdown;
use crate::wizard::form::LocationForm;
use crate::wizard::step::WizardStep;

/// Visibility of the navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub cancel: bool,
    pub back: bool,
    pub next: bool,
    pub complete: bool,
    pub complete_enabled: bool,
}

impl NavButtons {
    pub fn for_position(index: usize, last_index: usize) -> Self {
        let first = index == 0;
        let last = index == last_index;
        Self {
            cancel: first,
            back: !first,
            next: !last,
            complete: last,
            complete_enabled: true,
        }
    }
}

/// Read-only summary page contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryView {
    pub name: String,
    pub path: String,
    pub plugins: Vec<String>,
    pub systems: Vec<(String, String)>,
    pub window_manager: String,
    pub input_manager: String,
}

#[derive(Debug, Clone)]
pub struct WizardView {
    pub active: WizardStep,
    pub nav: NavButtons,
    pub location: LocationForm,
    /// Plugin name -> "installed"/"not installed" label
    pub plugin_labels: IndexMap<String, String>,
    pub system_dropdowns: Vec<Dropdown>,
    pub manager_dropdowns: Vec<Dropdown>,
    pub summary: SummaryView,
}

impl WizardView {
    pub fn new(lm: &Localization, first: WizardStep, last_index: usize) -> Self {
        Self {
            active: first,
            nav: NavButtons::for_position(0, last_index),
            location: LocationForm::new(lm),
            plugin_labels: IndexMap::new(),
            system_dropdowns: Vec::new(),
            manager_dropdowns: Vec::new(),
            summary: SummaryView::default(),
        }
    }

    /// All dropdowns of the systems page, systems first
    pub fn dropdowns(&self) -> impl Iterator<Item = &Dropdown> {
        self.system_dropdowns.iter().chain(self.manager_dropdowns.iter())
    }

    pub fn dropdown_count(&self) -> usize {
        self.system_dropdowns.len() + self.manager_dropdowns.len()
    }

    pub fn dropdown_at(&self, index: usize) -> Option<&Dropdown> {
        self.dropdowns().nth(index)
    }
}
