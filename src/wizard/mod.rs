//! Create-project wizard: steps, settings and the controller driving them

pub mod controller;
pub mod dropdown;
pub mod form;
pub mod settings;
pub mod step;
pub mod view;

pub use controller::{NavOutcome, WizardController};
pub use settings::{CategoryMap, Plugin, PluginDetails, Selection, Settings};
pub use step::{WizardState, WizardStep};
