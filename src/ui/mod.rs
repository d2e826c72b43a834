//! Terminal rendering for the wizard and its folder picker

pub mod folder_picker;
pub mod layout;
pub mod wizard_ui;
