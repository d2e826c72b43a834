//! Wizard pages

/// Wizard step enumeration, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Location,
    Plugins,
    Systems,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Location,
        WizardStep::Plugins,
        WizardStep::Systems,
        WizardStep::Summary,
    ];

    /// Stable identifier, used in logs
    pub fn id(&self) -> &'static str {
        match self {
            WizardStep::Location => "location",
            WizardStep::Plugins => "plugins",
            WizardStep::Systems => "systems",
            WizardStep::Summary => "summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Location => "Location",
            WizardStep::Plugins => "Plugins",
            WizardStep::Systems => "Systems",
            WizardStep::Summary => "Summary",
        }
    }
}

/// Position within the ordered step list
#[derive(Debug, Clone)]
pub struct WizardState {
    pub current_step_index: usize,
    pub steps: Vec<WizardStep>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(WizardStep::ALL.to_vec())
    }
}

impl WizardState {
    /// `steps` must not be empty.
    pub fn new(steps: Vec<WizardStep>) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            current_step_index: 0,
            steps,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.steps[self.current_step_index]
    }

    /// Index of the final (summary) step
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn is_first(&self) -> bool {
        self.current_step_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_step_index == self.last_index()
    }

    pub fn get(&self, index: usize) -> Option<WizardStep> {
        self.steps.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = WizardState::default();
        assert_eq!(state.current(), WizardStep::Location);
        assert_eq!(state.last_index(), 3);
        assert!(state.is_first());
        assert!(!state.is_last());
    }

    #[test]
    fn test_get_out_of_range() {
        let state = WizardState::default();
        assert_eq!(state.get(3), Some(WizardStep::Summary));
        assert_eq!(state.get(4), None);
    }
}
