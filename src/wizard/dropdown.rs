//! Category dropdowns for the systems step

use crate::types::SelectionKind;
use crate::wizard::settings::{CategoryMap, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    /// Empty for the "not set" sentinel
    pub value: String,
    pub selected: bool,
}

/// One category row: a label plus its selectable implementations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub kind: SelectionKind,
    pub category: String,
    pub options: Vec<DropdownOption>,
}

impl Dropdown {
    pub fn build(
        kind: SelectionKind,
        category: &str,
        implementations: &[String],
        current: Option<&str>,
        not_set_label: &str,
    ) -> Self {
        let mut options = Vec::with_capacity(implementations.len() + 1);
        let mut anything_selected = false;

        for name in implementations {
            let selected = current == Some(name.as_str());
            anything_selected |= selected;
            options.push(DropdownOption {
                label: name.clone(),
                value: name.clone(),
                selected,
            });
        }

        options.insert(
            0,
            DropdownOption {
                label: not_set_label.to_string(),
                value: String::new(),
                selected: !anything_selected,
            },
        );

        Self {
            kind,
            category: category.to_string(),
            options,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.options.iter().position(|o| o.selected).unwrap_or(0)
    }

    pub fn selected(&self) -> &DropdownOption {
        &self.options[self.selected_index()]
    }

    /// Marks the option carrying `value` as selected. Returns false and
    /// leaves the selection alone when no option carries it.
    pub fn select_value(&mut self, value: &str) -> bool {
        let Some(index) = self.options.iter().position(|o| o.value == value) else {
            return false;
        };
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }
        true
    }

    /// Value of the option `step` places away from the current one, wrapping
    pub fn cycle(&self, step: isize) -> &str {
        let len = self.options.len() as isize;
        let index = (self.selected_index() as isize + step).rem_euclid(len);
        &self.options[index as usize].value
    }
}

/// Builds one dropdown per category across `sources`. A category listed by
/// several sources gets a single dropdown with the lists concatenated.
pub fn build_dropdowns(
    kind: SelectionKind,
    sources: &[&CategoryMap],
    selection: &Selection,
    not_set_label: &str,
) -> Vec<Dropdown> {
    let mut merged = CategoryMap::new();
    for source in sources {
        crate::wizard::settings::merge_categories(&mut merged, source);
    }

    merged
        .iter()
        .map(|(category, implementations)| {
            Dropdown::build(
                kind,
                category,
                implementations,
                selection.get(category).map(String::as_str),
                not_set_label,
            )
        })
        .collect()
}
