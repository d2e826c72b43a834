//! Wizard UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::types::FieldId;
use crate::ui::layout::{compute_layout, tab_cells};
use crate::wizard::dropdown::Dropdown;
use crate::wizard::view::NavButtons;
use crate::wizard::{WizardController, WizardStep};

/// UI-only state that the controller does not track
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Focused row on the current page
    pub focus: usize,
    /// Last message to show in the footer
    pub status: Option<String>,
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Render the create-project wizard
pub fn render(frame: &mut Frame, area: Rect, wizard: &WizardController, ui: &UiState) {
    let block = Block::default()
        .title(" Create Project ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (tabs, body, footer) = compute_layout(inner);
    render_tabs(frame, tabs, wizard);

    match wizard.view().active {
        WizardStep::Location => render_location(frame, body, wizard, ui),
        WizardStep::Plugins => render_plugins(frame, body, wizard, ui),
        WizardStep::Systems => render_systems(frame, body, wizard, ui),
        WizardStep::Summary => render_summary(frame, body, wizard),
    }

    render_footer(frame, footer, wizard.view().nav, ui);
}

fn render_tabs(frame: &mut Frame, area: Rect, wizard: &WizardController) {
    let state = wizard.state();
    let cells = tab_cells(area, state.steps.len());

    for (i, (step, cell)) in state.steps.iter().zip(cells).enumerate() {
        let active = i == state.current_step_index;
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let tab = Paragraph::new(format!("F{} {}", i + 1, step.title()))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(tab, cell);
    }
}

fn render_location(frame: &mut Frame, area: Rect, wizard: &WizardController, ui: &UiState) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .split(area);

    let header = Paragraph::new("Where should the project be created?");
    frame.render_widget(header, chunks[0]);

    let form = &wizard.view().location;
    for (row, field) in [FieldId::Name, FieldId::Path].into_iter().enumerate() {
        let focused = ui.focus == row;
        let label = match field {
            FieldId::Name => "Project name: ",
            FieldId::Path => "Location:     ",
        };
        let cursor = if focused { "█" } else { "" };

        let mut lines = vec![Line::from(vec![
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}{}", form.value(field), cursor), focus_style(focused)),
        ])];
        match form.error(field) {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red),
            ))),
            None if field == FieldId::Path => lines.push(Line::from(Span::styled(
                "  [Ctrl-O] Browse…",
                Style::default().fg(Color::DarkGray),
            ))),
            None => {}
        }
        frame.render_widget(Paragraph::new(lines), chunks[row + 1]);
    }
}

fn render_plugins(frame: &mut Frame, area: Rect, wizard: &WizardController, ui: &UiState) {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(area);

    let header = Paragraph::new("Toggle optional plugins with Space:");
    frame.render_widget(header, chunks[0]);

    let labels = &wizard.view().plugin_labels;
    let items: Vec<ListItem> = wizard
        .settings()
        .plugins
        .iter()
        .enumerate()
        .map(|(i, plugin)| {
            let style = focus_style(i == ui.focus);
            let checkbox = if plugin.enabled { "[x] " } else { "[ ] " };
            let label = labels.get(&plugin.name).map(String::as_str).unwrap_or("");
            let label_style = if plugin.enabled {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, style),
                Span::styled(format!("{:<24}", plugin.name), style),
                Span::styled(label, label_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}

fn dropdown_line(dropdown: &Dropdown, focused: bool) -> Line<'_> {
    let style = focus_style(focused);
    let arrows = if focused { ("◂ ", " ▸") } else { ("  ", "  ") };
    Line::from(vec![
        Span::styled(format!("{:>16}  ", dropdown.category), Style::default().fg(Color::DarkGray)),
        Span::styled(arrows.0, style),
        Span::styled(dropdown.selected().label.as_str(), style),
        Span::styled(arrows.1, style),
    ])
}

fn render_systems(frame: &mut Frame, area: Rect, wizard: &WizardController, ui: &UiState) {
    let view = wizard.view();
    let mut lines = vec![
        Line::from(Span::styled("Systems", Style::default().add_modifier(Modifier::BOLD))),
    ];

    let mut index = 0;
    for dropdown in &view.system_dropdowns {
        lines.push(dropdown_line(dropdown, index == ui.focus));
        index += 1;
    }
    if view.system_dropdowns.is_empty() {
        lines.push(Line::from(Span::styled("  (none available)", Style::default().fg(Color::DarkGray))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Managers", Style::default().add_modifier(Modifier::BOLD))));
    for dropdown in &view.manager_dropdowns {
        lines.push(dropdown_line(dropdown, index == ui.focus));
        index += 1;
    }
    if view.manager_dropdowns.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (enable a plugin that provides managers)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_summary(frame: &mut Frame, area: Rect, wizard: &WizardController) {
    let summary = &wizard.view().summary;
    let key_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Name:     ", key_style), Span::raw(&summary.name)]),
        Line::from(vec![Span::styled("  Path:     ", key_style), Span::raw(&summary.path)]),
        Line::from(""),
        Line::from(Span::styled("  Plugins", Style::default().add_modifier(Modifier::BOLD))),
    ];
    lines.extend(summary.plugins.iter().map(|p| Line::from(format!("    {}", p))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Systems", Style::default().add_modifier(Modifier::BOLD))));
    lines.extend(summary.systems.iter().map(|(category, system)| {
        Line::from(vec![
            Span::styled(format!("    {:<16}", category), key_style),
            Span::raw(system.as_str()),
        ])
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(format!("  {}", summary.window_manager)));
    lines.push(Line::from(format!("  {}", summary.input_manager)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_footer(frame: &mut Frame, area: Rect, nav: NavButtons, ui: &UiState) {
    let mut spans = Vec::new();
    let button = |label: &'static str, color: Color| {
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    if nav.cancel {
        spans.push(button("[Esc] Cancel  ", Color::Yellow));
    }
    if nav.back {
        spans.push(button("[Esc] ← Back  ", Color::Yellow));
    }
    if nav.next {
        spans.push(button("[Enter] Next →  ", Color::Green));
    }
    if nav.complete {
        let color = if nav.complete_enabled { Color::Green } else { Color::DarkGray };
        spans.push(button("[Enter] Create  ", color));
    }
    if let Some(status) = &ui.status {
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::DarkGray)));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
