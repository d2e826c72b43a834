use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rect of `percent_x` x `percent_y` centered inside `area`
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Splits the wizard frame into (step tabs, page body, navigation footer)
pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step tabs
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Buttons
        ])
        .split(area);

    (vertical[0], vertical[1], vertical[2])
}

/// Equal-width cells for the step tabs
pub fn tab_cells(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Index of the tab cell containing (x, y)
pub fn hit_tab(cells: &[Rect], x: u16, y: u16) -> Option<usize> {
    cells
        .iter()
        .position(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
}
