use ratatui::{
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    style::{Style, Modifier, Color},
    Frame,
    prelude::Rect,
};
use std::path::{Path, PathBuf};
use std::fs;
use tokio::sync::oneshot;

use crate::ui::layout::centered;

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
}

/// Directory-only browser answering a pending folder request
#[derive(Debug)]
pub struct FolderPicker {
    pub current_dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub list_state: ListState,
    responder: Option<oneshot::Sender<PathBuf>>,
}

impl FolderPicker {
    pub fn open(start: &Path, responder: oneshot::Sender<PathBuf>) -> Self {
        let current_dir = if start.is_dir() {
            start.to_path_buf()
        } else {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        };
        let mut s = Self {
            current_dir,
            entries: Vec::new(),
            list_state: ListState::default(),
            responder: Some(responder),
        };
        s.load_directory();
        s
    }

    pub fn load_directory(&mut self) {
        self.entries.clear();
        self.list_state.select(None);

        // ".." entry for parent directory (if not root)
        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(DirEntry {
                path: parent.to_path_buf(),
                name: "..".to_string(),
            });
        }

        let mut dirs: Vec<DirEntry> = match fs::read_dir(&self.current_dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .filter_map(|path| {
                    let name = path.file_name()?.to_string_lossy().to_string();
                    if name.starts_with('.') {
                        return None;
                    }
                    Some(DirEntry { path, name })
                })
                .collect(),
            Err(err) => {
                tracing::warn!(path = %self.current_dir.display(), "cannot list directory: {err}");
                Vec::new()
            }
        };
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        self.entries.extend(dirs);

        if !self.entries.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn enter_selected(&mut self) {
        let target = self
            .list_state
            .selected()
            .and_then(|i| self.entries.get(i))
            .map(|e| e.path.clone());
        if let Some(path) = target {
            self.current_dir = path;
            self.load_directory();
        }
    }

    pub fn go_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_directory();
        }
    }

    /// Answers the request with the directory being shown
    pub fn confirm(mut self) -> PathBuf {
        let chosen = self.current_dir.clone();
        if let Some(responder) = self.responder.take() {
            if responder.send(chosen.clone()).is_err() {
                tracing::warn!("folder request was abandoned before it was answered");
            }
        }
        chosen
    }

    /// Drops the responder, which the requester sees as a cancel
    pub fn cancel(mut self) {
        self.responder.take();
    }
}

pub fn render(f: &mut Frame, area: Rect, picker: &mut FolderPicker) {
    use ratatui::layout::{Layout, Direction, Constraint};

    let popup = centered(area, 60, 70);
    f.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(popup);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let icon = if entry.name == ".." { "↩ " } else { "▸ " };
            ListItem::new(format!("{}{}", icon, entry.name))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", picker.current_dir.display()))
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, chunks[0], &mut picker.list_state);

    let hint = Paragraph::new("[Enter] Open  [Backspace] Up  [s] Select this folder  [Esc] Cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_visible_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("beta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::create_dir(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join("file.txt"), "x").unwrap();

        let (tx, _rx) = oneshot::channel();
        let picker = FolderPicker::open(tmp.path(), tx);
        let names: Vec<_> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "alpha", "beta"]);
    }

    #[test]
    fn test_confirm_answers_request() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("games")).unwrap();

        let (tx, mut rx) = oneshot::channel();
        let mut picker = FolderPicker::open(tmp.path(), tx);
        picker.down();
        picker.enter_selected();
        let chosen = picker.confirm();
        assert!(chosen.ends_with("games"));
        assert_eq!(rx.try_recv().unwrap(), chosen);
    }

    #[test]
    fn test_cancel_drops_responder() {
        let tmp = tempfile::tempdir().unwrap();
        let (tx, mut rx) = oneshot::channel();
        FolderPicker::open(tmp.path(), tx).cancel();
        assert!(rx.try_recv().is_err());
    }
}
