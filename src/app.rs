use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{layout::Rect, widgets::Block, widgets::Borders, DefaultTerminal, Frame};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::engine::{Catalog, Engine, EngineError, EngineEvent, LocalEngine};
use crate::i18n::Localization;
use crate::input::{map_key, Command};
use crate::types::{CreationStatus, FieldId};
use crate::ui;
use crate::ui::folder_picker::FolderPicker;
use crate::ui::wizard_ui::UiState;
use crate::wizard::{NavOutcome, Settings, WizardController, WizardStep};

/// Final result reported once the UI loop ends
#[derive(Debug, Clone)]
pub struct Created {
    pub status: CreationStatus,
    pub directory: PathBuf,
}

pub struct App {
    pub config: Config,
    pub catalog: Catalog,
    pub should_quit: bool,
    pub wizard: WizardController,
    pub ui: UiState,
    pub picker: Option<FolderPicker>,
    pub created: Option<Created>,
    path_override: Option<String>,
    engine: Arc<LocalEngine>,
    events: mpsc::UnboundedReceiver<EngineEvent>,
    folder_tx: mpsc::UnboundedSender<Result<PathBuf, EngineError>>,
    folder_rx: mpsc::UnboundedReceiver<Result<PathBuf, EngineError>>,
}

/// Settings for a fresh wizard run: catalog contents plus configured defaults
pub fn initial_settings(config: &Config, catalog: &Catalog, path_override: Option<&str>) -> Settings {
    let mut settings = catalog.clone().into_settings();
    settings.project_name = config.project.default_name.clone();
    settings.project_path = path_override
        .map(str::to_string)
        .unwrap_or_else(|| config.project.default_folder.clone());
    settings
}

impl App {
    pub fn new(
        config: Config,
        catalog: Catalog,
        lm: Localization,
        engine: Arc<LocalEngine>,
        events: mpsc::UnboundedReceiver<EngineEvent>,
        path_override: Option<&str>,
    ) -> Self {
        let settings = initial_settings(&config, &catalog, path_override);
        let wizard = WizardController::new(engine.clone(), lm, settings);
        let (folder_tx, folder_rx) = mpsc::unbounded_channel();

        Self {
            config,
            catalog,
            should_quit: false,
            wizard,
            ui: UiState::default(),
            picker: None,
            created: None,
            path_override: path_override.map(str::to_string),
            engine,
            events,
            folder_tx,
            folder_rx,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<Option<Created>> {
        while !self.should_quit {
            self.drain_events();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(std::time::Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.picker.is_some() {
                            self.handle_picker_key(key.code);
                        } else if let Some(command) = map_key(key) {
                            self.handle_command(command);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                            let size = terminal.size()?;
                            let area = Rect::new(0, 0, size.width, size.height);
                            if let Some(index) = self.tab_at(area, mouse.column, mouse.row) {
                                self.handle_command(Command::StepClick(index));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(self.created)
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        ui::wizard_ui::render(frame, area, &self.wizard, &self.ui);

        if let Some(picker) = self.picker.as_mut() {
            ui::folder_picker::render(frame, area, picker);
        }
    }

    fn tab_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if self.picker.is_some() {
            return None;
        }
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let (tabs, _, _) = ui::layout::compute_layout(inner);
        let cells = ui::layout::tab_cells(tabs, self.wizard.state().steps.len());
        ui::layout::hit_tab(&cells, x, y)
    }

    /// Applies engine notifications and finished folder picks
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_engine_event(event);
        }

        while let Ok(picked) = self.folder_rx.try_recv() {
            match picked {
                Ok(path) => self.wizard.set_path_field(path.to_string_lossy()),
                Err(err) => tracing::warn!("folder pick failed: {err}"),
            }
        }
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::WizardReset => {
                if self.config.close_on_cancel {
                    self.should_quit = true;
                } else {
                    let settings = initial_settings(&self.config, &self.catalog, self.path_override.as_deref());
                    self.wizard.reset(settings);
                    self.ui = UiState::default();
                }
            }
            EngineEvent::FolderRequested(responder) => {
                let start = PathBuf::from(&self.wizard.view().location.path);
                self.picker = Some(FolderPicker::open(&start, responder));
            }
            EngineEvent::ProjectCreated { status, directory } => {
                if status.is_success() {
                    self.created = Some(Created { status, directory });
                    self.should_quit = true;
                } else {
                    self.ui.status = Some(format!("{}. Press Ctrl-Q to quit.", status.message()));
                }
            }
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match code {
            KeyCode::Up | KeyCode::Char('k') => picker.up(),
            KeyCode::Down | KeyCode::Char('j') => picker.down(),
            KeyCode::Enter | KeyCode::Right => picker.enter_selected(),
            KeyCode::Backspace | KeyCode::Left => picker.go_parent(),
            KeyCode::Char('s') => {
                if let Some(picker) = self.picker.take() {
                    picker.confirm();
                }
            }
            KeyCode::Esc => {
                if let Some(picker) = self.picker.take() {
                    picker.cancel();
                }
            }
            _ => {}
        }
    }

    fn focus_len(&self) -> usize {
        match self.wizard.current_step() {
            WizardStep::Location => 2,
            WizardStep::Plugins => self.wizard.settings().plugins.len(),
            WizardStep::Systems => self.wizard.view().dropdown_count(),
            WizardStep::Summary => 0,
        }
    }

    fn focused_field(&self) -> FieldId {
        if self.ui.focus == 0 {
            FieldId::Name
        } else {
            FieldId::Path
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.focus_len();
        if len == 0 {
            return;
        }
        if self.wizard.current_step() == WizardStep::Location {
            self.wizard.blur_field(self.focused_field());
        }
        self.ui.focus = if forward {
            (self.ui.focus + 1) % len
        } else {
            (self.ui.focus + len - 1) % len
        };
    }

    fn after_navigation(&mut self, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Moved { to, .. } => {
                tracing::info!(step = to.id(), "showing step");
                self.ui.focus = 0;
            }
            NavOutcome::Submitted => {
                self.ui.status = Some("Creating project…".to_string());
            }
            NavOutcome::Blocked | NavOutcome::Unchanged | NavOutcome::Reset => {}
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        let step = self.wizard.current_step();
        match command {
            Command::Quit => self.should_quit = true,
            Command::Next => {
                let outcome = self.wizard.go_next();
                self.after_navigation(outcome);
            }
            Command::Back => {
                let outcome = self.wizard.go_back();
                self.after_navigation(outcome);
            }
            Command::StepClick(index) => {
                let outcome = self.wizard.handle_step_click(index);
                self.after_navigation(outcome);
            }
            Command::FocusNext => self.move_focus(true),
            Command::FocusPrev => self.move_focus(false),
            Command::Cycle(delta) => {
                if step == WizardStep::Systems {
                    self.wizard.cycle_dropdown(self.ui.focus, delta);
                }
            }
            Command::Browse => {
                if step == WizardStep::Location {
                    self.browse();
                }
            }
            Command::Input(c) => match step {
                WizardStep::Location => {
                    let field = self.focused_field();
                    self.wizard.edit_field(field).push(c);
                }
                WizardStep::Plugins if c == ' ' => {
                    let name = self
                        .wizard
                        .settings()
                        .plugins
                        .get(self.ui.focus)
                        .map(|p| p.name.clone());
                    if let Some(name) = name {
                        self.wizard.toggle_plugin(&name);
                    }
                }
                _ => {}
            },
            Command::DeleteChar => {
                if step == WizardStep::Location {
                    let field = self.focused_field();
                    self.wizard.edit_field(field).pop();
                }
            }
        }
    }

    /// Asks the engine for a folder without blocking the UI loop
    fn browse(&self) {
        let engine = Arc::clone(&self.engine);
        let tx = self.folder_tx.clone();
        tokio::spawn(async move {
            let picked = engine.pick_folder().await;
            let _ = tx.send(picked);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::builtin_catalog;

    fn app() -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(LocalEngine::new(tx, None));
        let mut config = Config::default();
        config.project.default_folder = "/home/u".into();
        App::new(config, builtin_catalog(), Localization::builtin(), engine, rx, None)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_command(Command::Input(c));
        }
    }

    #[test]
    fn test_defaults_prefill_path() {
        let app = app();
        assert_eq!(app.wizard.view().location.path, "/home/u");
        assert!(app.wizard.view().location.name.is_empty());
    }

    #[test]
    fn test_typing_and_navigation() {
        let mut app = app();
        type_text(&mut app, "demo");
        app.handle_command(Command::Next);
        assert_eq!(app.wizard.current_step(), WizardStep::Plugins);

        app.handle_command(Command::Input(' '));
        assert!(app.wizard.settings().plugins[0].enabled);
    }

    #[test]
    fn test_cancel_restarts_wizard() {
        let mut app = app();
        type_text(&mut app, "demo");
        app.handle_command(Command::Back);
        app.drain_events();
        assert!(!app.should_quit);
        assert!(app.wizard.view().location.name.is_empty());
    }

    #[test]
    fn test_cancel_keeps_cli_path() {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(LocalEngine::new(tx, None));
        let mut config = Config::default();
        config.project.default_folder = "/cfg".into();
        let mut app = App::new(config, builtin_catalog(), Localization::builtin(), engine, rx, Some("/cli"));
        assert_eq!(app.wizard.view().location.path, "/cli");

        app.handle_command(Command::Back);
        app.drain_events();
        assert!(!app.should_quit);
        assert_eq!(app.wizard.view().location.path, "/cli");
    }

    #[test]
    fn test_cancel_closes_when_configured() {
        let mut app = app();
        app.config.close_on_cancel = true;
        app.handle_command(Command::Back);
        app.drain_events();
        assert!(app.should_quit);
    }

    #[test]
    fn test_focus_wraps_on_location() {
        let mut app = app();
        app.handle_command(Command::FocusNext);
        assert_eq!(app.ui.focus, 1);
        app.handle_command(Command::FocusNext);
        assert_eq!(app.ui.focus, 0);
        // the name field was blurred while empty
        assert!(app.wizard.view().location.error(FieldId::Name).is_some());
    }

    #[test]
    fn test_successful_creation_quits() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app();
        type_text(&mut app, "demo");
        app.handle_command(Command::FocusNext);
        let path = app.wizard.edit_field(FieldId::Path);
        *path = tmp.path().to_string_lossy().to_string();

        for _ in 0..4 {
            app.handle_command(Command::Next);
        }
        app.drain_events();

        let created = app.created.as_ref().unwrap();
        assert!(created.status.is_success());
        assert!(created.directory.join("project.json").exists());
        assert!(app.should_quit);
    }
}
