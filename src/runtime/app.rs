use anyhow::{Context, Result};
use crossterm::event;

use strand::cli::StartupConfig;
use strand::config::EditorConfig;
use strand::input::route;
use strand::keymap::{input_from_crossterm, InputEvent, KeyBindingTable};
use strand::model::{AppModel, Clipboard};
use strand::view;

use super::terminal::Tui;

pub struct App {
    model: AppModel,
}

impl App {
    pub fn new(startup: StartupConfig, cols: u16, rows: u16) -> Self {
        let mut model = if startup.use_config {
            AppModel::new(cols, rows, startup.files)
        } else {
            tracing::info!("Starting without config and keymap files");
            let mut model = AppModel::from_parts(
                EditorConfig::default(),
                KeyBindingTable::with_defaults(),
                Clipboard::new(),
                cols,
                rows,
            );
            model.open_initial_files(startup.files);
            model
        };

        // Apply initial cursor position if specified (--line/--column)
        if let Some((line, column)) = startup.initial_position {
            if let Some((document, editor)) = model.current_parts() {
                editor.set_cursor(document, line, column);
            }
            model.ensure_cursor_visible();
        }

        Self { model }
    }

    /// Draw, read one event, route it; until a handler asks to quit
    pub fn run(mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            terminal
                .draw(|frame| view::render(frame, &self.model))
                .context("Failed to draw frame")?;

            let raw = event::read().context("Failed to read terminal event")?;
            let Some(input) = input_from_crossterm(&raw) else {
                continue;
            };

            if !matches!(input, InputEvent::Resize(..)) {
                let size = terminal.size().context("Failed to read terminal size")?;
                self.model.screen = (size.width, size.height);
            }

            if route(&mut self.model, &input).is_some_and(|cmd| cmd.is_quit()) {
                tracing::info!("Quit requested");
                return Ok(());
            }
        }
    }
}
