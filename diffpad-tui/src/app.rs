use crate::events::AppEvent;
use crate::ui::LayoutCache;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use diffpad_core::clipboard::Clipboard;
use diffpad_core::config::{Settings, ViewMode};
use diffpad_core::{ComparisonController, PaneSide};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::debug;

const WHEEL_STEP: isize = 3;
const DIFF_WHEEL_STEP: u16 = 3;
const PAGE_STEP: u16 = 10;

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// An editable pane.
    Pane(PaneSide),
    /// The language selector button.
    Language,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Pane(PaneSide::Original) => Self::Pane(PaneSide::Modified),
            Self::Pane(PaneSide::Modified) => Self::Language,
            Self::Language => Self::Pane(PaneSide::Original),
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Pane(PaneSide::Original) => Self::Language,
            Self::Pane(PaneSide::Modified) => Self::Pane(PaneSide::Original),
            Self::Language => Self::Pane(PaneSide::Modified),
        }
    }
}

/// UI state around the comparison controller.
pub struct App {
    pub controller: ComparisonController,
    pub focus: Focus,
    pub view_mode: ViewMode,
    pub wrap: bool,
    pub inline_highlight: bool,
    pub diff_scroll: u16,
    /// Diff rows laid out for the last frame.
    pub diff_layout: Option<LayoutCache>,
    pub is_running: bool,
    /// Screen areas recorded while drawing, used for mouse hit tests.
    pub pane_areas: [Rect; 2],
    pub diff_area: Rect,
    clipboard: Arc<dyn Clipboard>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        controller: ComparisonController,
        settings: &Settings,
        clipboard: Arc<dyn Clipboard>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            controller,
            focus: Focus::Pane(PaneSide::Original),
            view_mode: settings.ui.view_mode,
            wrap: settings.ui.wrap,
            inline_highlight: settings.ui.inline_highlight,
            diff_scroll: 0,
            diff_layout: None,
            is_running: true,
            pane_areas: [Rect::default(); 2],
            diff_area: Rect::default(),
            clipboard,
            events,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.controller.language().is_open() {
            self.handle_menu_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => self.is_running = false,
            KeyCode::Esc => self.is_running = false,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Enter if ctrl => self.submit(),
            KeyCode::Char('l') if ctrl => {
                let live = !self.controller.live_updates();
                self.controller.set_live_updates(live);
            }
            KeyCode::Char('k') if ctrl => {
                if let Focus::Pane(side) = self.focus {
                    self.controller.clear_pane(side, now);
                }
            }
            KeyCode::Char('y') if ctrl => {
                if let Focus::Pane(side) = self.focus {
                    self.copy(side);
                }
            }
            KeyCode::Char('o') if ctrl => self.controller.language_mut().open(),
            KeyCode::Char('v') if ctrl => {
                self.view_mode = self.view_mode.toggled();
                self.diff_scroll = 0;
            }
            KeyCode::Char('w') if ctrl => self.wrap = !self.wrap,
            KeyCode::PageUp => self.diff_scroll = self.diff_scroll.saturating_sub(PAGE_STEP),
            KeyCode::PageDown => self.diff_scroll = self.diff_scroll.saturating_add(PAGE_STEP),
            _ => match self.focus {
                Focus::Pane(side) => self.edit_pane(side, key),
                Focus::Language => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.controller.language_mut().open();
                    }
                }
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.controller.language_mut().highlight_previous(),
            KeyCode::Down => self.controller.language_mut().highlight_next(),
            KeyCode::Enter => {
                let language = self.controller.confirm_language();
                debug!(language = language.id, "language selected");
            }
            KeyCode::Esc => self.controller.language_mut().close(),
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.is_running = false;
            }
            _ => {}
        }
    }

    fn edit_pane(&mut self, side: PaneSide, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        self.controller.edit(side, |pane| match key.code {
            KeyCode::Char('t') if ctrl => pane.insert_tab(),
            KeyCode::Char(c) if !ctrl && !alt => pane.insert_char(c),
            KeyCode::Enter => pane.insert_newline(),
            KeyCode::Backspace => pane.backspace(),
            KeyCode::Delete => pane.delete(),
            KeyCode::Left => pane.move_left(),
            KeyCode::Right => pane.move_right(),
            KeyCode::Up => pane.move_up(),
            KeyCode::Down => pane.move_down(),
            KeyCode::Home if ctrl => pane.move_top(),
            KeyCode::End if ctrl => pane.move_bottom(),
            KeyCode::Home => pane.move_home(),
            KeyCode::End => pane.move_end(),
            _ => {}
        });
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Focus::Pane(side) = self.focus {
            self.controller.edit(side, |pane| pane.insert_str(text));
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let down = match mouse.kind {
            MouseEventKind::ScrollUp => false,
            MouseEventKind::ScrollDown => true,
            _ => return,
        };
        let delta = if down { WHEEL_STEP } else { -WHEEL_STEP };
        let at = Position::new(mouse.column, mouse.row);

        for (area, side) in self
            .pane_areas
            .into_iter()
            .zip([PaneSide::Original, PaneSide::Modified])
        {
            if area.contains(at) {
                self.controller.pane_mut(side).scroll_by(delta);
                return;
            }
        }
        if self.diff_area.contains(at) {
            self.diff_scroll = if down {
                self.diff_scroll.saturating_add(DIFF_WHEEL_STEP)
            } else {
                self.diff_scroll.saturating_sub(DIFF_WHEEL_STEP)
            };
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::CopyFinished { side, result } => {
                self.controller.pane_mut(side).finish_copy(result, now);
            }
        }
    }

    fn submit(&mut self) {
        if let Some(outcome) = self.controller.submit() {
            debug!(?outcome, "submitted");
            self.diff_scroll = 0;
        }
    }

    /// Starts a background clipboard write; completion arrives as
    /// [`AppEvent::CopyFinished`].
    fn copy(&mut self, side: PaneSide) {
        let Some(text) = self.controller.pane_mut(side).start_copy() else {
            return;
        };
        let clipboard = Arc::clone(&self.clipboard);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = clipboard.write_text(&text).await;
            let _ = events.send(AppEvent::CopyFinished { side, result });
        });
    }
}
