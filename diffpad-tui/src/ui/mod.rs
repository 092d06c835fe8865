mod diff_view;
mod header;
mod language;
mod pane;

pub use diff_view::LayoutCache;

use crate::app::App;
use diffpad_core::PaneSide;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use std::sync::Arc;
use tokio::time::Instant;

pub fn ui(f: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let [title, panes, results, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(45),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    header::render_title(f, title, app);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(panes);
    pane::render(f, left, app, PaneSide::Original, now);
    pane::render(f, right, app, PaneSide::Modified, now);
    app.pane_areas = [left, right];

    match app.controller.artifact().map(Arc::clone) {
        Some(file) => {
            let [summary, body] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(results);
            header::render_results(f, summary, &file, app.view_mode);
            app.diff_area = body;
            diff_view::render(f, body, &file, app);
        }
        None => {
            app.diff_area = Rect::default();
            app.diff_scroll = 0;
            app.diff_layout = None;
            header::render_empty(f, results, app);
        }
    }

    header::render_footer(f, footer);

    if app.controller.language().is_open() {
        language::render(f, f.area(), app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AppEvent;
    use diffpad_core::clipboard::UnavailableClipboard;
    use diffpad_core::config::Settings;
    use diffpad_core::ComparisonController;
    use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let mut settings = Settings::default();
        settings.ui.live_updates = false;
        let controller = ComparisonController::new(&settings).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(controller, &settings, Arc::new(UnavailableClipboard), tx), rx)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_no_diff_section_without_artifact() {
        let (mut app, _rx) = app();
        let screen = screen(&mut app);
        assert!(screen.contains("Original"));
        assert!(screen.contains("Modified"));
        assert!(screen.contains("Paste original text here"));
        assert!(!screen.contains("old_file"));
        assert_eq!(app.diff_area, Rect::default());
    }

    #[test]
    fn test_diff_section_after_submit() {
        let (mut app, _rx) = app();
        app.controller
            .edit(PaneSide::Original, |p| p.set_text("hello\nworld"));
        app.controller
            .edit(PaneSide::Modified, |p| p.set_text("hello\nworld!"));
        app.controller.submit();

        let screen = screen(&mut app);
        assert!(screen.contains("old_file.txt → new_file.txt"));
        assert!(screen.contains("@@ -1,2 +1,2 @@"));
        assert!(screen.contains("+ world!"));
        assert_ne!(app.pane_areas[0], Rect::default());
    }

    #[test]
    fn test_wheel_scroll_survives_redraw() {
        let (mut app, _rx) = app();
        let text = (1..=100).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        app.handle_paste(&text);
        screen(&mut app);
        let bottom = app.controller.original().scroll_offset();
        assert!(bottom > 0);

        let area = app.pane_areas[0];
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: area.x + area.width / 2,
            row: area.y + area.height / 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.controller.original().scroll_offset(), bottom - 3);

        screen(&mut app);
        assert_eq!(app.controller.original().scroll_offset(), bottom - 3);
        assert_eq!(app.controller.original().gutter_offset(), bottom - 3);
    }

    #[test]
    fn test_diff_layout_reused_until_inputs_change() {
        let (mut app, _rx) = app();
        app.controller
            .edit(PaneSide::Original, |p| p.set_text("short\nline"));
        app.controller.edit(PaneSide::Modified, |p| {
            p.set_text(&format!("short\n{}", "long ".repeat(40)));
        });
        app.controller.submit();

        screen(&mut app);
        let first = app.diff_layout.as_ref().unwrap().lines().as_ptr();
        screen(&mut app);
        assert_eq!(app.diff_layout.as_ref().unwrap().lines().as_ptr(), first);

        app.wrap = false;
        screen(&mut app);
        assert_ne!(app.diff_layout.as_ref().unwrap().lines().as_ptr(), first);

        app.controller.edit(PaneSide::Modified, |p| p.set_text("short\nline"));
        app.controller.submit();
        screen(&mut app);
        assert!(app.diff_layout.is_none());
    }

    #[test]
    fn test_language_popup() {
        let (mut app, _rx) = app();
        app.controller.language_mut().open();
        let screen = screen(&mut app);
        assert!(screen.contains("TypeScript"));
    }
}
