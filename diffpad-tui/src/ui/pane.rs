use crate::app::{App, Focus};
use diffpad_core::PaneSide;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tokio::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(f: &mut Frame, area: Rect, app: &mut App, side: PaneSide, now: Instant) {
    let focused = app.focus == Focus::Pane(side);
    let pane = app.controller.pane(side);

    let status = if pane.is_cleared(now) {
        Span::styled(" Cleared ", Style::default().fg(Color::Green))
    } else if pane.is_copied(now) {
        Span::styled(" Copied ", Style::default().fg(Color::Green))
    } else if pane.is_empty() {
        Span::raw(" ^K clear  ^Y copy ").dark_gray()
    } else {
        Span::raw(" ^K clear  ^Y copy ")
    };
    let counts = format!(" {} lines, {} chars ", pane.line_count(), pane.char_count());

    let block = Block::bordered()
        .title(Line::from(format!(" {} ", pane.label())).bold())
        .title_top(Line::from(status).right_aligned())
        .title_bottom(Line::from(counts).dark_gray().right_aligned())
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let gutter_width = u16::try_from(pane.line_count().to_string().len() + 1).unwrap_or(u16::MAX);
    let [gutter_area, text_area] =
        Layout::horizontal([Constraint::Length(gutter_width), Constraint::Min(1)]).areas(inner);

    app.controller
        .pane_mut(side)
        .set_viewport(usize::from(text_area.height), usize::from(text_area.width));
    let pane = app.controller.pane(side);
    let height = usize::from(text_area.height);
    let width = usize::from(text_area.width);

    let digits = usize::from(gutter_width) - 1;
    let gutter: Vec<Line> = pane
        .gutter_numbers()
        .skip(pane.gutter_offset())
        .take(height)
        .map(|n| Line::from(format!("{n:>digits$}")).dark_gray())
        .collect();
    f.render_widget(Paragraph::new(gutter), gutter_area);

    if pane.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(pane.placeholder()).dark_gray().italic()),
            text_area,
        );
    } else {
        let lines: Vec<Line> = pane
            .lines()
            .iter()
            .skip(pane.scroll_offset())
            .take(height)
            .map(|line| Line::from(visible(line, pane.column_offset(), width)))
            .collect();
        f.render_widget(Paragraph::new(lines), text_area);
    }

    if focused && !app.controller.language().is_open() {
        let (row, col) = pane.cursor();
        let line = &pane.lines()[row];
        let before: String = visible(line, pane.column_offset(), usize::MAX)
            .chars()
            .take(col.saturating_sub(pane.column_offset()))
            .collect();
        let x = u16::try_from(before.width()).unwrap_or(u16::MAX);
        let y = u16::try_from(row.saturating_sub(pane.scroll_offset())).unwrap_or(u16::MAX);
        if x < text_area.width && y < text_area.height {
            f.set_cursor_position(Position::new(text_area.x + x, text_area.y + y));
        }
    }
}

/// The part of `line` shown from character `offset` within `width` columns.
/// Tabs and carriage returns render as single spaces.
fn visible(line: &str, offset: usize, width: usize) -> String {
    let mut used = 0;
    line.chars()
        .skip(offset)
        .map(|c| if matches!(c, '\t' | '\r') { ' ' } else { c })
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
