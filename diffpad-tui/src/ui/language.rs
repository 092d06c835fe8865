use crate::app::App;
use diffpad_core::language::CATALOG;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState};

const POPUP_WIDTH: u16 = 28;

/// Language menu drawn over the rest of the screen.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let height = u16::try_from(CATALOG.len() + 2).unwrap_or(u16::MAX);
    let popup = centered(area, POPUP_WIDTH, height);

    let selected = app.controller.language().selected();
    let items: Vec<ListItem> = CATALOG
        .iter()
        .map(|language| {
            let marker = if language == selected { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", language.label))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" Language ").border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(Some(app.controller.language().highlighted()));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
