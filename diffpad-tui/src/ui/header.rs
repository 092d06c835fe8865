use crate::app::{App, Focus};
use diffpad_core::DiffFile;
use diffpad_core::config::ViewMode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Top bar: title, language button and live-update state.
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let language = format!(" {} ▾ ", app.controller.language().label());
    let button = if app.focus == Focus::Language {
        Span::styled(language, Style::default().fg(Color::Black).bg(Color::Cyan))
    } else {
        Span::styled(language, Style::default().fg(Color::Cyan)).reversed()
    };

    let live = if app.controller.live_updates() {
        Span::styled(" live ", Style::default().fg(Color::Green))
    } else if app.controller.can_submit() {
        Span::raw(" ^S compare ").yellow()
    } else {
        Span::raw(" ^S compare ").dark_gray()
    };

    let line = Line::from(vec![
        Span::raw(" diffpad ").bold(),
        Span::raw(" Language: "),
        button,
        Span::raw("  "),
        live,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Summary line above the diff body.
pub fn results_line(file: &DiffFile, view_mode: ViewMode) -> Line<'static> {
    let stats = file.stats();
    let hunks = if stats.hunks == 1 { "hunk" } else { "hunks" };
    let mode = match view_mode {
        ViewMode::Unified => "unified",
        ViewMode::Split => "split",
    };

    Line::from(vec![
        Span::raw(format!(" {} → {} ", file.old().name, file.new_side().name)).bold(),
        Span::raw(format!(" {} ", file.old().language.label)).cyan(),
        Span::raw(format!(" +{}", stats.additions)).green(),
        Span::raw(format!(" -{}", stats.deletions)).red(),
        Span::raw(format!("  {} {hunks}", stats.hunks)),
        Span::raw(format!("  [{mode}]")).dark_gray(),
    ])
}

pub fn render_results(f: &mut Frame, area: Rect, file: &DiffFile, view_mode: ViewMode) {
    f.render_widget(Paragraph::new(results_line(file, view_mode)), area);
}

/// Shown in place of the diff section while there is no artifact.
pub fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let hint = if app.controller.live_updates() {
        " Type or paste text into both panes to see the differences."
    } else {
        " Type or paste text into both panes, then press Ctrl+S to compare."
    };
    f.render_widget(Paragraph::new(Line::from(hint).dark_gray()), area);
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let keys = [
        ("Tab", "focus"),
        ("^S", "compare"),
        ("^L", "live"),
        ("^O", "language"),
        ("^V", "view"),
        ("^W", "wrap"),
        ("PgUp/PgDn", "scroll"),
        ("^Q", "quit"),
    ];
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::raw(format!(" {key} ")).bold(),
                Span::raw(format!("{action} ")).dark_gray(),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
