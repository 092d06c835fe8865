use crate::app::App;
use diffpad_core::config::ViewMode;
use diffpad_core::diff::{DiffFile, DiffLine, LineKind, SplitCell, SplitRow, UnifiedLine};
use diffpad_core::highlight::{SpanStyle, Theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::ops::Range;
use std::sync::Arc;
use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = " │ ";
const SEPARATOR_WIDTH: usize = 3;

/// Rendering options for the diff body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub width: usize,
    pub wrap: bool,
    pub inline_highlight: bool,
}

/// Laid-out diff rows, kept until the artifact or the layout changes.
pub struct LayoutCache {
    file: Arc<DiffFile>,
    mode: ViewMode,
    options: DiffOptions,
    lines: Vec<Line<'static>>,
}

impl LayoutCache {
    fn build(file: &Arc<DiffFile>, mode: ViewMode, options: DiffOptions) -> Self {
        let lines = match mode {
            ViewMode::Unified => unified_lines(file, options),
            ViewMode::Split => split_lines(file, options),
        };
        Self {
            file: Arc::clone(file),
            mode,
            options,
            lines,
        }
    }

    fn is_for(&self, file: &Arc<DiffFile>, mode: ViewMode, options: DiffOptions) -> bool {
        Arc::ptr_eq(&self.file, file) && self.mode == mode && self.options == options
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }
}

/// Draws the visible window of the diff body, laying it out only when the
/// cached rows are stale.
pub fn render(f: &mut Frame, area: Rect, file: &Arc<DiffFile>, app: &mut App) {
    let options = DiffOptions {
        width: usize::from(area.width),
        wrap: app.wrap,
        inline_highlight: app.inline_highlight,
    };
    let mode = app.view_mode;
    if app
        .diff_layout
        .as_ref()
        .is_none_or(|cache| !cache.is_for(file, mode, options))
    {
        app.diff_layout = Some(LayoutCache::build(file, mode, options));
    }
    let lines = app.diff_layout.as_ref().map_or(&[][..], LayoutCache::lines);

    let height = usize::from(area.height);
    let max_scroll = lines.len().saturating_sub(height);
    app.diff_scroll = app
        .diff_scroll
        .min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    let visible: Vec<Line> = lines
        .iter()
        .skip(usize::from(app.diff_scroll))
        .take(height)
        .cloned()
        .collect();
    f.render_widget(Paragraph::new(visible), area);
}

pub fn unified_lines(file: &DiffFile, options: DiffOptions) -> Vec<Line<'static>> {
    let palette = Palette::for_theme(file.theme());
    let number_width = line_number_width(file);
    let mut out = Vec::new();

    for row in file.unified_lines() {
        match row {
            UnifiedLine::HunkHeader(header) => out.push(hunk_header(header)),
            UnifiedLine::Line { line, inline } => {
                let bg = palette.line_bg(line.kind);
                let gutter = format!(
                    "{:>w$} {:>w$} ",
                    number(line.old_number),
                    number(line.new_number),
                    w = number_width
                );
                let prefix = vec![
                    Span::styled(gutter, apply_bg(style_gutter(), bg)),
                    Span::styled(format!("{} ", sign(line.kind)), apply_bg(sign_style(line.kind), bg)),
                ];
                let content = content_spans(file, line, inline, options.inline_highlight, &palette);
                out.extend(layout_row(prefix, content, options.width, options.wrap, bg));
            }
        }
    }

    out
}

pub fn split_lines(file: &DiffFile, options: DiffOptions) -> Vec<Line<'static>> {
    let palette = Palette::for_theme(file.theme());
    let number_width = line_number_width(file);
    let column = options.width.saturating_sub(SEPARATOR_WIDTH) / 2;
    let mut out = Vec::new();

    for row in file.split_rows() {
        match row {
            SplitRow::HunkHeader(header) => out.push(hunk_header(header)),
            SplitRow::Pair { left, right } => {
                let render_cell = |cell: Option<&SplitCell>, old: bool| match cell {
                    Some(cell) => {
                        let bg = palette.line_bg(cell.line.kind);
                        let n = if old { cell.line.old_number } else { cell.line.new_number };
                        let prefix = vec![
                            Span::styled(
                                format!("{:>w$} ", number(n), w = number_width),
                                apply_bg(style_gutter(), bg),
                            ),
                            Span::styled(
                                format!("{} ", sign(cell.line.kind)),
                                apply_bg(sign_style(cell.line.kind), bg),
                            ),
                        ];
                        let content = content_spans(
                            file,
                            &cell.line,
                            &cell.inline,
                            options.inline_highlight,
                            &palette,
                        );
                        layout_row(prefix, content, column, options.wrap, bg)
                    }
                    None => vec![blank_line(column)],
                };

                let left = render_cell(left.as_ref(), true);
                let right = render_cell(right.as_ref(), false);
                for idx in 0..left.len().max(right.len()) {
                    let mut spans = left
                        .get(idx)
                        .cloned()
                        .unwrap_or_else(|| blank_line(column))
                        .spans;
                    spans.push(Span::styled(SEPARATOR, style_gutter()));
                    spans.extend(
                        right
                            .get(idx)
                            .cloned()
                            .unwrap_or_else(|| blank_line(column))
                            .spans,
                    );
                    out.push(Line::from(spans));
                }
            }
        }
    }

    out
}

/// Syntax-coloured fragments of a line, with changed words emphasised.
fn content_spans(
    file: &DiffFile,
    line: &DiffLine,
    inline: &[Range<usize>],
    inline_highlight: bool,
    palette: &Palette,
) -> Vec<Span<'static>> {
    let base: Vec<Span<'static>> = match file.highlighted(line) {
        Some(spans) => spans
            .iter()
            .map(|s| Span::styled(s.text.clone(), to_style(s.style)))
            .collect(),
        None => vec![Span::raw(line.content.clone())],
    };

    let spans = if inline_highlight && !inline.is_empty() {
        emphasise(base, inline, palette.emphasis(line.kind))
    } else {
        base
    };

    spans
        .into_iter()
        .map(|s| {
            let text = s.content.replace('\t', " ").replace('\r', "");
            let style = if s.style.bg.is_some() {
                s.style
            } else {
                apply_bg(s.style, palette.line_bg(line.kind))
            };
            Span::styled(text, style)
        })
        .collect()
}

/// Splits spans at range boundaries and patches `emphasis` onto the parts
/// inside `ranges`. Ranges are byte offsets into the concatenated text.
fn emphasise(spans: Vec<Span<'static>>, ranges: &[Range<usize>], emphasis: Style) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len() + ranges.len() * 2);
    let mut offset = 0;

    for span in spans {
        let text = span.content.as_ref();
        let (start, end) = (offset, offset + text.len());
        offset = end;

        let mut cuts: Vec<usize> = ranges
            .iter()
            .flat_map(|r| [r.start, r.end])
            .filter(|p| *p > start && *p < end && text.is_char_boundary(*p - start))
            .collect();
        cuts.push(end);
        cuts.sort_unstable();
        cuts.dedup();

        let mut from = start;
        for cut in cuts {
            let piece = &text[from - start..cut - start];
            if !piece.is_empty() {
                let inside = ranges.iter().any(|r| r.start <= from && from < r.end);
                let style = if inside { span.style.patch(emphasis) } else { span.style };
                out.push(Span::styled(piece.to_string(), style));
            }
            from = cut;
        }
    }

    out
}

/// Lays out prefix + content in `width` columns, wrapping or truncating,
/// and pads each row so the background spans the full width.
fn layout_row(
    prefix: Vec<Span<'static>>,
    content: Vec<Span<'static>>,
    width: usize,
    wrap: bool,
    bg: Option<Color>,
) -> Vec<Line<'static>> {
    let prefix_width: usize = prefix.iter().map(Span::width).sum();
    let available = width.saturating_sub(prefix_width).max(1);

    let mut rows = wrap_spans(content, available);
    if !wrap {
        rows.truncate(1);
    }

    let indent: Vec<Span<'static>> = prefix
        .iter()
        .map(|s| Span::styled(" ".repeat(s.width()), s.style))
        .collect();

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut spans = if idx == 0 { prefix.clone() } else { indent.clone() };
            spans.extend(row);
            pad_line(Line::from(spans), width, bg)
        })
        .collect()
}

/// Breaks spans into rows of at most `width` display columns.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        let mut buf = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !buf.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut buf), span.style));
                }
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            buf.push(c);
            used += w;
        }
        if !buf.is_empty() {
            current.push(Span::styled(buf, span.style));
        }
    }
    rows.push(current);
    rows
}

fn pad_line(mut line: Line<'static>, width: usize, bg: Option<Color>) -> Line<'static> {
    let current = line.width();
    if current < width {
        line.spans
            .push(Span::styled(" ".repeat(width - current), apply_bg(Style::default(), bg)));
    }
    line
}

fn blank_line(width: usize) -> Line<'static> {
    Line::from(Span::raw(" ".repeat(width)))
}

fn hunk_header(header: &str) -> Line<'static> {
    Line::from(Span::styled(
        header.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
    ))
}

fn line_number_width(file: &DiffFile) -> usize {
    let max = file
        .hunks()
        .last()
        .map_or(0, |h| (h.old_start + h.old_len).max(h.new_start + h.new_len));
    max.to_string().len()
}

fn number(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

const fn sign(kind: LineKind) -> char {
    match kind {
        LineKind::Insert => '+',
        LineKind::Delete => '-',
        LineKind::Context => ' ',
    }
}

fn to_style(style: SpanStyle) -> Style {
    let mut out = Style::default();
    if let Some(fg) = style.fg {
        out = out.fg(Color::Rgb(fg.0, fg.1, fg.2));
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

fn style_gutter() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn sign_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Insert => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        LineKind::Delete => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LineKind::Context => Style::default(),
    }
}

fn apply_bg(style: Style, bg: Option<Color>) -> Style {
    match bg {
        Some(color) => style.bg(color),
        None => style,
    }
}

/// Background tints for changed lines and words.
struct Palette {
    insert: Color,
    delete: Color,
    insert_word: Color,
    delete_word: Color,
}

impl Palette {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                insert: Color::Rgb(0x1d, 0x3b, 0x27),
                delete: Color::Rgb(0x4b, 0x1d, 0x1d),
                insert_word: Color::Rgb(0x2e, 0x6b, 0x3e),
                delete_word: Color::Rgb(0x8b, 0x2d, 0x2d),
            },
            Theme::Light => Self {
                insert: Color::Rgb(0xe6, 0xff, 0xec),
                delete: Color::Rgb(0xff, 0xeb, 0xe9),
                insert_word: Color::Rgb(0xab, 0xf2, 0xbc),
                delete_word: Color::Rgb(0xff, 0xc0, 0xc0),
            },
        }
    }

    const fn line_bg(&self, kind: LineKind) -> Option<Color> {
        match kind {
            LineKind::Insert => Some(self.insert),
            LineKind::Delete => Some(self.delete),
            LineKind::Context => None,
        }
    }

    fn emphasis(&self, kind: LineKind) -> Style {
        let bg = match kind {
            LineKind::Insert => self.insert_word,
            LineKind::Delete => self.delete_word,
            LineKind::Context => return Style::default(),
        };
        Style::default().bg(bg).add_modifier(Modifier::BOLD)
    }
}
