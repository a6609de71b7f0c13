use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::split_at_char;
use super::theme::Palette;
use crate::app::{App, MenuKind, Mode};
use crate::icon::Icon;

const SEARCH_WIDTH: u16 = 34;

pub fn render_navbar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.dim());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SEARCH_WIDTH)])
        .split(inner);

    let open_menu = match &app.mode {
        Mode::Menu(menu) => Some(menu.kind),
        _ => None,
    };

    let mut spans = vec![
        Span::styled(
            format!("{} Kanban Board", Icon::Kanban.glyph()),
            Style::default()
                .fg(palette.fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for (kind, key) in [
        (MenuKind::Workspaces, 'w'),
        (MenuKind::Recent, 'r'),
        (MenuKind::Starred, 's'),
        (MenuKind::Templates, 'p'),
    ] {
        let style = if open_menu == Some(kind) {
            palette.selected()
        } else {
            Style::default().fg(palette.fg)
        };
        spans.push(Span::styled(kind.title(), style));
        spans.push(Span::styled(format!(" ({key}) ▾   "), palette.dim()));
    }
    let viewed = app.viewed_category();
    let star = if app.selector.is_starred(viewed) {
        "★"
    } else {
        "☆"
    };
    spans.push(Span::styled(
        format!("{star} {viewed}"),
        Style::default().fg(palette.accent),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    f.render_widget(Paragraph::new(search_line(app, palette)), chunks[1]);
}

fn search_line<'a>(app: &'a App, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::styled("⌕ ", palette.dim())];
    match &app.mode {
        Mode::Search { buf } => {
            let (before, after) = split_at_char(&buf.input, buf.cursor);
            spans.push(Span::styled(before, palette.selected()));
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
            spans.push(Span::styled(after, palette.selected()));
        }
        _ if app.search.is_empty() => spans.push(Span::styled("Search", palette.dim())),
        _ => spans.push(Span::styled(app.search.as_str(), Style::default().fg(palette.fg))),
    }
    spans.push(Span::styled(format!("   ◐ {}", app.theme.as_str()), palette.dim()));
    Line::from(spans)
}
