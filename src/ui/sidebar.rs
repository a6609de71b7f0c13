use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use super::theme::Palette;
use crate::app::{App, Focus, Mode};

pub fn render_sidebar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let focused = app.focus == Focus::Sidebar && app.mode == Mode::Normal;
    let collapsed = app.sidebar.collapsed;

    let items: Vec<ListItem> = app
        .sidebar
        .order
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let icon = app
                .store
                .category(name)
                .map(|c| c.icon.glyph())
                .unwrap_or_default();
            let is_active = name == app.viewed_category();
            let is_cursor = focused && i == app.sidebar.selected;

            let mut style = Style::default().fg(palette.fg);
            if is_active {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if is_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let mut spans = vec![Span::styled(format!(" {icon} "), style)];
            if !collapsed {
                spans.push(Span::styled(name.as_str(), style));
                if app.selector.is_starred(name) {
                    spans.push(Span::styled(" ★", palette.dim()));
                }
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if collapsed { "" } else { " Boards " };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(palette.border(focused)),
    );
    f.render_widget(list, area);
}
