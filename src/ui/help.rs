use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use super::theme::Palette;
use crate::app::NavMenu;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("h/l  ←/→", "focus column"),
            ("j/k  ↓/↑", "select card"),
            ("enter", "open task detail"),
            ("space", "pick up card"),
            ("tab", "switch to sidebar"),
        ],
    ),
    (
        "Dragging",
        &[
            ("h/l", "target column"),
            ("j/k", "target position"),
            ("[ ]", "target board"),
            ("space/enter", "drop"),
            ("esc", "cancel"),
        ],
    ),
    (
        "Sidebar",
        &[
            ("j/k", "move cursor"),
            ("J/K", "reorder board"),
            ("enter", "open board"),
            ("b", "collapse sidebar"),
        ],
    ),
    (
        "Navbar",
        &[
            ("/", "search cards"),
            ("w r s p", "workspaces, recent, starred, templates"),
            ("*", "star board"),
            ("t", "toggle theme"),
            ("q", "quit"),
        ],
    ),
];

pub fn render_help(f: &mut Frame, area: Rect, palette: &Palette) {
    let panel = centered_rect(area, 60, 80, 48, 20);
    f.render_widget(Clear, panel);

    let mut lines = Vec::new();
    for (section, keys) in BINDINGS {
        lines.push(Line::from(Span::styled(
            *section,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), Style::default().fg(palette.accent)),
                Span::raw(*desc),
            ]));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(palette.base());
    f.render_widget(Paragraph::new(lines).block(block), panel);
}

/// Dropdown under the navbar for one menu.
pub fn render_menu(f: &mut Frame, area: Rect, menu: &NavMenu, palette: &Palette) {
    let width = menu
        .items
        .iter()
        .map(|i| i.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .max(menu.kind.title().len() as u16)
        + 6;
    let height = menu.items.len() as u16 + 2;
    let rect = Rect::new(
        area.x + 2,
        area.y,
        width.min(area.width.saturating_sub(2)),
        height.min(area.height),
    );
    f.render_widget(Clear, rect);

    let items: Vec<ListItem> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == menu.selected {
                palette.selected().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(Line::from(Span::styled(format!(" {name} "), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ", menu.kind.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(palette.base()),
    );
    f.render_widget(list, rect);
}
