pub mod board_view;
pub mod help;
pub mod navbar;
pub mod sidebar;
pub mod task_detail;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::{App, Mode, NotificationLevel};

const SIDEBAR_WIDTH: u16 = 26;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 6;

/// Create a centered rect within `area` using percentage-based sizing with minimums.
pub fn centered_rect(area: Rect, w_pct: u16, h_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = (area.width * w_pct / 100).max(min_w).min(area.width);
    let height = (area.height * h_pct / 100).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Split `s` at a char index, for drawing a cursor inside text.
pub(crate) fn split_at_char(s: &str, char_idx: usize) -> (&str, &str) {
    let byte = s
        .char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(byte)
}

pub fn render(f: &mut Frame, app: &App) {
    let palette = theme::palette(app.theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    navbar::render_navbar(f, rows[0], app, &palette);

    let sidebar_width = if app.sidebar.collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(rows[1]);

    sidebar::render_sidebar(f, body[0], app, &palette);
    board_view::render_board(f, body[1], app, &palette);
    render_status_bar(f, rows[2], app, &palette);

    match &app.mode {
        Mode::Detail(detail) => {
            if let Some(task) = app.store.task(detail.task_id) {
                task_detail::render_task_detail(f, rows[1], task, detail, &palette);
            }
        }
        Mode::Menu(menu) => help::render_menu(f, rows[1], menu, &palette),
        Mode::Help => help::render_help(f, f.area(), &palette),
        _ => {}
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, palette: &theme::Palette) {
    let line = match &app.notification {
        Some(n) => {
            let style = match n.level {
                NotificationLevel::Info => Style::default().fg(palette.accent),
                NotificationLevel::Error => Style::default().fg(palette.error),
            };
            Line::from(Span::styled(n.text.as_str(), style))
        }
        None => {
            let hint = match app.mode {
                Mode::Dragging => "h/l column  j/k position  [ ] board  space drop  esc cancel",
                Mode::Search { .. } => "enter apply  esc cancel",
                Mode::Detail(_) => "tab next field  enter save  esc back",
                _ => "space drag  enter open  / search  tab sidebar  ? help  q quit",
            };
            Line::from(Span::styled(hint, palette.dim()))
        }
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_at_char_respects_multibyte() {
        assert_eq!(split_at_char("héllo", 2), ("hé", "llo"));
        assert_eq!(split_at_char("abc", 9), ("abc", ""));
    }

    #[test]
    fn centered_rect_never_exceeds_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(area, 70, 85, 50, 20);
        assert_eq!(r, area);
    }
}
