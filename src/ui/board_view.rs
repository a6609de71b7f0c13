use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use super::theme::Palette;
use crate::app::{App, Focus, Mode};
use crate::task::Task;

/// One line-group in a rendered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Row<'a> {
    Card {
        task: &'a Task,
        selected: bool,
        /// The card currently being dragged, still drawn at its origin.
        ghost: bool,
    },
    DropTarget,
}

/// Rows for one column of the active category.
///
/// While dragging, the drop target is placed by its index in the list with
/// the dragged card taken out, matching how the card mover inserts.
pub(crate) fn column_rows(app: &App, column: usize) -> Vec<Row<'_>> {
    let Some(category) = app.active_category() else {
        return Vec::new();
    };
    let Some(col) = category.columns.get(column) else {
        return Vec::new();
    };

    let session = match app.mode {
        Mode::Dragging => app.drag.session(),
        _ => None,
    };
    let Some(session) = session else {
        let board_focused = app.focus == Focus::Board && column == app.focused_column;
        return app
            .visible_tasks(column)
            .into_iter()
            .enumerate()
            .map(|(i, (_, task))| Row::Card {
                task,
                selected: board_focused && i == app.selected_card,
                ghost: false,
            })
            .collect();
    };

    let here = |slot: &crate::kanban_board::CardSlot| {
        slot.category == category.name && slot.column == col.key
    };
    let source_here = here(&session.source);
    let target_here = here(&session.target);

    let mut rows = Vec::with_capacity(col.tasks.len() + 1);
    let mut remaining = 0;
    for (i, task) in col.tasks.iter().enumerate() {
        let ghost = source_here && i == session.source.index;
        if target_here && !ghost && remaining == session.target.index {
            rows.push(Row::DropTarget);
        }
        rows.push(Row::Card {
            task,
            selected: false,
            ghost,
        });
        if !ghost {
            remaining += 1;
        }
    }
    if target_here && !rows.contains(&Row::DropTarget) {
        rows.push(Row::DropTarget);
    }
    rows
}

pub fn render_board(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(category) = app.active_category() else {
        f.render_widget(Paragraph::new("No boards."), area);
        return;
    };
    if category.columns.is_empty() {
        f.render_widget(
            Paragraph::new(format!("{} has no columns.", category.name)).style(palette.dim()),
            area,
        );
        return;
    }

    let constraints: Vec<Constraint> = category
        .columns
        .iter()
        .map(|_| Constraint::Ratio(1, category.columns.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, col) in category.columns.iter().enumerate() {
        let focused = app.focus == Focus::Board && app.focused_column == i;
        let rows = column_rows(app, i);
        let count = rows
            .iter()
            .filter(|r| matches!(r, Row::Card { ghost: false, .. }))
            .count();

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| card_item(*row, chunks[i].width.saturating_sub(4), palette))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!(" {} {} ({count}) ", col.icon.glyph(), col.title))
                .borders(Borders::ALL)
                .border_style(palette.border(focused)),
        );
        f.render_widget(list, chunks[i]);
    }
}

fn card_item<'a>(row: Row<'a>, width: u16, palette: &Palette) -> ListItem<'a> {
    let (task, selected, ghost) = match row {
        Row::DropTarget => {
            return ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    "▸ drop here",
                    Style::default()
                        .fg(palette.placeholder)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ]));
        }
        Row::Card {
            task,
            selected,
            ghost,
        } => (task, selected, ghost),
    };

    let title_style = if ghost {
        palette.dim().add_modifier(Modifier::CROSSED_OUT)
    } else if selected {
        palette.selected().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
            .fg(palette.card_title)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[#{}] ", task.id), palette.dim()),
        Span::styled(task.title.as_str(), title_style),
    ])];
    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&task.description, width as usize),
            palette.dim(),
        )));
    }
    let mut meta = Vec::new();
    if let Some(due) = task.due_label() {
        meta.push(due);
    }
    if !task.members().is_empty() {
        meta.push(format!("@{}", task.members()));
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta.join("  "), palette.dim())));
    }
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

/// Cut `s` to `max` chars, marking the cut with an ellipsis.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::app::AppOptions;
    use crate::input::Action;
    use crate::kanban_board::tests::roadmap;

    fn row_ids(rows: &[Row]) -> Vec<Option<u32>> {
        rows.iter()
            .map(|r| match r {
                Row::Card { task, .. } => Some(task.id),
                Row::DropTarget => None,
            })
            .collect()
    }

    #[test]
    fn normal_rows_mark_the_selected_card() {
        let mut app = App::new(roadmap(), AppOptions::default());
        app.apply(Action::SelectNextCard);
        let rows = column_rows(&app, 0);
        assert_eq!(row_ids(&rows), vec![Some(1), Some(2)]);
        assert!(matches!(rows[1], Row::Card { selected: true, .. }));
        assert!(column_rows(&app, 1)
            .iter()
            .all(|r| matches!(r, Row::Card { selected: false, .. })));
    }

    #[test]
    fn drop_target_skips_the_dragged_card_in_its_own_column() {
        let mut app = App::new(roadmap(), AppOptions::default());
        app.apply(Action::StartDrag);
        app.apply(Action::HoverDown);

        let rows = column_rows(&app, 0);
        // Card 1 stays as a ghost; the target sits after card 2 (index 1 of [2]).
        assert_eq!(row_ids(&rows), vec![Some(1), Some(2), None]);
        assert!(matches!(rows[0], Row::Card { ghost: true, .. }));
    }

    #[test]
    fn drop_target_in_another_column() {
        let mut app = App::new(roadmap(), AppOptions::default());
        app.apply(Action::StartDrag);
        app.apply(Action::HoverNextColumn);

        assert_eq!(row_ids(&column_rows(&app, 1)), vec![None, Some(3)]);
        assert_eq!(row_ids(&column_rows(&app, 2)), vec![]);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 8), "a longe…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn full_frame_renders_shell_and_columns() {
        let app = App::new(roadmap(), AppOptions::default());
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| crate::ui::render(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        for needle in ["Kanban Board", "Boards", "Backlog", "To Do", "In Progress", "Task 3"] {
            assert!(screen.contains(needle), "missing {needle}");
        }
    }
}
