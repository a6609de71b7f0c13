use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::{centered_rect, split_at_char};
use super::theme::Palette;
use crate::app::{DetailField, TaskDetail};
use crate::task::Task;

const LABEL_WIDTH: usize = 15;

pub fn render_task_detail(
    f: &mut Frame,
    area: Rect,
    task: &Task,
    detail: &TaskDetail,
    palette: &Palette,
) {
    let panel = centered_rect(area, 70, 85, 50, 20);
    f.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .title(Span::styled(
            format!(" #{} ", task.id),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(" esc ", palette.selected()),
            Span::styled("Back to Task List  ", palette.dim()),
            Span::styled("enter ", palette.selected()),
            Span::styled("Save ", palette.dim()),
        ]))
        .style(palette.base())
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel);
    f.render_widget(block, panel);
    if inner.height == 0 {
        return;
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(
            task.title.as_str(),
            Style::default()
                .fg(palette.fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", task.status),
            Style::default()
                .fg(palette.badge)
                .add_modifier(Modifier::REVERSED),
        ),
    ])];

    let mut meta = Vec::new();
    if !task.labels().is_empty() {
        meta.push(Span::styled(format!("⌂ {}", task.labels()), palette.dim()));
    }
    if let Some(due) = task.due_label() {
        if !meta.is_empty() {
            meta.push(Span::styled("  │  ", palette.dim()));
        }
        meta.push(Span::styled(format!("▦ {due}"), palette.dim()));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }
    lines.push(Line::from(""));

    for (i, (field, buf)) in detail.fields.iter().enumerate() {
        let focused = i == detail.focused;
        let label_style = if focused {
            palette.selected()
        } else {
            palette.dim()
        };
        let mut spans = vec![Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            label_style,
        )];
        if focused {
            let (before, after) = split_at_char(&buf.input, buf.cursor);
            spans.push(Span::raw(before.to_string()));
            spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
            spans.push(Span::raw(after.to_string()));
        } else if buf.input.is_empty() {
            spans.push(Span::styled("—", palette.dim()));
        } else {
            spans.push(Span::raw(buf.input.clone()));
        }
        lines.push(Line::from(spans));
        if *field == DetailField::Date {
            lines.push(Line::from(""));
        }
    }

    if detail.is_dirty(task) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Edits stay in this view and are discarded when it closes.",
            palette.dim().add_modifier(Modifier::ITALIC),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::ui::theme;

    #[test]
    fn detail_shows_task_fields() {
        let mut task = Task::new(6, "Task 6", "This is a description for task 6.");
        task.status = "inProgress".into();
        task.members = Some("Jane Smith".into());
        task.date = Some("2023-04-15".into());
        let detail = TaskDetail::from_task(&task);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let palette = theme::palette(crate::config::ThemeMode::Dark);
        terminal
            .draw(|f| render_task_detail(f, f.area(), &task, &detail, &palette))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();

        for needle in ["Task 6", "inProgress", "Jane Smith", "Due April 15, 2023", "Description"] {
            assert!(screen.contains(needle), "missing {needle}");
        }
    }
}
