//! Rendering for the interactive interface

use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, ConfirmAction, FormField, Mode, Pane, SidebarEntry, TaskForm};
use crate::domain::{FilterKey, Task};

/// Draw the full layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22), // Sidebar
            Constraint::Percentage(43), // Tasks
            Constraint::Percentage(35), // Details
        ])
        .split(main_chunks[0]);

    draw_sidebar(frame, app, content_chunks[0]);
    draw_tasks(frame, app, content_chunks[1]);
    draw_details(frame, app, content_chunks[2]);
    draw_status_bar(frame, app, main_chunks[1]);

    if let Mode::NewTask(form) = app.mode() {
        draw_task_form(frame, form, area);
    }
}

/// Draw the sidebar: built-in filters, then projects
fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane() == Pane::Sidebar;
    let entries = app.sidebar_entries();

    // Section headers are not selectable, so the selected row index shifts
    // past each header that precedes it.
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected = None;
    let mut projects_started = false;

    items.push(section_header("Filters"));
    for (index, entry) in entries.iter().enumerate() {
        if !projects_started && matches!(entry, SidebarEntry::Project(_)) {
            items.push(section_header("Projects"));
            projects_started = true;
        }

        if index == app.sidebar_index() {
            selected = Some(items.len());
        }

        let label = match entry {
            SidebarEntry::Filter(key) => {
                let marker = if key == app.active_filter() { "*" } else { " " };
                format!("{} {}", marker, filter_label(key))
            }
            SidebarEntry::Project(project) => {
                let active = matches!(
                    app.active_filter(),
                    FilterKey::Project(name) if *name == project.name
                );
                let marker = if active { "*" } else { " " };
                format!(
                    "{} {} ({})",
                    marker,
                    truncate(&project.name, 14),
                    app.project_task_count(&project.name)
                )
            }
        };
        items.push(ListItem::new(format!("  {}", label)));
    }

    let block_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title("Views")
                .borders(Borders::ALL)
                .border_style(block_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the task list for the active filter
fn draw_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane() == Pane::Tasks;
    let today = Local::now().date_naive();

    let items: Vec<ListItem> = app
        .visible_tasks()
        .iter()
        .map(|task| task_row(task, today))
        .collect();

    let title = format!(
        "Tasks: {} ({})",
        filter_label(app.active_filter()),
        app.visible_tasks().len()
    );

    let block_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(block_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.visible_tasks().is_empty() {
        state.select(Some(app.task_index()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn task_row(task: &Task, today: chrono::NaiveDate) -> ListItem<'static> {
    let indicator = if task.complete { "[x]" } else { "[ ]" };
    let content = format!(
        "{} {:<32} {}",
        indicator,
        truncate(&task.title, 32),
        task.due
    );

    let style = if task.complete {
        Style::default().fg(Color::DarkGray)
    } else if task.due < today {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    ListItem::new(content).style(style)
}

/// Draw the details panel for the selected task
fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_task() {
        Some(task) => {
            let today = Local::now().date_naive();
            let overdue = if !task.complete && task.due < today {
                " (overdue)"
            } else {
                ""
            };
            let status = if task.complete { "done" } else { "open" };

            let lines = vec![
                format!("Task: {}", task.title),
                format!("Project: {}", task.project),
                format!("Priority: {}", task.priority),
                format!("Due: {}{}", task.due, overdue),
                format!("Status: {}", status),
                String::new(),
                task.description.clone(),
            ];

            lines.join("\n")
        }
        None => "No task selected".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.mode() {
        Mode::Normal => {
            let text = match app.message() {
                Some(message) => message.to_string(),
                None => {
                    "[j/k]move [tab]pane [enter]apply/toggle [n]ew [x]delete [q]uit [?]help"
                        .to_string()
                }
            };
            (text, Style::default())
        }
        Mode::Confirm(ConfirmAction::DeleteTask(id)) => (
            format!("Delete task {}? [y/n]", id),
            Style::default().fg(Color::Yellow),
        ),
        Mode::Confirm(ConfirmAction::DeleteProject(id)) => (
            format!("Delete project {} and reassign its tasks? [y/n]", id),
            Style::default().fg(Color::Yellow),
        ),
        Mode::NewTask(_) => (
            "[enter]save [tab]field [esc]cancel".to_string(),
            Style::default().fg(Color::Green),
        ),
    };

    let status_text = format!("tick  {}", content);

    let paragraph = Paragraph::new(status_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw the new-task form as a centered modal
fn draw_task_form(frame: &mut Frame, form: &TaskForm, area: Rect) {
    let modal = centered_rect(46, 9, area);

    let title_marker = if form.field == FormField::Title { ">" } else { " " };
    let due_marker = if form.field == FormField::Due { ">" } else { " " };

    let due_text = if form.due.is_empty() {
        Span::styled("YYYY-MM-DD", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.due.clone())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} Title: ", title_marker)),
            Span::raw(form.title.clone()),
        ]),
        Line::from(vec![Span::raw(format!("{} Due:   ", due_marker)), due_text]),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::styled(
            format!("! {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    lines.push(Line::styled(
        "enter save / esc cancel",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("New Task").borders(Borders::ALL));

    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}

/// Human-readable label for a filter
fn filter_label(key: &FilterKey) -> String {
    match key {
        FilterKey::All => "All".to_string(),
        FilterKey::Today => "Today".to_string(),
        FilterKey::Upcoming => "Upcoming".to_string(),
        FilterKey::Overdue => "Overdue".to_string(),
        FilterKey::Priority(priority) => priority.to_string(),
        FilterKey::Project(name) => name.clone(),
    }
}

fn section_header(title: &str) -> ListItem<'static> {
    ListItem::new(title.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

/// Truncate a string to max_len characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Centered rectangle of at most the given size
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn filter_labels_are_capitalized() {
        assert_eq!(filter_label(&FilterKey::All), "All");
        assert_eq!(filter_label(&FilterKey::Priority(Priority::High)), "High");
        assert_eq!(
            filter_label(&FilterKey::Project("Work".to_string())),
            "Work"
        );
    }

    #[test]
    fn centered_rect_fits_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let modal = centered_rect(46, 9, area);

        assert_eq!(modal.width, 46);
        assert_eq!(modal.height, 9);
        assert_eq!(modal.x, 27);
        assert_eq!(modal.y, 15);
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let modal = centered_rect(46, 9, area);

        assert_eq!(modal.width, 20);
        assert_eq!(modal.height, 5);
    }
}
