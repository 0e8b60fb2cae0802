use crate::grid::{GRID_COLS, GRID_ROWS};
use crate::model::{Event, EventKind, Priority, Status};
use crate::tui::editor::{EditorState, Field};
use crate::tui::state::{AppState, Focus, InputMode, SidebarRow, View};
use chrono::{Datelike, Local, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_toolbar(f, state, v_chunks[0]);

    let main_area = if state.sidebar_open {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(v_chunks[1]);
        state.sidebar_area = Some(h_chunks[1]);
        draw_sidebar(f, state, h_chunks[1]);
        h_chunks[0]
    } else {
        state.sidebar_area = None;
        v_chunks[1]
    };

    // Hit boxes are rebuilt from scratch on every draw; the mapper and the
    // pointer handlers only ever see this frame's geometry.
    state.event_hits.clear();
    state.card_hits.clear();
    state.column_areas.clear();

    match state.view {
        View::Calendar => draw_calendar(f, state, main_area),
        View::Board => draw_board(f, state, main_area),
    }

    draw_footer(f, state, v_chunks[2]);

    if state.editor.is_some() {
        draw_editor(f, state, f.area());
    }
}

/// Integer column edges matching the mapper's floating-point cell math:
/// an integer coordinate px lies in cell c iff `edge(c) <= px < edge(c+1)`.
fn edge(origin: u16, total: u16, index: u32, slots: u32) -> u16 {
    origin + ((index as f64) * (total as f64) / (slots as f64)).ceil() as u16
}

fn draw_toolbar(f: &mut Frame, state: &AppState, area: Rect) {
    let active = if state.filters.is_active() {
        Span::styled(" [Active]", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };
    let view_label = match state.view {
        View::Calendar => "Calendar",
        View::Board => "Board",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", state.month_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("| [: Prev  t: Today  ]: Next | f: Filters"),
        active,
        Span::raw(format!(" | View: {view_label}")),
    ]);
    let toolbar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(toolbar, area);
}

fn day_cell_style(date: NaiveDate, state: &AppState) -> Style {
    let today = Local::now().date_naive();
    let in_month = date.month() == state.month.month() && date.year() == state.month.year();
    let mut style = if in_month {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if date == today {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    // The cursor highlight is the grid's native selection visual; it is
    // hidden while a drag session runs so the preview is the only artifact.
    if date == state.cursor
        && state.focus == Focus::Main
        && !state.drag.is_selecting()
        && state.committed_preview.is_none()
    {
        style = style.bg(Color::Blue);
    }
    style
}

fn priority_glyph(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "^",
        Priority::Medium => "-",
        Priority::Low => "v",
    }
}

fn event_style(event: &Event) -> Style {
    if event.is_preview() {
        return Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED);
    }
    if event.kind == EventKind::Event {
        return Style::default().fg(Color::Yellow);
    }
    match event.status {
        Status::Todo => Style::default().fg(Color::Gray),
        Status::InProgress => Style::default().fg(Color::Blue),
        Status::Review => Style::default().fg(Color::Magenta),
        Status::Completed => Style::default().fg(Color::Green),
    }
}

fn draw_calendar(f: &mut Frame, state: &mut AppState, area: Rect) {
    // The toolbar already names the month; the grid block stays untitled.
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 || inner.width < GRID_COLS as u16 {
        state.grid_area = None;
        return;
    }

    let header = Rect { height: 1, ..inner };
    let grid_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    state.grid_area = Some(grid_area);

    for (c, name) in WEEKDAYS.iter().enumerate() {
        let x0 = edge(grid_area.x, grid_area.width, c as u32, GRID_COLS);
        let x1 = edge(grid_area.x, grid_area.width, c as u32 + 1, GRID_COLS);
        let cell = Rect {
            x: x0,
            y: header.y,
            width: x1.saturating_sub(x0),
            height: 1,
        };
        let label = Paragraph::new(*name)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(label, cell);
    }

    let now = state.now();
    let visible = state.visible(now);

    for row in 0..GRID_ROWS {
        let y0 = edge(grid_area.y, grid_area.height, row, GRID_ROWS);
        let y1 = edge(grid_area.y, grid_area.height, row + 1, GRID_ROWS);
        for col in 0..GRID_COLS {
            let x0 = edge(grid_area.x, grid_area.width, col, GRID_COLS);
            let x1 = edge(grid_area.x, grid_area.width, col + 1, GRID_COLS);
            let cell = Rect {
                x: x0,
                y: y0,
                width: x1.saturating_sub(x0),
                height: y1.saturating_sub(y0),
            };
            if cell.width == 0 || cell.height == 0 {
                continue;
            }
            let date = crate::grid::date_of_cell(state.month, row * GRID_COLS + col);

            let day_line = Rect { height: 1, ..cell };
            let day = Paragraph::new(format!("{:>2}", date.day()))
                .style(day_cell_style(date, state));
            f.render_widget(day, day_line);

            let here: Vec<&Event> = visible
                .iter()
                .filter(|e| e.start.date() <= date && date <= e.end.date())
                .collect();
            let slots = (cell.height - 1) as usize;
            let shown = if here.len() > slots && slots > 0 {
                slots - 1
            } else {
                here.len().min(slots)
            };

            for (i, event) in here.iter().copied().take(shown).enumerate() {
                let line_rect = Rect {
                    x: cell.x,
                    y: cell.y + 1 + i as u16,
                    width: cell.width,
                    height: 1,
                };
                let text = if event.kind == EventKind::Task && !event.is_preview() {
                    format!("{}{}", priority_glyph(event.priority), event.title)
                } else {
                    event.title.clone()
                };
                let item = Paragraph::new(truncate(&text, cell.width as usize))
                    .style(event_style(event));
                f.render_widget(item, line_rect);
                if !event.is_preview() {
                    state.event_hits.push((line_rect, event.id));
                }
            }
            if here.len() > shown && slots > 0 {
                let more_rect = Rect {
                    x: cell.x,
                    y: cell.y + cell.height - 1,
                    width: cell.width,
                    height: 1,
                };
                let more = Paragraph::new(format!("+{} more", here.len() - shown))
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(more, more_rect);
            }
        }
    }
}

fn draw_board(f: &mut Frame, state: &mut AppState, area: Rect) {
    state.grid_area = None;
    let now = state.now();
    let columns = state.board_columns(now);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, (status, events)) in columns.iter().enumerate() {
        let col_area = chunks[i];
        state.column_areas.push((col_area, *status));

        let selected_col = state.focus == Focus::Main && state.board_col == i;
        let border_style = if selected_col {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", status.column_title(), events.len()))
            .border_style(border_style);
        let inner = block.inner(col_area);
        f.render_widget(block, col_area);

        if events.is_empty() {
            let empty = Paragraph::new("No tasks")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            continue;
        }

        let card_height = 3u16;
        let mut y = inner.y;
        for (row, event) in events.iter().enumerate() {
            if y + card_height > inner.y + inner.height {
                break;
            }
            let card = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: card_height,
            };
            let selected = selected_col && state.board_row == row;
            let dragging = state.board_drag == Some(event.id);
            let mut style = event_style(event);
            if selected {
                style = style.add_modifier(Modifier::BOLD).bg(Color::DarkGray);
            }
            if dragging {
                style = style.add_modifier(Modifier::DIM);
            }

            let span = if event.start.date() == event.end.date() {
                event.start.format("%b %-d").to_string()
            } else {
                format!(
                    "{} -> {}",
                    event.start.format("%b %-d"),
                    event.end.format("%b %-d")
                )
            };
            let text = vec![
                Line::from(truncate(
                    &format!("{} {}", priority_glyph(event.priority), event.title),
                    inner.width as usize,
                )),
                Line::from(Span::styled(span, Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(
                    truncate(&event.description, inner.width as usize),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(text).style(style), card);
            state.card_hits.push((card, event.id));
            y += card_height;
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn radio(selected: bool) -> &'static str {
    if selected { "(*)" } else { "( )" }
}

fn draw_sidebar(f: &mut Frame, state: &mut AppState, area: Rect) {
    let focus_style = if state.focus == Focus::Sidebar {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .border_style(focus_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let now = state.now();
    let shown = state.visible(now).len();
    let total = state.store.len();
    let rows = state.sidebar_rows();

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 2);
    for (i, row) in rows.iter().enumerate() {
        let text = match row {
            SidebarRow::Search => {
                if state.mode == InputMode::Searching {
                    format!("Search: {}_", state.filters.search)
                } else {
                    format!("Search: {}", state.filters.search)
                }
            }
            SidebarRow::Kind(k) => {
                format!("{} Type: {}", radio(state.filters.kind == *k), k.label())
            }
            SidebarRow::Priority(p) => format!(
                "{} {} priority",
                checkbox(state.filters.priority.contains(p)),
                p.label()
            ),
            SidebarRow::Status(s) => {
                format!("{} {}", checkbox(state.filters.status.contains(s)), s.label())
            }
            SidebarRow::Timeframe(v) => {
                let label = crate::model::TIMEFRAME_OPTIONS
                    .iter()
                    .find(|o| o.value == *v)
                    .map(|o| o.label)
                    .unwrap_or(*v);
                format!(
                    "{} {}",
                    checkbox(state.filters.timeframe.iter().any(|t| t == v)),
                    label
                )
            }
            SidebarRow::Clear => "Clear All Filters".to_string(),
        };
        let mut style = Style::default();
        if state.focus == Focus::Sidebar && state.sidebar_index == i {
            style = style.add_modifier(Modifier::BOLD).bg(Color::DarkGray);
        }
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Showing {shown} of {total}"),
        Style::default().fg(Color::Cyan),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    match state.mode {
        InputMode::Searching => {
            let input = Paragraph::new(format!("/ {}", state.filters.search))
                .style(Style::default().fg(Color::Green))
                .block(Block::default().borders(Borders::ALL).title(" Search "));
            f.render_widget(input, area);
            let cursor_x = area.x + 3 + state.filters.search.chars().count() as u16;
            f.set_cursor_position((cursor_x, area.y + 1));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = match state.view {
                View::Calendar => "Drag:Create | Click:Edit | a:Add | Tab:Board | q:Quit",
                View::Board => "Drag:Move | </>:Status | a:Add here | Tab:Calendar",
            };
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}

fn field_line<'a>(editor: &EditorState, field: Field, label: &'a str, value: String) -> Line<'a> {
    let focused = editor.field == field;
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{marker}{label:<12}{value}"), style))
}

fn draw_editor(f: &mut Frame, state: &AppState, area: Rect) {
    let Some(editor) = &state.editor else {
        return;
    };
    let width = area.width.saturating_sub(4).clamp(1, 58);
    let height = 14u16.min(area.height);
    let modal = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    f.render_widget(Clear, modal);

    let title = match (editor.editing_id, editor.kind) {
        (Some(_), EventKind::Event) => " Edit Event ",
        (Some(_), EventKind::Task) => " Edit Task ",
        (None, _) => " Create New ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    let mut lines = vec![
        field_line(editor, Field::Title, "Title", editor.title.clone()),
        field_line(editor, Field::Start, "Start Date", editor.start_input.clone()),
        field_line(editor, Field::End, "End Date", editor.end_input.clone()),
        field_line(editor, Field::Kind, "Type", format!("< {} >", editor.kind.label())),
        field_line(
            editor,
            Field::Priority,
            "Priority",
            format!("< {} >", editor.priority.label()),
        ),
        field_line(
            editor,
            Field::Status,
            "Status",
            format!("< {} >", editor.status.label()),
        ),
        field_line(editor, Field::Description, "Description", editor.description.clone()),
        Line::from(""),
    ];
    if let Some(err) = &editor.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }
    let delete_hint = if editor.editing_id.is_some() {
        " | Del: Delete"
    } else {
        ""
    };
    lines.push(Line::from(Span::styled(
        format!("Enter: Save | Esc: Cancel | Tab: Next field{delete_hint}"),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}
