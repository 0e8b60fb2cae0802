use anyhow::Result;
use cadence::config::Config;
use cadence::model::Status;
use cadence::model::item::end_of_day;
use cadence::storage::Storage;
use cadence::store::EventStore;
use cadence::tui::editor::{EditorSeed, EditorState};
use cadence::tui::state::{AppState, EventDrag, Focus, InputMode, View};
use cadence::tui::view::draw;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

fn main() -> Result<()> {
    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("cadence_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    // A broken config must not lock the user out of their data, but it
    // must not vanish silently either: fall back to defaults and put the
    // error on the status line.
    let (config, config_error) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(format!("Config ignored: {e:#}"))),
    };
    let storage = Storage::open(config.data_file.clone());
    let store = EventStore::load(storage);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new(store, config.start_in_board);
    if let Some(msg) = config_error {
        state.message = msg;
    }

    loop {
        terminal.draw(|f| draw(f, &mut state))?;

        // Deferred editor open: the draw above gave the frozen preview one
        // frame on screen before the modal takes over.
        if let Some(seed) = state.pending_editor.take() {
            open_editor(&mut state, seed);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&mut state, key.code) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut state, mouse),
                _ => {} // Resize is picked up on the next draw
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn open_editor(state: &mut AppState, seed: EditorSeed) {
    match seed {
        EditorSeed::Create {
            preset_start,
            preset_end,
            status,
        } => {
            state.editor = Some(EditorState::create(preset_start, preset_end, status));
        }
        EditorSeed::Edit(id) => {
            if let Some(event) = state.store.get(id) {
                state.editor = Some(EditorState::edit(event));
            }
        }
    }
}

fn close_editor(state: &mut AppState) {
    state.editor = None;
    state.committed_preview = None;
}

/// Returns true when the application should quit.
fn handle_key(state: &mut AppState, code: KeyCode) -> bool {
    if state.editor.is_some() {
        handle_editor_key(state, code);
        return false;
    }

    if state.mode == InputMode::Searching {
        match code {
            KeyCode::Enter | KeyCode::Esc => state.mode = InputMode::Normal,
            KeyCode::Char(c) => state.filters.search.push(c),
            KeyCode::Backspace => {
                state.filters.search.pop();
            }
            _ => {}
        }
        return false;
    }

    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            state.view = match state.view {
                View::Calendar => View::Board,
                View::Board => View::Calendar,
            };
        }
        KeyCode::Char('f') => {
            state.sidebar_open = !state.sidebar_open;
            state.focus = if state.sidebar_open {
                Focus::Sidebar
            } else {
                Focus::Main
            };
        }
        KeyCode::Char('/') => {
            state.sidebar_open = true;
            state.mode = InputMode::Searching;
        }
        KeyCode::Esc => {
            if state.sidebar_open {
                state.sidebar_open = false;
                state.focus = Focus::Main;
            }
        }
        _ => match state.focus {
            Focus::Sidebar => handle_sidebar_key(state, code),
            Focus::Main => match state.view {
                View::Calendar => handle_calendar_key(state, code),
                View::Board => handle_board_key(state, code),
            },
        },
    }
    false
}

fn handle_sidebar_key(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => state.sidebar_next(),
        KeyCode::Up | KeyCode::Char('k') => state.sidebar_previous(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let rows = state.sidebar_rows();
            if let Some(row) = rows.get(state.sidebar_index) {
                state.toggle_sidebar_row(*row);
            }
        }
        KeyCode::Char('c') => state.filters.clear(),
        _ => {}
    }
}

fn handle_calendar_key(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Left => state.move_cursor(-1),
        KeyCode::Right => state.move_cursor(1),
        KeyCode::Up => state.move_cursor(-7),
        KeyCode::Down => state.move_cursor(7),
        KeyCode::Char('[') | KeyCode::PageUp => state.go_prev_month(),
        KeyCode::Char(']') | KeyCode::PageDown => state.go_next_month(),
        KeyCode::Char('t') => state.go_today(),
        // Slot click at the cursor: the editor opens on the next cycle,
        // pre-filled with the cursor day.
        KeyCode::Char('a') | KeyCode::Enter => {
            state.pending_editor = Some(EditorSeed::Create {
                preset_start: Some(state.cursor),
                preset_end: Some(state.cursor),
                status: Status::default(),
            });
        }
        _ => {}
    }
}

fn handle_board_key(state: &mut AppState, code: KeyCode) {
    let now = state.now();
    match code {
        KeyCode::Left | KeyCode::Char('h') => state.board_move_selection(-1, 0, now),
        KeyCode::Right | KeyCode::Char('l') => state.board_move_selection(1, 0, now),
        KeyCode::Up | KeyCode::Char('k') => state.board_move_selection(0, -1, now),
        KeyCode::Down | KeyCode::Char('j') => state.board_move_selection(0, 1, now),
        KeyCode::Enter => {
            if let Some(id) = state.board_selected(now) {
                state.pending_editor = Some(EditorSeed::Edit(id));
            }
        }
        // Per-column create: the new task inherits the focused column.
        KeyCode::Char('a') => {
            state.pending_editor = Some(EditorSeed::Create {
                preset_start: None,
                preset_end: None,
                status: state.board_selected_status(),
            });
        }
        KeyCode::Char('<') | KeyCode::Char('>') => {
            if let Some(id) = state.board_selected(now) {
                let statuses = Status::ALL;
                let delta: i64 = if code == KeyCode::Char('<') { -1 } else { 1 };
                let next = (state.board_col as i64 + delta)
                    .clamp(0, statuses.len() as i64 - 1) as usize;
                if next != state.board_col {
                    let result = state.store.set_status(id, statuses[next]);
                    report(state, result);
                    state.board_col = next;
                }
            }
        }
        _ => {}
    }
}

fn handle_editor_key(state: &mut AppState, code: KeyCode) {
    let Some(editor) = state.editor.as_mut() else {
        return;
    };
    match code {
        KeyCode::Esc => close_editor(state),
        KeyCode::Tab | KeyCode::Down => editor.next_field(),
        KeyCode::BackTab | KeyCode::Up => editor.previous_field(),
        KeyCode::Left => editor.cycle(false),
        KeyCode::Right => editor.cycle(true),
        KeyCode::Char(c) => editor.enter_char(c),
        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => {
            if let Some(id) = editor.editing_id {
                let result = state.store.delete(id);
                close_editor(state);
                state.message = "Deleted.".to_string();
                report(state, result);
            }
        }
        KeyCode::Enter => match editor.build() {
            Ok(event) => {
                let result = match editor.editing_id {
                    Some(id) => state.store.update(id, event),
                    None => state.store.add(event),
                };
                close_editor(state);
                state.message = "Saved.".to_string();
                report(state, result);
            }
            // Validation failure keeps the form open; nothing reaches the
            // store.
            Err(msg) => editor.error = Some(msg),
        },
        _ => {}
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.editor.is_some() {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if state.sidebar_open
                && let Some(area) = state.sidebar_area
                && col >= area.x
                && col < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
            {
                // One sidebar row per line, starting under the border.
                let index = (row.saturating_sub(area.y + 1)) as usize;
                let rows = state.sidebar_rows();
                if let Some(r) = rows.get(index) {
                    state.focus = Focus::Sidebar;
                    state.sidebar_index = index;
                    state.toggle_sidebar_row(*r);
                }
                return;
            }
            match state.view {
                View::Calendar => {
                    // Presses on a rendered event item select/move it and
                    // never start a drag-create session.
                    if let Some(id) = state.event_at_pointer(col, row) {
                        let origin = state
                            .date_at_pointer(col, row)
                            .unwrap_or(state.cursor);
                        state.event_drag = Some(EventDrag {
                            id,
                            origin,
                            current: origin,
                            resize: false,
                            moved: false,
                        });
                    } else if let Some(date) = state.date_at_pointer(col, row) {
                        state.cursor = date;
                        state.drag.press(date);
                    }
                }
                View::Board => {
                    if let Some(id) = state.card_at_pointer(col, row) {
                        state.board_drag = Some(id);
                    }
                }
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if state.view == View::Calendar
                && let Some(id) = state.event_at_pointer(col, row)
            {
                let origin = state.date_at_pointer(col, row).unwrap_or(state.cursor);
                state.event_drag = Some(EventDrag {
                    id,
                    origin,
                    current: origin,
                    resize: true,
                    moved: false,
                });
            }
        }
        MouseEventKind::Drag(_) => {
            // A miss (pointer outside the grid) is a silent no-op.
            if let Some(date) = state.date_at_pointer(col, row) {
                if state.drag.is_selecting() {
                    state.drag.drag_to(date);
                } else if let Some(drag) = state.event_drag.as_mut() {
                    if date != drag.origin {
                        drag.moved = true;
                    }
                    drag.current = date;
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => match state.view {
            View::Calendar => {
                if state.drag.is_selecting() {
                    if let Some(frozen) = state.drag.release() {
                        state.pending_editor = Some(EditorSeed::Create {
                            preset_start: Some(frozen.start.date()),
                            preset_end: Some(frozen.end.date()),
                            status: Status::default(),
                        });
                        state.committed_preview = Some(frozen);
                    }
                } else if let Some(drag) = state.event_drag.take() {
                    if drag.moved && drag.current != drag.origin {
                        let delta = (drag.current - drag.origin).num_days();
                        let result = state.store.move_by_days(drag.id, delta);
                        report(state, result);
                    } else {
                        // A click without movement opens the editor.
                        state.pending_editor = Some(EditorSeed::Edit(drag.id));
                    }
                }
            }
            View::Board => {
                if let Some(id) = state.board_drag.take()
                    && let Some(status) = state.column_at_pointer(col, row)
                {
                    let result = state.store.set_status(id, status);
                    report(state, result);
                }
            }
        },
        MouseEventKind::Up(MouseButton::Right) => {
            if let Some(drag) = state.event_drag.take()
                && drag.resize
            {
                if let Some(start) = state.store.get(drag.id).map(|e| e.start) {
                    let new_end = end_of_day(drag.current);
                    if new_end >= start {
                        let result = state.store.resize(drag.id, start, new_end);
                        report(state, result);
                    } else {
                        state.message = "End date must be after start date".to_string();
                    }
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if state.view == View::Calendar {
                state.go_prev_month();
            }
        }
        MouseEventKind::ScrollDown => {
            if state.view == View::Calendar {
                state.go_next_month();
            }
        }
        _ => {}
    }
}

fn report(state: &mut AppState, result: Result<()>) {
    if let Err(e) = result {
        state.message = format!("Save failed: {e}");
    }
}
