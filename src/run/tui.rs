use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::Store;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &Store) -> Result<()> {
    let mut app = App::new();
    app.refresh(store)?;
    let unreadable = store.unreadable_collections()?;
    if !unreadable.is_empty() {
        let names: Vec<&str> = unreadable.iter().map(|c| c.key()).collect();
        app.set_status(format!(
            "Stored {} could not be read and started empty",
            names.join(" and ")
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("tui exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar + status bar + command bar
            let content_height = f.area().height.saturating_sub(3) as usize;
            let table_height = match app.screen {
                // the budget table gets 45% of the content area
                Screen::Overview => content_height * 45 / 100,
                Screen::Transactions => content_height,
            };
            // borders + header row
            app.visible_rows = table_height.saturating_sub(3).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Form => handle_form_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Overview)?,
        KeyCode::Char('2') => switch_screen(app, store, Screen::Transactions)?,
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            switch_screen(app, store, screens[next])?;
        }
        KeyCode::Char('b') => app.open_budget_form(),
        KeyCode::Char('a') => app.open_transaction_form(),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_form(store)?,
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.pop_char();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.push_char(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn switch_screen(app: &mut App, store: &Store, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(store)
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Overview => scroll_down(&mut app.row_index, &mut app.row_scroll, app.rows.len(), page),
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Overview => scroll_up(&mut app.row_index, &mut app.row_scroll),
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Overview => scroll_to_top(&mut app.row_index, &mut app.row_scroll),
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Overview => {
            scroll_to_bottom(&mut app.row_index, &mut app.row_scroll, app.rows.len(), page)
        }
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
    }
}
