use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::app::{App, FormField, InputMode, Screen};

/// How often the loop wakes to drain the advisor channel.
const TICK: Duration = Duration::from_millis(100);

pub(crate) fn as_tui() -> Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.poll_reply();

        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            app.chat_wrap_width = f.area().width.saturating_sub(4).max(1) as usize;
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app),
                InputMode::Editing => handle_editing_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => app.screen = Screen::Simulator,
        KeyCode::Char('2') => app.screen = Screen::Advisor,
        KeyCode::Tab | KeyCode::BackTab => {
            app.screen = match app.screen {
                Screen::Simulator => Screen::Advisor,
                Screen::Advisor => Screen::Simulator,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') if app.screen == Screen::Advisor => {
            app.chat_scroll = crate::ui::screens::advisor::max_scroll(app);
        }
        KeyCode::Char('G') if app.screen == Screen::Advisor => {
            app.scroll_chat_to_bottom();
        }
        KeyCode::Char('s') if app.screen == Screen::Simulator => {
            app.simulate();
        }
        KeyCode::Char('i') => start_editing(app),
        KeyCode::Enter if app.screen == Screen::Simulator => start_editing(app),
        KeyCode::Esc => {
            if app.screen == Screen::Advisor && app.reply_pending() {
                app.abandon_reply();
            } else {
                app.status_message.clear();
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match app.screen {
        Screen::Simulator => handle_field_editing(key, app),
        Screen::Advisor => handle_chat_editing(key, app),
    }
}

fn handle_field_editing(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.edit_backup = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            if let Some(backup) = app.edit_backup.take() {
                *app.selected_value_mut() = backup;
            }
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.selected_value_mut().pop();
        }
        KeyCode::Char(c) => {
            let amount_field = app.selected_field().is_amount();
            if !amount_field || c.is_ascii_digit() || c == '.' {
                app.selected_value_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_chat_editing(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.send_question();
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => {
            app.chat_input.push(c);
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn start_editing(app: &mut App) {
    match app.screen {
        Screen::Simulator => {
            app.edit_backup = Some(app.selected_value_mut().clone());
        }
        Screen::Advisor => {}
    }
    app.input_mode = InputMode::Editing;
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Simulator => {
            if app.field_index + 1 < FormField::all().len() {
                app.field_index += 1;
            }
        }
        Screen::Advisor => {
            app.chat_scroll = app.chat_scroll.saturating_sub(1);
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Simulator => {
            app.field_index = app.field_index.saturating_sub(1);
        }
        Screen::Advisor => {
            let max = crate::ui::screens::advisor::max_scroll(app);
            app.chat_scroll = (app.chat_scroll + 1).min(max);
        }
    }
}
