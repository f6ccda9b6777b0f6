use crate::app::{App, MenuItem};
use crate::state::app_state::PickSide;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;
    if apply_key(key_event, &mut guard) == KeyOutcome::Quit {
        drop(guard);
        crate::cleanup_terminal();
        std::process::exit(0);
    }
}

pub fn apply_key(key_event: KeyEvent, app: &mut App) -> KeyOutcome {
    if app.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => app.dismiss_intro(),
            (Char('g'), _) => {
                app.dismiss_intro();
                app.generate_bracket();
            }
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => return KeyOutcome::Quit,
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => return KeyOutcome::Quit,

        // Tab switching
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Bracket actions
        (MenuItem::Bracket, Char('g'), _) => app.generate_bracket(),
        (MenuItem::Bracket, Char('1'), _) => app.pick(PickSide::Top),
        (MenuItem::Bracket, Char('2'), _) => app.pick(PickSide::Bottom),

        // Bracket navigation
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => app.bracket_next_round(),
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => app.bracket_prev_round(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => app.bracket_game_down(),
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => app.bracket_game_up(),
        (MenuItem::Bracket, Char('c') | KeyCode::Tab, _) => app.bracket_cycle_pane(),

        // Global
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    KeyOutcome::Continue
}
