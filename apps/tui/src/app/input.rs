use crossterm::event::KeyCode;

use crate::app::state::App;
use crate::cache::SessionStore;

pub fn handle_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    if app.dropdown_open {
        handle_dropdown_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Up | KeyCode::Down | KeyCode::Enter if app.dashboard.page.is_ready() => {
            app.dashboard.selector.reset_highlight();
            app.dropdown_open = true;
        }
        _ => {}
    }
}

fn handle_help_toggle<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_dropdown_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) {
    let selector = &mut app.dashboard.selector;
    match key {
        KeyCode::Up => selector.highlight_prev(),
        KeyCode::Down => selector.highlight_next(),
        KeyCode::Enter => {
            selector.select_highlighted();
            app.dropdown_open = false;
        }
        KeyCode::Esc => {
            selector.reset_highlight();
            app.dropdown_open = false;
        }
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}
