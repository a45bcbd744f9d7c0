// Rendering for the loading, error and dashboard regions

pub mod screens;
pub mod widgets;

use ratatui::Frame;

use crate::app::App;
use crate::page::PageState;

pub fn ui<S>(app: &App<S>, f: &mut Frame<'_>) {
    let area = f.area();

    match app.dashboard.page.state() {
        PageState::Loading => screens::loading::render_loading(app, f, area),
        PageState::Error(message) => screens::error::render_error(message, f, area),
        PageState::Ready => screens::dashboard::render_dashboard(app, f, area),
    }

    if app.show_help {
        screens::help::render_help_popup(f, area);
    }
}
