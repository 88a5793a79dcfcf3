pub mod add_popup;
pub mod confirm_popup;
pub mod help_popup;
pub mod status_bar;
pub mod styles;
pub mod task_list;
pub mod toast;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let mode = app.theme_mode();
    frame.render_widget(Block::default().style(styles::base_style(mode)), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Task list
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    task_list::draw(frame, app, chunks[0]);
    status_bar::draw(frame, app, chunks[1]);

    // Overlays (drawn on top)
    if app.add_open {
        add_popup::draw(frame, app);
    }
    if app.show_help {
        help_popup::draw(frame, app);
    }
    if app.modal.is_open() {
        confirm_popup::draw(frame, app);
    }
    toast::draw(frame, app, chunks[0]);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
