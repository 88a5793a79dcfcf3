use crate::app::App;
use crate::ui::styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

/// Bottom-right status toast, drawn only while the notice is visible.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.notifier.visible(Instant::now()) else {
        return;
    };
    let mode = app.theme_mode();
    let style = styles::notice_style(mode, notice.kind);

    // Fits inside the area with a one-column margin, at least 20 wide when room allows.
    let max_width = area.width.saturating_sub(2);
    if max_width == 0 || area.height == 0 {
        return;
    }
    let wanted = u16::try_from(notice.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let width = wanted.min(max_width).max(20.min(max_width));
    let height = 3;
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(height + 1);
    let rect = Rect::new(x, y, width, height.min(area.height));

    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(Line::from(Span::styled(notice.message.as_str(), style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .style(styles::base_style(mode)),
        );
    frame.render_widget(paragraph, rect);
}
