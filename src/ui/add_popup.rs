use crate::app::{App, FormField};
use crate::ui::{centered_rect, styles};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    if !app.add_open {
        return;
    }
    let mode = app.theme_mode();

    let area = centered_rect(55, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Nova Tarefa ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(mode))
        .style(styles::base_style(mode));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    for (field, chunk) in FormField::ALL.into_iter().zip(chunks.iter()) {
        draw_field(frame, app, field, *chunk);
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        "Tab próximo campo  Enter adicionar  Esc fechar",
        styles::dim_style(mode),
    )));
    frame.render_widget(hint, chunks[4]);
}

fn draw_field(frame: &mut Frame, app: &App, field: FormField, area: Rect) {
    let mode = app.theme_mode();
    let form = &app.add_form;
    let focused = form.focus == field;

    let input_block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(if focused {
            styles::border_style(mode)
        } else {
            styles::dim_style(mode)
        });
    let input_inner = input_block.inner(area);
    frame.render_widget(input_block, area);

    let input = form.input(field);
    frame.render_widget(Paragraph::new(Line::from(Span::raw(input.value()))), input_inner);

    if focused {
        frame.set_cursor_position((
            input_inner.x + input.visual_cursor() as u16,
            input_inner.y,
        ));
    }
}
