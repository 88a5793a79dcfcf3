use crate::app::App;
use crate::modal::ModalButton;
use crate::ui::{centered_rect, styles};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let (Some(prompt), Some(focus)) = (app.modal.prompt(), app.modal.focus()) else {
        return;
    };
    let mode = app.theme_mode();
    let palette = styles::palette(mode);

    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirmar exclusão ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.danger))
        .style(styles::base_style(mode));

    let button = |label: &'static str, target: ModalButton| {
        let style = if focus == target {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            styles::dim_style(mode)
        };
        Span::styled(label, style)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(prompt)),
        Line::from(Span::styled(
            "Esta ação não pode ser desfeita.",
            styles::dim_style(mode),
        )),
        Line::from(""),
        Line::from(vec![
            button(" Cancelar ", ModalButton::Cancel),
            Span::raw("   "),
            button(" Excluir ", ModalButton::Confirm),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab alternar  Enter escolher  y excluir  Esc cancelar",
            styles::dim_style(mode),
        )),
    ];

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(para, area);
}
