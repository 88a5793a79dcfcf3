use crate::app::App;
use crate::theme::ThemeMode;
use crate::ui::styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.theme_mode();
    let palette = styles::palette(mode);

    let toggle = match mode {
        ThemeMode::Light => "☀",
        ThemeMode::Dark => "☾",
    };

    let hints = Line::from(vec![
        Span::styled(format!("[{} {}]", toggle, palette.name), styles::header_style(mode)),
        Span::raw("  │  "),
        Span::styled(
            "↑↓ nav  K/J mover  a add  e editar  d excluir  t tema  r recarregar  ? ajuda  q sair",
            styles::dim_style(mode),
        ),
    ]);

    let expensive = app.view.rows().iter().filter(|r| r.expensive).count();
    let stats = Line::from(vec![Span::styled(
        format!(
            " {} │ {} tarefas ({} caras)",
            app.api_url,
            app.view.len(),
            expensive,
        ),
        styles::dim_style(mode),
    )]);

    let paragraph = Paragraph::new(vec![hints, stats]).style(styles::base_style(mode));
    frame.render_widget(paragraph, area);
}
