use crate::app::App;
use crate::ui::{centered_rect, styles};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let mode = app.theme_mode();
    let area = centered_rect(60, 75, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Ajuda — tarefas-board ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(mode))
        .style(styles::base_style(mode));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bold = styles::header_style(mode);
    let key_style = Style::default().fg(styles::palette(mode).accent);
    let dim = styles::dim_style(mode);

    let lines = vec![
        Line::from(Span::styled("Lista", bold)),
        Line::from(""),
        key_line("↑/↓ or j/k", "Selecionar tarefa", key_style),
        key_line("K/J", "Mover tarefa para cima/baixo", key_style),
        key_line("Shift+↑/↓", "Mover tarefa para cima/baixo", key_style),
        key_line("a", "Adicionar tarefa", key_style),
        key_line("e or Enter", "Editar tarefa", key_style),
        key_line("d or Del", "Excluir tarefa", key_style),
        key_line("r or F5", "Recarregar lista", key_style),
        key_line("t", "Alternar tema claro/escuro", key_style),
        Line::from(""),
        Line::from(Span::styled("Formulários", bold)),
        Line::from(""),
        key_line("Tab/Shift+Tab", "Próximo/anterior campo", key_style),
        key_line("Enter", "Salvar", key_style),
        key_line("Esc", "Cancelar", key_style),
        Line::from(""),
        Line::from(Span::styled("Sair", bold)),
        Line::from(""),
        key_line("q", "Sair", key_style),
        key_line("Ctrl+C", "Sair", key_style),
        Line::from(""),
        Line::from(Span::styled("Pressione qualquer tecla para fechar", dim)),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn key_line<'a>(key: &'a str, desc: &'a str, key_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", key), key_style),
        Span::raw(desc),
    ])
}
