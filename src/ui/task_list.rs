use crate::app::{App, EditForm, FormField};
use crate::theme::ThemeMode;
use crate::ui::styles;
use crate::view::{TaskListView, TaskRow};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.theme_mode();
    let title = format!(" Tarefas ({}) ", app.view.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::border_style(mode))
        .style(styles::base_style(mode));

    let rows = match &app.view {
        TaskListView::Empty { message } => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("☐", styles::dim_style(mode))),
                Line::from(Span::styled(*message, styles::dim_style(mode))),
                Line::from(""),
                Line::from(Span::styled("a adicionar tarefa", styles::dim_style(mode))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }
        TaskListView::Rows(rows) => rows,
    };

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match app.edit.as_ref().filter(|e| e.id == row.id) {
            Some(edit) => render_edit_row(mode, row, edit),
            None => render_task_row(mode, row),
        })
        .collect();

    let items_len = items.len();
    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style(mode))
        .highlight_symbol("▌ ");

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);

    // Each row spans two lines (edit rows more); estimate overflow by rows.
    let visible_rows = (area.height.saturating_sub(2) / 2) as usize;
    if items_len > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(items_len)
            .position(app.cursor)
            .viewport_content_length(visible_rows);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn move_controls(mode: ThemeMode, row: &TaskRow) -> Vec<Span<'static>> {
    vec![
        Span::styled("▲", styles::control_style(mode, row.can_move_up)),
        Span::styled("▼", styles::control_style(mode, row.can_move_down)),
        Span::raw(" "),
    ]
}

fn render_task_row(mode: ThemeMode, row: &TaskRow) -> ListItem<'static> {
    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    let mut row_style = Style::default();
    if let Some(highlight) = row.highlight {
        name_style = name_style.fg(highlight.name);
        row_style = row_style.bg(highlight.background);
    }

    let mut title = move_controls(mode, row);
    title.push(Span::styled(format!("{}. ", row.ordem), styles::dim_style(mode)));
    title.push(Span::styled(row.name.clone(), name_style));

    let details = Line::from(vec![
        Span::raw("    "),
        Span::raw(row.cost_label.clone()),
        Span::styled("  ⏱ ", styles::dim_style(mode)),
        Span::raw(row.due_label.clone()),
        Span::styled(format!(" ({})", row.remaining_label), remaining_style(mode, row)),
    ]);

    ListItem::new(vec![Line::from(title), details]).style(row_style)
}

fn remaining_style(mode: ThemeMode, row: &TaskRow) -> Style {
    match row.days_remaining {
        Some(n) if n > 0 => styles::dim_style(mode),
        _ => Style::default().fg(styles::palette(mode).danger),
    }
}

/// The row's info block replaced by the inline edit form.
fn render_edit_row(mode: ThemeMode, row: &TaskRow, edit: &EditForm) -> ListItem<'static> {
    let mut lines = vec![Line::from({
        let mut title = move_controls(mode, row);
        title.push(Span::styled("Editando", styles::header_style(mode)));
        title
    })];

    for field in FormField::ALL {
        let focused = edit.form.focus == field;
        let label_style = if focused {
            styles::header_style(mode)
        } else {
            styles::dim_style(mode)
        };
        let value = edit.form.input(field).value().to_string();
        let mut spans = vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value, Style::default().add_modifier(Modifier::UNDERLINED)),
        ];
        if focused {
            spans.push(Span::styled("█", styles::header_style(mode)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        "    Enter salvar  Esc cancelar  Tab próximo campo",
        styles::dim_style(mode),
    )));

    ListItem::new(lines)
}
