//! Task list view model.
//!
//! `render` is a pure function of the fetched tasks, the theme and the current
//! date; `ui::task_list` turns the result into terminal widgets.

use crate::data::task::Task;
use crate::format::{days_remaining, format_currency, format_date, remaining_label};
use crate::theme::{ExpensiveStyle, ThemeMode};
use chrono::NaiveDate;

pub const EMPTY_MESSAGE: &str = "Nenhuma tarefa cadastrada";

/// One rendered task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: i64,
    pub ordem: i64,
    pub name: String,
    pub cost_label: String,
    pub due_label: String,
    pub days_remaining: Option<i64>,
    pub remaining_label: String,
    pub expensive: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    /// Set only on expensive rows, for the theme in effect.
    pub highlight: Option<ExpensiveStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskListView {
    Empty { message: &'static str },
    Rows(Vec<TaskRow>),
}

impl Default for TaskListView {
    fn default() -> Self {
        TaskListView::Empty {
            message: EMPTY_MESSAGE,
        }
    }
}

impl TaskListView {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            TaskListView::Empty { .. } => &[],
            TaskListView::Rows(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.rows().iter().position(|r| r.id == id)
    }

    pub fn row(&self, id: i64) -> Option<&TaskRow> {
        self.rows().iter().find(|r| r.id == id)
    }

    /// Re-color every expensive row for `theme` without re-rendering.
    pub fn apply_expensive_styling(&mut self, theme: ThemeMode) {
        if let TaskListView::Rows(rows) = self {
            let style = theme.expensive_style();
            for row in rows.iter_mut().filter(|r| r.expensive) {
                row.highlight = Some(style);
            }
        }
    }
}

/// Build the full view for `tasks`, keeping the backend's order.
pub fn render(tasks: &[Task], theme: ThemeMode, today: NaiveDate) -> TaskListView {
    if tasks.is_empty() {
        return TaskListView::default();
    }

    let last = tasks.len() - 1;
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let days = task.due_date().map(|due| days_remaining(due, today));
            TaskRow {
                id: task.id,
                ordem: task.ordem,
                name: task.nome.clone(),
                cost_label: format_currency(task.custo),
                due_label: format_date(&task.data_limite),
                days_remaining: days,
                remaining_label: remaining_label(days),
                expensive: task.is_expensive(),
                can_move_up: index > 0,
                can_move_down: index < last,
                highlight: None,
            }
        })
        .collect();

    let mut view = TaskListView::Rows(rows);
    view.apply_expensive_styling(theme);
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn task(id: i64, custo: f64, data_limite: &str) -> Task {
        Task {
            id,
            nome: format!("Tarefa {}", id),
            custo,
            data_limite: data_limite.to_string(),
            ordem: id,
        }
    }

    #[test]
    fn test_empty_state() {
        let view = render(&[], ThemeMode::Light, today());
        assert_eq!(view, TaskListView::Empty { message: EMPTY_MESSAGE });
        assert!(view.is_empty());
    }

    #[test]
    fn test_one_row_per_task_in_order() {
        let tasks = vec![
            task(9, 10.0, "2026-10-20"),
            task(2, 20.0, "2026-10-21"),
            task(5, 30.0, "2026-10-22"),
        ];
        let view = render(&tasks, ThemeMode::Light, today());
        let ids: Vec<i64> = view.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 2, 5]);

        let rows = view.rows();
        assert!(!rows[0].can_move_up);
        assert!(rows[0].can_move_down);
        assert!(rows[1].can_move_up && rows[1].can_move_down);
        assert!(rows[2].can_move_up);
        assert!(!rows[2].can_move_down);
    }

    #[test]
    fn test_single_task_cannot_move() {
        let view = render(&[task(1, 5.0, "2026-11-01")], ThemeMode::Dark, today());
        let row = &view.rows()[0];
        assert!(!row.can_move_up);
        assert!(!row.can_move_down);
    }

    #[test]
    fn test_remaining_day_boundaries() {
        let tasks = vec![
            task(1, 1.0, "2026-10-16"),
            task(2, 1.0, "2026-10-17"),
            task(3, 1.0, "2026-10-01"),
            task(4, 1.0, "sem data"),
        ];
        let view = render(&tasks, ThemeMode::Light, today());
        let labels: Vec<&str> = view.rows().iter().map(|r| r.remaining_label.as_str()).collect();
        assert_eq!(labels, vec!["Vencida", "Faltam 1 dias", "Vencida", "Vencida"]);
        assert_eq!(view.rows()[3].due_label, "Data inválida");
    }

    #[test]
    fn test_expensive_rows_follow_theme() {
        let tasks = vec![task(1, 999.99, "2026-12-01"), task(2, 1000.00, "2026-12-01")];
        let mut view = render(&tasks, ThemeMode::Light, today());
        let rows = view.rows();
        assert!(!rows[0].expensive);
        assert_eq!(rows[0].highlight, None);
        assert!(rows[1].expensive);
        assert_eq!(rows[1].highlight, Some(ThemeMode::Light.expensive_style()));

        view.apply_expensive_styling(ThemeMode::Dark);
        assert_eq!(view.rows()[1].highlight, Some(ThemeMode::Dark.expensive_style()));
        assert_eq!(view.rows()[0].highlight, None);
    }

    #[test]
    fn test_restyle_matches_fresh_render() {
        let tasks = vec![task(1, 5000.0, "2027-01-01")];
        let mut restyled = render(&tasks, ThemeMode::Light, today());
        restyled.apply_expensive_styling(ThemeMode::Dark);
        assert_eq!(restyled, render(&tasks, ThemeMode::Dark, today()));
    }

    #[test]
    fn test_backend_example_row() {
        let json = r#"[{"id":1,"nome":"Comprar","custo":"1500.00","data_limite":"2099-01-01","ordem":1}]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        let view = render(&tasks, ThemeMode::Light, today());

        assert_eq!(view.len(), 1);
        let row = &view.rows()[0];
        assert_eq!(row.name, "Comprar");
        assert!(row.expensive);
        assert_eq!(row.cost_label, "R$ 1.500,00");
        assert_eq!(row.due_label, "01/01/2099");

        let expected = (NaiveDate::from_ymd_opt(2099, 1, 1).unwrap() - today()).num_days();
        assert_eq!(row.days_remaining, Some(expected));
        assert_eq!(row.remaining_label, format!("Faltam {} dias", expected));
    }
}
