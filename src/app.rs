use crate::api::{ApiError, ApiResult, TaskApi};
use crate::data::task::{self, Direction, Task, TaskPayload};
use crate::modal::{ConfirmationModal, ModalButton};
use crate::notifier::Notifier;
use crate::theme::{ThemeController, ThemeMode};
use crate::view::{self, TaskListView, TaskRow};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use tui_input::Input;

pub const MSG_NAME_REQUIRED: &str = "O nome da tarefa é obrigatório";
pub const MSG_LOAD_FAILED: &str = "Erro ao carregar tarefas";
pub const MSG_EDIT_FAILED: &str = "Erro ao editar tarefa";
pub const MSG_DUE_DATE_INVALID: &str = "Data limite inválida";
pub const MSG_DUE_DATE_PAST: &str = "A data limite não pode ser anterior a hoje";

/// Backend work run off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Load,
    Move { id: i64, direction: Direction },
    Create(TaskPayload),
    FetchForEdit(i64),
    Update { id: i64, payload: TaskPayload },
    Delete(i64),
}

/// Operations that change backend state and are followed by a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Move,
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn success_message(self) -> Option<&'static str> {
        match self {
            Mutation::Move => None,
            Mutation::Create => Some("Tarefa adicionada com sucesso"),
            Mutation::Update => Some("Tarefa atualizada com sucesso"),
            Mutation::Delete => Some("Tarefa excluída com sucesso"),
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Mutation::Move => "Erro ao mover tarefa",
            Mutation::Create => "Erro ao adicionar tarefa",
            Mutation::Update => "Erro ao atualizar tarefa",
            Mutation::Delete => "Erro ao excluir tarefa",
        }
    }

    /// Create and update surface the backend's own `{error}` text.
    fn shows_server_message(self) -> bool {
        matches!(self, Mutation::Create | Mutation::Update)
    }
}

#[derive(Debug)]
pub enum JobOutcome {
    Loaded(ApiResult<Vec<Task>>),
    EditFetched {
        id: i64,
        result: ApiResult<Task>,
    },
    Mutated {
        mutation: Mutation,
        result: ApiResult<()>,
        /// Present only when the mutation succeeded.
        reload: Option<ApiResult<Vec<Task>>>,
    },
}

/// An outcome stamped with its place in finishing order.
#[derive(Debug)]
struct Completed {
    seq: u64,
    outcome: JobOutcome,
}

/// Execute `job` against `api`: mutate, then reload the full list on success.
pub fn run_job(api: &dyn TaskApi, job: Job) -> JobOutcome {
    let (mutation, result) = match job {
        Job::Load => return JobOutcome::Loaded(api.list()),
        Job::FetchForEdit(id) => {
            return JobOutcome::EditFetched {
                id,
                result: api.get(id),
            }
        }
        Job::Move { id, direction } => (Mutation::Move, api.move_task(id, direction)),
        Job::Create(payload) => (Mutation::Create, api.create(&payload).map(|_| ())),
        Job::Update { id, payload } => (Mutation::Update, api.update(id, &payload).map(|_| ())),
        Job::Delete(id) => (Mutation::Delete, api.delete(id)),
    };

    let reload = result.is_ok().then(|| api.list());
    JobOutcome::Mutated {
        mutation,
        result,
        reload,
    }
}

/// Fields of the add and inline edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Cost,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Cost, FormField::DueDate];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nome",
            FormField::Cost => "Custo (R$)",
            FormField::DueDate => "Data limite",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Cost,
            FormField::Cost => FormField::DueDate,
            FormField::DueDate => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::DueDate,
            FormField::Cost => FormField::Name,
            FormField::DueDate => FormField::Cost,
        }
    }
}

/// Text inputs for name, cost and due date.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub name: Input,
    pub cost: Input,
    pub due_date: Input,
    pub focus: FormField,
}

impl TaskForm {
    pub fn filled(name: &str, cost: &str, due_date: &str) -> Self {
        Self {
            name: Input::new(name.to_string()),
            cost: Input::new(cost.to_string()),
            due_date: Input::new(due_date.to_string()),
            focus: FormField::Name,
        }
    }

    /// Pre-filled from a fetched task.
    pub fn from_task(task: &Task) -> Self {
        Self::filled(&task.nome, &format!("{:.2}", task.custo), &task.data_limite)
    }

    pub fn input(&self, field: FormField) -> &Input {
        match field {
            FormField::Name => &self.name,
            FormField::Cost => &self.cost,
            FormField::DueDate => &self.due_date,
        }
    }

    fn input_mut(&mut self, field: FormField) -> &mut Input {
        match field {
            FormField::Name => &mut self.name,
            FormField::Cost => &mut self.cost,
            FormField::DueDate => &mut self.due_date,
        }
    }

    pub fn reset(&mut self) {
        self.name.reset();
        self.cost.reset();
        self.due_date.reset();
        self.focus = FormField::Name;
    }

    /// Payload with `name` already sanitized by the caller.
    fn payload(&self, name: String) -> TaskPayload {
        TaskPayload {
            nome: name,
            custo: self.cost.value().trim().to_string(),
            data_limite: self.due_date.value().trim().to_string(),
        }
    }

    /// Field navigation and text editing. Returns the keys it did not handle.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter | KeyCode::Esc => return Some(key),
            _ => {
                use tui_input::backend::crossterm::EventHandler;
                let focus = self.focus;
                self.input_mut(focus)
                    .handle_event(&crossterm::event::Event::Key(key));
            }
        }
        None
    }
}

/// Inline edit form replacing one row's info block.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: i64,
    pub form: TaskForm,
}

pub struct App {
    api: Arc<dyn TaskApi>,
    pub api_url: String,

    pub theme: ThemeController,
    pub notifier: Notifier,
    pub modal: ConfirmationModal,

    // Task list
    pub view: TaskListView,
    pub cursor: usize,

    // Forms
    pub add_form: TaskForm,
    pub add_open: bool,
    pub edit: Option<EditForm>,

    // UI state
    pub should_quit: bool,
    pub show_help: bool,

    jobs: Vec<JoinHandle<Completed>>,
    finished: Arc<AtomicU64>,
}

impl App {
    pub fn new(api: Arc<dyn TaskApi>, api_url: String, theme: ThemeController) -> Self {
        App {
            api,
            api_url,
            theme,
            notifier: Notifier::default(),
            modal: ConfirmationModal::default(),
            view: TaskListView::default(),
            cursor: 0,
            add_form: TaskForm::default(),
            add_open: false,
            edit: None,
            should_quit: false,
            show_help: false,
            jobs: Vec::new(),
            finished: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn selected_row(&self) -> Option<&TaskRow> {
        self.view.rows().get(self.cursor)
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.jobs.len()
    }

    // ── Background jobs ─────────────────────────────────────────────────

    fn dispatch(&mut self, job: Job) {
        tracing::debug!(?job, "dispatching");
        let api = Arc::clone(&self.api);
        let finished = Arc::clone(&self.finished);
        self.jobs.push(std::thread::spawn(move || {
            let outcome = run_job(api.as_ref(), job);
            Completed {
                seq: finished.fetch_add(1, Ordering::SeqCst),
                outcome,
            }
        }));
    }

    /// Apply every finished job in the order the jobs finished (call each tick).
    pub fn poll_jobs(&mut self) {
        let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.jobs)
            .into_iter()
            .partition(|handle| handle.is_finished());
        self.jobs = pending;

        let mut completed: Vec<Completed> =
            ready.into_iter().filter_map(|handle| self.join(handle)).collect();
        completed.sort_by_key(|c| c.seq);
        for c in completed {
            self.apply_outcome(c.outcome);
        }
    }

    fn join(&mut self, handle: JoinHandle<Completed>) -> Option<Completed> {
        match handle.join() {
            Ok(completed) => Some(completed),
            Err(_) => {
                tracing::error!("backend worker panicked");
                self.notifier.error("Erro inesperado");
                None
            }
        }
    }

    pub fn tick(&mut self) {
        self.poll_jobs();
        self.notifier.tick(Instant::now());
    }

    pub fn apply_outcome(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Loaded(result) => self.apply_reload(result),
            JobOutcome::EditFetched { id, result } => match result {
                Ok(task) if self.view.position(id).is_some() => {
                    self.cursor = self.view.position(id).unwrap_or(self.cursor);
                    self.edit = Some(EditForm {
                        id,
                        form: TaskForm::from_task(&task),
                    });
                }
                Ok(_) => {
                    tracing::error!(id, "task to edit is no longer listed");
                    self.notifier.error(MSG_EDIT_FAILED);
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "failed to fetch task for editing");
                    self.notifier.error(MSG_EDIT_FAILED);
                }
            },
            JobOutcome::Mutated {
                mutation,
                result: Ok(()),
                reload,
            } => {
                if mutation == Mutation::Create {
                    self.add_form.reset();
                    self.add_open = false;
                }
                if let Some(reload) = reload {
                    self.apply_reload(reload);
                }
                if let Some(message) = mutation.success_message() {
                    self.notifier.success(message);
                }
            }
            JobOutcome::Mutated {
                mutation,
                result: Err(e),
                ..
            } => self.report_failure(mutation, &e),
        }
    }

    fn report_failure(&mut self, mutation: Mutation, error: &ApiError) {
        tracing::error!(?mutation, error = %error, "{}", mutation.failure_message());
        let message = if mutation.shows_server_message() {
            error
                .server_message()
                .unwrap_or(mutation.failure_message())
                .to_string()
        } else {
            mutation.failure_message().to_string()
        };
        self.notifier.error(message);
    }

    /// Replace the whole view with a fresh fetch, or keep it and report.
    fn apply_reload(&mut self, result: ApiResult<Vec<Task>>) {
        match result {
            Ok(tasks) => {
                let selected = self.selected_row().map(|r| r.id);
                let today = chrono::Local::now().date_naive();
                self.view = view::render(&tasks, self.theme.mode(), today);
                self.edit = None;
                self.cursor = selected
                    .and_then(|id| self.view.position(id))
                    .unwrap_or_else(|| self.cursor.min(self.view.len().saturating_sub(1)));
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", MSG_LOAD_FAILED);
                self.notifier.error(MSG_LOAD_FAILED);
            }
        }
    }

    // ── Task list operations ────────────────────────────────────────────

    pub fn load(&mut self) {
        self.dispatch(Job::Load);
    }

    /// The backend decides whether the move is valid.
    pub fn move_task(&mut self, id: i64, direction: Direction) {
        self.dispatch(Job::Move { id, direction });
    }

    /// Move the selected row, unless its control is disabled.
    pub fn move_selected(&mut self, direction: Direction) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let enabled = match direction {
            Direction::Up => row.can_move_up,
            Direction::Down => row.can_move_down,
        };
        if enabled {
            let id = row.id;
            self.move_task(id, direction);
        }
    }

    pub fn open_add_form(&mut self) {
        if self.add_form.due_date.value().is_empty() {
            let today = chrono::Local::now().date_naive();
            self.add_form.due_date = Input::new(today.format("%Y-%m-%d").to_string());
        }
        self.add_open = true;
    }

    pub fn close_add_form(&mut self) {
        self.add_open = false;
    }

    /// Validate and submit the add form. The popup stays open with its values
    /// until the backend accepts the task.
    pub fn submit_add(&mut self) {
        let name = task::sanitize_new_name(self.add_form.name.value());
        if name.is_empty() {
            tracing::warn!("add rejected: empty name");
            self.notifier.error(MSG_NAME_REQUIRED);
            return;
        }
        let today = chrono::Local::now().date_naive();
        match task::parse_date(self.add_form.due_date.value()) {
            None => {
                tracing::warn!(due = self.add_form.due_date.value(), "add rejected: bad due date");
                self.notifier.error(MSG_DUE_DATE_INVALID);
                return;
            }
            Some(due) if due < today => {
                tracing::warn!(%due, "add rejected: due date in the past");
                self.notifier.error(MSG_DUE_DATE_PAST);
                return;
            }
            Some(_) => {}
        }
        let payload = self.add_form.payload(name);
        self.dispatch(Job::Create(payload));
    }

    pub fn start_edit(&mut self, id: i64) {
        self.dispatch(Job::FetchForEdit(id));
    }

    /// Cancelling reloads the list, which replaces the inline form.
    pub fn cancel_edit(&mut self) {
        self.load();
    }

    pub fn save_edit(&mut self) {
        let Some(edit) = self.edit.as_ref() else {
            return;
        };
        let name = task::sanitize_edited_name(edit.form.name.value());
        if name.is_empty() {
            tracing::warn!(id = edit.id, "edit rejected: empty name");
            self.notifier.error(MSG_NAME_REQUIRED);
            return;
        }
        let id = edit.id;
        let payload = edit.form.payload(name);
        self.dispatch(Job::Update { id, payload });
    }

    /// Ask for confirmation before deleting `id`.
    pub fn remove(&mut self, id: i64) {
        if let Some(row) = self.view.row(id) {
            let name = row.name.clone();
            self.modal.request(id, name);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.modal.confirm() {
            self.dispatch(Job::Delete(id));
        }
    }

    pub fn cancel_delete(&mut self) {
        self.modal.cancel();
    }

    /// Flip and persist the theme, then restyle the rows already on screen.
    pub fn toggle_theme(&mut self) {
        let mode = self.theme.toggle();
        self.view.apply_expensive_styling(mode);
    }

    // ── Navigation ──────────────────────────────────────────────────────

    pub fn next_item(&mut self) {
        if self.cursor + 1 < self.view.len() {
            self.cursor += 1;
        }
    }

    pub fn prev_item(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id) {
            self.start_edit(id);
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id) {
            self.remove(id);
        }
    }

    // ── Popup key handling ──────────────────────────────────────────────

    /// Keys for the delete confirmation dialog.
    pub fn modal_handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => self.cancel_delete(),
            KeyCode::Char('y') => self.confirm_delete(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.modal.toggle_focus()
            }
            KeyCode::Enter => match self.modal.focus() {
                Some(ModalButton::Confirm) => self.confirm_delete(),
                Some(ModalButton::Cancel) => self.cancel_delete(),
                None => {}
            },
            _ => {}
        }
    }

    pub fn add_form_handle_key(&mut self, key: KeyEvent) {
        if let Some(key) = self.add_form.handle_edit_key(key) {
            match key.code {
                KeyCode::Esc => self.close_add_form(),
                KeyCode::Enter => self.submit_add(),
                _ => {}
            }
        }
    }

    pub fn edit_handle_key(&mut self, key: KeyEvent) {
        let unhandled = match self.edit.as_mut() {
            Some(edit) => edit.form.handle_edit_key(key),
            None => return,
        };
        if let Some(key) = unhandled {
            match key.code {
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Enter => self.save_edit(),
                _ => {}
            }
        }
    }

    /// Keys for the list itself, when no popup or form has focus.
    pub fn list_handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) => self.should_quit = true,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.should_quit = true,

            (KeyModifiers::SHIFT, KeyCode::Up) | (_, KeyCode::Char('K')) => {
                self.move_selected(Direction::Up)
            }
            (KeyModifiers::SHIFT, KeyCode::Down) | (_, KeyCode::Char('J')) => {
                self.move_selected(Direction::Down)
            }
            (_, KeyCode::Up) | (_, KeyCode::Char('k')) => self.prev_item(),
            (_, KeyCode::Down) | (_, KeyCode::Char('j')) => self.next_item(),

            (_, KeyCode::Char('a')) => self.open_add_form(),
            (_, KeyCode::Char('e')) | (_, KeyCode::Enter) => self.edit_selected(),
            (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => self.remove_selected(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('r')) | (_, KeyCode::F(5)) => self.load(),
            (_, KeyCode::Char('?')) | (_, KeyCode::F(1)) => self.show_help = true,
            _ => {}
        }
    }

    /// Route a key to whichever layer currently owns input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.modal.is_open() {
            self.modal_handle_key(key);
        } else if self.show_help {
            self.show_help = false;
        } else if self.add_open {
            self.add_form_handle_key(key);
        } else if self.edit.is_some() {
            self.edit_handle_key(key);
        } else {
            self.list_handle_key(key);
        }
    }

    /// Block until every in-flight job has been applied.
    #[cfg(test)]
    pub fn wait_for_jobs(&mut self) {
        while !self.jobs.is_empty() {
            let handle = self.jobs.remove(0);
            if let Some(completed) = self.join(handle) {
                self.apply_outcome(completed.outcome);
            }
        }
    }
}
