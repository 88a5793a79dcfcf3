/// Which dialog button has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalButton {
    Cancel,
    Confirm,
}

/// Delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmationModal {
    #[default]
    Closed,
    Open {
        pending_id: i64,
        task_name: String,
        focus: ModalButton,
    },
}

impl ConfirmationModal {
    /// Open for `id`, replacing any pending id. Focus starts on Cancel.
    pub fn request(&mut self, id: i64, task_name: impl Into<String>) {
        *self = ConfirmationModal::Open {
            pending_id: id,
            task_name: task_name.into(),
            focus: ModalButton::Cancel,
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmationModal::Open { .. })
    }

    pub fn pending_id(&self) -> Option<i64> {
        match self {
            ConfirmationModal::Open { pending_id, .. } => Some(*pending_id),
            ConfirmationModal::Closed => None,
        }
    }

    /// Prompt text with the task name quoted.
    pub fn prompt(&self) -> Option<String> {
        match self {
            ConfirmationModal::Open { task_name, .. } => {
                Some(format!("Excluir a tarefa \"{}\"?", task_name))
            }
            ConfirmationModal::Closed => None,
        }
    }

    pub fn toggle_focus(&mut self) {
        if let ConfirmationModal::Open { focus, .. } = self {
            *focus = match focus {
                ModalButton::Cancel => ModalButton::Confirm,
                ModalButton::Confirm => ModalButton::Cancel,
            };
        }
    }

    pub fn focus(&self) -> Option<ModalButton> {
        match self {
            ConfirmationModal::Open { focus, .. } => Some(*focus),
            ConfirmationModal::Closed => None,
        }
    }

    /// Close and hand back the id to delete. `None` when nothing was pending.
    pub fn confirm(&mut self) -> Option<i64> {
        let id = self.pending_id();
        *self = ConfirmationModal::Closed;
        id
    }

    pub fn cancel(&mut self) {
        *self = ConfirmationModal::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_opens_with_cancel_focused() {
        let mut modal = ConfirmationModal::default();
        modal.request(4, "Comprar");
        assert_eq!(modal.pending_id(), Some(4));
        assert_eq!(modal.focus(), Some(ModalButton::Cancel));
        assert_eq!(modal.prompt().as_deref(), Some("Excluir a tarefa \"Comprar\"?"));
    }

    #[test]
    fn test_reopen_overwrites_pending() {
        let mut modal = ConfirmationModal::default();
        modal.request(1, "Um");
        modal.toggle_focus();
        modal.request(2, "Dois");
        assert_eq!(modal.pending_id(), Some(2));
        assert_eq!(modal.focus(), Some(ModalButton::Cancel));
    }

    #[test]
    fn test_confirm_returns_id_and_closes() {
        let mut modal = ConfirmationModal::default();
        modal.request(7, "Sete");
        assert_eq!(modal.confirm(), Some(7));
        assert!(!modal.is_open());
        assert_eq!(modal.confirm(), None);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut modal = ConfirmationModal::default();
        modal.request(7, "Sete");
        modal.cancel();
        assert_eq!(modal, ConfirmationModal::Closed);
        assert_eq!(modal.pending_id(), None);
    }
}
