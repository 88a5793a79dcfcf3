use std::time::{Duration, Instant};

/// How long a toast stays on screen after the latest `notify`.
pub const DISPLAY_FOR: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

/// Single-slot transient status message. A new notice replaces the current
/// one and restarts its display window.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn notify(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notify_at(message, kind, Instant::now());
    }

    pub fn notify_at(&mut self, message: impl Into<String>, kind: NoticeKind, now: Instant) {
        let message = message.into();
        tracing::debug!(?kind, %message, "notify");
        self.current = Some(Notice {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Error);
    }

    /// The notice still inside its display window, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < DISPLAY_FOR)
    }

    /// Drop an expired notice (call each tick).
    pub fn tick(&mut self, now: Instant) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_after_delay() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.notify_at("Tarefa adicionada com sucesso", NoticeKind::Success, start);

        assert!(notifier.visible(start + Duration::from_millis(2999)).is_some());
        assert!(notifier.visible(start + DISPLAY_FOR).is_none());

        notifier.tick(start + DISPLAY_FOR);
        assert!(notifier.latest().is_none());
    }

    #[test]
    fn test_later_call_wins_and_restarts_window() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.notify_at("primeira", NoticeKind::Success, start);
        let second = start + Duration::from_millis(2000);
        notifier.notify_at("segunda", NoticeKind::Error, second);

        // The first notice's deadline must not hide the second one.
        let shown = notifier
            .visible(start + Duration::from_millis(3500))
            .unwrap();
        assert_eq!(shown.message, "segunda");
        assert_eq!(shown.kind, NoticeKind::Error);
        assert!(notifier.visible(second + DISPLAY_FOR).is_none());
    }
}
