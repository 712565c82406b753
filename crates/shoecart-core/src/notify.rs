//! User-facing notifications.

use std::sync::Mutex;

/// Displays transient messages to the user. Fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Show an error message.
    fn report_error(&self, message: &str);

    /// Show a success message. Ignored unless the host renders them.
    fn report_success(&self, _message: &str) {}
}

/// Notifier that writes messages to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        tracing::error!(target: "shoecart::notify", "{}", message);
    }

    fn report_success(&self, message: &str) {
        tracing::info!(target: "shoecart::notify", "{}", message);
    }
}

/// A message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Success(String),
}

/// Notifier that keeps every message, for hosts that render a message list
/// and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages so far, oldest first.
    pub fn messages(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Error messages so far, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m.clone()),
                Notification::Success(_) => None,
            })
            .collect()
    }

    /// Remove and return all messages.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.lock().push(Notification::Error(message.to_string()));
    }

    fn report_success(&self, message: &str) {
        self.lock().push(Notification::Success(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.report_error("falhou");
        notifier.report_success("ok");

        assert_eq!(notifier.errors(), vec!["falhou"]);
        assert_eq!(notifier.messages().len(), 2);

        let taken = notifier.take();
        assert_eq!(taken[1], Notification::Success("ok".into()));
        assert!(notifier.messages().is_empty());
    }
}
