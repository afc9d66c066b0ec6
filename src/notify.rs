use std::cell::RefCell;

/// Shows short, non-blocking messages to the user
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Reports notifications through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "notification", "{}", message);
    }
}

/// Keeps notifications in memory, for callers that render them later
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: RefCell<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        CollectingNotifier::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
