use std::sync::{Arc, Mutex};

/// Receives the recoverable conditions raised while parsing rule files and
/// evaluating observations.
pub trait FilterLog: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl FilterLog for LogFacade {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

pub fn default_log() -> Arc<dyn FilterLog> {
    Arc::new(LogFacade)
}

/// Keeps every warning in memory, mainly so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FilterLog for RecordingLog {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
