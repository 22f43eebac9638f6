use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chartalert::port::AlertNotifier;

/// Thread-safe message collector for delivery assertions in tests.
#[derive(Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    succeed: bool,
}

impl RecordingNotifier {
    /// A notifier that records messages and reports successful delivery.
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            succeed: true,
        }
    }

    /// A notifier that records messages but reports delivery failure.
    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::new()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock recorded messages").clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().expect("lock recorded messages").len()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn deliver(&self, message: &str) -> bool {
        self.messages
            .lock()
            .expect("lock recorded messages")
            .push(message.to_string());
        self.succeed
    }
}
