//! User-facing notices and confirmation prompts.

/// Blocking alerts and yes/no confirmation, provided by the host UI.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Show a failure notice the user has to acknowledge.
    fn alert(&self, message: &str);

    /// Ask the user a yes/no question. `true` means proceed.
    async fn confirm(&self, message: &str) -> bool;
}

/// Headless notifier: alerts go to the log, confirmations get a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    answer: bool,
}

impl LogNotifier {
    /// Confirm every prompt.
    pub fn approving() -> Self {
        Self { answer: true }
    }

    /// Decline every prompt.
    pub fn declining() -> Self {
        Self { answer: false }
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!("alert: {message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        tracing::info!("confirm: {message} -> {}", self.answer);
        self.answer
    }
}
