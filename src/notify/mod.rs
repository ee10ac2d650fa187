pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::error::NotifyError;
use std::future::Future;

/// Outbound message channel
pub trait Notifier: Send + Sync {
    fn send_message(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;

    /// Delivery used by test mode
    fn send_test_message(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Prints messages instead of sending them (`--dry-run`)
#[derive(Debug, Clone, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        println!("{}\n", text);
        Ok(())
    }

    async fn send_test_message(&self, text: &str) -> Result<(), NotifyError> {
        println!("[TEST] {}\n", text);
        Ok(())
    }
}
