//! Notification sink for headless use. Logs notifications to tracing output.

use async_trait::async_trait;
use callops_application::{Notification, NotificationKind, NotificationSink};
use tracing::{info, warn};

/// Notification sink that writes every notification to the log.
#[derive(Clone)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    /// Creates a new tracing notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(text = %notification.message, "notification"),
            NotificationKind::Failure => warn!(text = %notification.message, "notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use callops_application::{Notification, NotificationSink};

    use super::TracingNotificationSink;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        }
    }

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::other("log buffer poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn notification_text_is_logged_once_as_a_field() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        TracingNotificationSink::new()
            .notify(Notification::success("Role 'Agent' created"))
            .await;

        let contents = log.contents();
        assert!(contents.contains("notification"));
        assert_eq!(contents.matches("Role 'Agent' created").count(), 1);
        assert!(contents.contains("text=Role 'Agent' created"));
    }
}
