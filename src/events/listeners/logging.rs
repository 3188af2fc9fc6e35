use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Writes every event through the `log` facade.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Logs at INFO.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &TeamEvent) {
        log::log!(
            target: "teamwork::events",
            self.level,
            "event={} at={} {:?}",
            event.name(),
            event.timestamp().to_rfc3339(),
            event
        );
    }
}
