use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Emits every event as a `tracing` event.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &TeamEvent) {
        tracing::info!(
            target: "teamwork::events",
            event_name = event.name(),
            ?event,
            "team event"
        );
    }
}
