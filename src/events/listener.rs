use async_trait::async_trait;

use super::TeamEvent;

/// Receives every dispatched [`TeamEvent`].
///
/// Match on the variant to react to specific events.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &TeamEvent);
}
