use std::sync::OnceLock;

use super::{Listener, TeamEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Process-wide list of listeners, filled once by
/// [`register_event_listeners`].
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listeners run in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn dispatch(&self, event: &TeamEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Installs the process-wide listeners. Only the first call takes effect;
/// later calls log a warning and are ignored.
///
/// ```rust,ignore
/// use teamwork::register_event_listeners;
/// use teamwork::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "teamwork",
            "msg=\"register_event_listeners called more than once, ignoring\""
        );
    }
}

/// Sends `event` to every registered listener. No-op before registration.
pub async fn dispatch(event: TeamEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
