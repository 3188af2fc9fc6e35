//! Team lifecycle events.
//!
//! Actions fire events after every successful mutation. Without registered
//! listeners they are dropped.
//!
//! ```rust,ignore
//! use teamwork::register_event_listeners;
//! use teamwork::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Custom listeners implement [`Listener`]:
//!
//! ```rust,ignore
//! use teamwork::events::{Listener, TeamEvent};
//! use async_trait::async_trait;
//!
//! struct SeatCounter;
//!
//! #[async_trait]
//! impl Listener for SeatCounter {
//!     async fn handle(&self, event: &TeamEvent) {
//!         if let TeamEvent::MemberAdded { team_id, .. } = event {
//!             // bump the seat count for team_id
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::TeamEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
