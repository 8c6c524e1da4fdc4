//! Event hand-off between the tray thread and the UI thread.
//!
//! The tray icon runs its own message loop on a worker thread. It never
//! touches configuration; it only publishes [`AppEvent`]s and wakes the UI
//! thread, which drains the bus and acts on them.
//!
//! ```text
//! ┌─────────────┐  publish()  ┌──────────┐  drain()  ┌──────────────┐
//! │ Tray thread │ ──────────▶ │ EventBus │ ────────▶ │  UI thread   │
//! └─────────────┘             └──────────┘           └──────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`AppEvent` enum)
//! - [`bus`]: `EventBus` and `EventPublisher` types

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use types::AppEvent;
