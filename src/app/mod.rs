// ABOUTME: Main application structure and state management for the TUI

pub mod actions;
pub mod events;
pub mod forms;
pub mod notification;
pub mod state;

pub use actions::{Action, ActionOutcome, Dispatcher, OutputRegion};
pub use events::{AppEvent, EventHandler};
pub use notification::{Notification, NotificationCenter, Severity};
pub use state::{App, AppState};
