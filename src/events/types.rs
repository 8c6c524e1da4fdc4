//! Application events for inter-thread communication.
//!
//! These events are published by the tray icon thread and handled on the
//! UI thread. This module is pure Rust with no FFI dependencies, making it
//! fully testable.

/// Requests the tray thread hands to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Show the control panel again and remove the tray icon.
    RestorePanel,

    /// Save settings and exit, exactly like closing the control panel.
    Quit,
}

impl AppEvent {
    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::RestorePanel => "Restore control panel",
            AppEvent::Quit => "Quit application",
        }
    }

    /// Returns true if handling this event ends the application.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppEvent::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_quit_is_terminal() {
        assert!(AppEvent::Quit.is_terminal());
        assert!(!AppEvent::RestorePanel.is_terminal());
    }

    #[test]
    fn test_event_equality() {
        assert_eq!(AppEvent::Quit, AppEvent::Quit);
        assert_ne!(AppEvent::Quit, AppEvent::RestorePanel);
    }

    #[test]
    fn test_event_debug() {
        assert_eq!(format!("{:?}", AppEvent::RestorePanel), "RestorePanel");
    }

    #[test]
    fn test_all_events_have_descriptions() {
        for event in [AppEvent::RestorePanel, AppEvent::Quit] {
            assert!(!event.description().is_empty());
        }
    }
}
