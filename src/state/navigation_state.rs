//! Route transition state.
//!
//! This module tracks whether a page transition is in flight, where it is
//! heading, and which location is believed to be displayed.

/// State of the current route transition.
///
/// Responsibilities:
/// - Tracking the location the shell believes is displayed
/// - Tracking the in-flight target, if any
///
/// Invariant: while `in_flight` is true, `target_path` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Whether a transition is pending
    in_flight: bool,
    /// Last location believed to be displayed
    current_path: String,
    /// Location the pending transition is heading to
    target_path: Option<String>,
}

impl NavigationState {
    /// Creates an idle state showing `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            in_flight: false,
            current_path: initial_path.into(),
            target_path: None,
        }
    }

    // ===== Queries =====

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn target_path(&self) -> Option<&str> {
        self.target_path.as_deref()
    }

    /// Returns true if navigating to `path` would change nothing: it is
    /// already displayed or already being navigated to.
    pub fn is_redundant(&self, path: &str) -> bool {
        path == self.current_path || self.target_path.as_deref() == Some(path)
    }

    // ===== Mutations =====

    /// Starts (or retargets) a transition towards `path`.
    pub fn begin(&mut self, path: &str) {
        self.in_flight = true;
        self.target_path = Some(path.to_string());
    }

    /// Records the displayed location without touching the in-flight flag.
    pub fn set_current_path(&mut self, path: &str) {
        self.current_path = path.to_string();
    }

    /// Ends any transition. Repeating it is harmless.
    pub fn finish(&mut self) {
        self.in_flight = false;
        self.target_path = None;
    }
}
