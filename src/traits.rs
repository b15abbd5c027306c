//! Collaborator contracts consumed by the coordinators.
//!
//! The coordinators never talk to a window, a document or a router directly.
//! Hosts hand them implementations of these traits at construction time; the
//! [`platform`](crate::platform) module carries headless implementations that
//! tests and non-GUI hosts can use as-is.

use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::error::StoreError;
use crate::theme::ResolvedTheme;

// ============================================================================
// Durable key-value storage
// ============================================================================

/// Durable string key-value storage.
///
/// Writes overwrite (last write wins). Failures are reported, but callers in
/// this crate treat them as non-fatal.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ============================================================================
// OS theme preference signal
// ============================================================================

/// The host platform's "prefers dark color scheme" signal.
pub trait SystemThemeSignal {
    /// Current OS preference. `None` when the platform exposes no such signal.
    fn query_prefers_dark(&self) -> Option<bool>;

    /// Registers `on_change` to receive every subsequent preference change.
    ///
    /// Dropping (or cancelling) the returned [`Subscription`] unregisters it.
    fn subscribe(&mut self, on_change: Sender<bool>) -> Subscription;
}

/// Handle for an active [`SystemThemeSignal`] subscription.
///
/// Unsubscribes exactly once, either through [`cancel`](Self::cancel) or on drop.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps the callback that tears the registration down.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Unregisters now instead of waiting for drop.
    pub fn cancel(mut self) {
        self.run_unsubscribe();
    }

    fn run_unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

// ============================================================================
// Document theme marker sink
// ============================================================================

/// Applies the resolved theme to whatever is being rendered.
///
/// Implementations must keep exactly one of the light/dark markers active:
/// `apply_theme_class` replaces the previous marker. The transition marker
/// calls may be repeated; ending an already-ended transition is a no-op.
pub trait ThemeSink {
    fn apply_theme_class(&mut self, theme: ResolvedTheme);

    /// Marks the start of a theme swap so visual transitions can be suppressed.
    fn begin_transition_marker(&mut self);

    fn end_transition_marker(&mut self);
}

// ============================================================================
// Router
// ============================================================================

/// External router that owns the displayed location.
///
/// Completion is reported back asynchronously through
/// [`NavigationCoordinator::on_location_settled`](crate::NavigationCoordinator::on_location_settled).
pub trait Router {
    fn push(&mut self, path: &str);
}

// ============================================================================
// Clock
// ============================================================================

/// Monotonic time source used to schedule fixed-delay bookkeeping.
///
/// Values are offsets from an arbitrary, fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}
