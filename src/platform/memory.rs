//! In-process collaborators.
//!
//! Each type is a cheap handle over shared state: clone it, hand one clone to
//! a coordinator and keep the other to drive or inspect it.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};
use std::sync::mpsc::Sender;

use crate::error::StoreError;
use crate::theme::ResolvedTheme;
use crate::traits::{PreferenceStore, Router, Subscription, SystemThemeSignal, ThemeSink};

// ============================================================================
// MemoryStore
// ============================================================================

/// Preference store kept in memory for the life of the process.
///
/// Can be switched to "unavailable" to exercise the failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every read and write fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.borrow_mut().unavailable = unavailable;
    }

    /// Raw access to a stored value, bypassing the availability switch.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Seeds a value, bypassing the availability switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.borrow();
        if inner.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.unavailable {
            return Err(StoreError::Unavailable);
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// BroadcastThemeSignal
// ============================================================================

/// OS preference hub: hosts push observed preference values in, subscribers
/// receive every change.
#[derive(Debug, Clone)]
pub struct BroadcastThemeSignal {
    inner: Rc<RefCell<SignalInner>>,
}

#[derive(Debug)]
struct SignalInner {
    prefers_dark: Option<bool>,
    subscribers: Vec<(u64, Sender<bool>)>,
    next_id: u64,
}

impl BroadcastThemeSignal {
    /// A signal currently reporting `prefers_dark`.
    pub fn new(prefers_dark: bool) -> Self {
        Self::with_value(Some(prefers_dark))
    }

    /// A platform without a preference signal.
    pub fn unavailable() -> Self {
        Self::with_value(None)
    }

    fn with_value(prefers_dark: Option<bool>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                prefers_dark,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Records a new OS preference and notifies subscribers if it changed.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let mut inner = self.inner.borrow_mut();
        if inner.prefers_dark == Some(prefers_dark) {
            return;
        }
        inner.prefers_dark = Some(prefers_dark);
        // Receivers that went away without unsubscribing are pruned here.
        inner
            .subscribers
            .retain(|(_, sender)| sender.send(prefers_dark).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl SystemThemeSignal for BroadcastThemeSignal {
    fn query_prefers_dark(&self) -> Option<bool> {
        self.inner.borrow().prefers_dark
    }

    fn subscribe(&mut self, on_change: Sender<bool>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, on_change));
            id
        };

        let weak: Weak<RefCell<SignalInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .subscribers
                    .retain(|(subscriber, _)| *subscriber != id);
            }
        })
    }
}

// ============================================================================
// RecordingSink
// ============================================================================

/// Theme sink that models the document root's class list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Rc<RefCell<SinkInner>>,
}

#[derive(Debug, Default)]
struct SinkInner {
    classes: BTreeSet<ResolvedTheme>,
    transitioning: bool,
    applied: Vec<ResolvedTheme>,
    transitions_begun: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Theme markers currently on the root, in a stable order.
    pub fn active_classes(&self) -> Vec<ResolvedTheme> {
        self.inner.borrow().classes.iter().copied().collect()
    }

    /// The single active theme marker, if exactly one is present.
    pub fn active_theme(&self) -> Option<ResolvedTheme> {
        let inner = self.inner.borrow();
        match inner.classes.len() {
            1 => inner.classes.iter().next().copied(),
            _ => None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.borrow().transitioning
    }

    /// Every theme applied so far, in order.
    pub fn applied(&self) -> Vec<ResolvedTheme> {
        self.inner.borrow().applied.clone()
    }

    pub fn transitions_begun(&self) -> usize {
        self.inner.borrow().transitions_begun
    }
}

impl ThemeSink for RecordingSink {
    fn apply_theme_class(&mut self, theme: ResolvedTheme) {
        let mut inner = self.inner.borrow_mut();
        inner.classes.clear();
        inner.classes.insert(theme);
        inner.applied.push(theme);
    }

    fn begin_transition_marker(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.transitioning = true;
        inner.transitions_begun += 1;
    }

    fn end_transition_marker(&mut self) {
        self.inner.borrow_mut().transitioning = false;
    }
}

// ============================================================================
// RecordingRouter
// ============================================================================

/// Router that only records the paths it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingRouter {
    pushes: Rc<RefCell<Vec<String>>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.borrow().len()
    }
}

impl Router for RecordingRouter {
    fn push(&mut self, path: &str) {
        self.pushes.borrow_mut().push(path.to_string());
    }
}
