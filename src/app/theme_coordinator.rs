//! Theme resolution, application and persistence.
//!
//! Reconciles the user's explicit mode with the OS preference, applies the
//! result to the rendered surface and persists the mode across sessions.

use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use crate::config::ThemeConfig;
use crate::error::InvalidModeError;
use crate::scheduler::DeferredQueue;
use crate::state::ThemePreference;
use crate::theme::{ResolvedTheme, ThemeMode};
use crate::traits::{Clock, PreferenceStore, Subscription, SystemThemeSignal, ThemeSink};

/// Observable engine state: nothing rendered yet, or the rendered theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Light,
    Dark,
}

impl From<ResolvedTheme> for EngineState {
    fn from(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Light => EngineState::Light,
            ResolvedTheme::Dark => EngineState::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Loaded,
    Mounted,
}

#[derive(Debug)]
enum ThemeTask {
    EndTransition,
}

/// Live OS preference subscription and the channel its events arrive on.
struct SystemWatch {
    _subscription: Subscription,
    events: Receiver<bool>,
}

/// Single source of truth for the rendered theme.
///
/// Lifecycle:
/// 1. [`initialize`](Self::initialize) loads the persisted mode (no side effects)
/// 2. [`mount`](Self::mount) resolves, applies, and subscribes to the OS signal
///    while the mode is `system`
/// 3. [`poll`](Self::poll) is called regularly to deliver OS changes and end
///    transition markers
/// 4. [`unmount`](Self::unmount) drops the OS subscription
pub struct ThemePreferenceEngine {
    preference: ThemePreference,
    phase: Phase,
    store: Box<dyn PreferenceStore>,
    signal: Box<dyn SystemThemeSignal>,
    sink: Box<dyn ThemeSink>,
    clock: Rc<dyn Clock>,
    timers: DeferredQueue<ThemeTask>,
    watch: Option<SystemWatch>,
    storage_key: String,
    transition_delay: Duration,
}

impl std::fmt::Debug for ThemePreferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreferenceEngine")
            .field("preference", &self.preference)
            .field("phase", &self.phase)
            .field("subscribed", &self.watch.is_some())
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl ThemePreferenceEngine {
    pub fn new(
        store: Box<dyn PreferenceStore>,
        signal: Box<dyn SystemThemeSignal>,
        sink: Box<dyn ThemeSink>,
        clock: Rc<dyn Clock>,
        config: &ThemeConfig,
    ) -> Self {
        Self {
            preference: ThemePreference::default(),
            phase: Phase::Uninitialized,
            store,
            signal,
            sink,
            clock,
            timers: DeferredQueue::new(),
            watch: None,
            storage_key: config.storage_key.clone(),
            transition_delay: config.transition_delay(),
        }
    }

    // ===== Lifecycle =====

    /// Loads the persisted mode.
    ///
    /// Falls back to `system` when nothing usable is stored. When storage
    /// cannot be read the in-memory mode is kept. Applies nothing before
    /// [`mount`](Self::mount); on a mounted engine the reloaded mode is
    /// re-applied.
    pub fn initialize(&mut self) -> ThemePreference {
        let mode = self.load_mode().unwrap_or_else(|| self.preference.mode());
        self.preference.set_mode(mode);
        log::debug!("Theme preference loaded: mode={}", mode);

        if self.phase == Phase::Mounted {
            self.sync_subscription();
            self.recompute();
        } else {
            self.phase = Phase::Loaded;
        }
        self.preference
    }

    /// Resolves and applies the theme for the first time, subscribing to the
    /// OS preference if the mode is `system`.
    ///
    /// Initializes first if needed. Mounting again re-applies.
    pub fn mount(&mut self) {
        if self.phase == Phase::Uninitialized {
            self.initialize();
        }
        self.phase = Phase::Mounted;
        self.sync_subscription();
        self.recompute();
    }

    /// Drops the OS subscription. The resolved theme stays as it was.
    pub fn unmount(&mut self) {
        if self.watch.take().is_some() {
            log::debug!("Theme engine unmounted, OS subscription dropped");
        }
        if self.phase == Phase::Mounted {
            self.phase = Phase::Loaded;
        }
    }

    // ===== Queries =====

    pub fn mode(&self) -> ThemeMode {
        self.preference.mode()
    }

    /// The rendered theme. Dark until the first resolution.
    pub fn resolved(&self) -> ResolvedTheme {
        self.preference.resolved()
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    pub fn state(&self) -> EngineState {
        match self.phase {
            Phase::Mounted => self.preference.resolved().into(),
            Phase::Uninitialized | Phase::Loaded => EngineState::Uninitialized,
        }
    }

    /// Whether an OS preference subscription is currently held.
    pub fn is_following_system(&self) -> bool {
        self.watch.is_some()
    }

    /// Earliest pending transition-marker deadline, for hosts that sleep
    /// between polls.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    // ===== Mutations =====

    /// Selects a mode, persists it and re-applies the theme.
    ///
    /// Before mount only the mode is recorded; it is applied at mount and
    /// takes precedence over whatever storage holds.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        log::debug!("Theme mode set: {} -> {}", self.preference.mode(), mode);
        self.preference.set_mode(mode);
        self.persist_mode(mode);

        match self.phase {
            Phase::Mounted => {
                self.sync_subscription();
                self.recompute();
            }
            Phase::Uninitialized => self.phase = Phase::Loaded,
            Phase::Loaded => {}
        }
    }

    /// Selects a mode by its literal name.
    ///
    /// Unknown names are logged and rejected; the current mode is kept.
    pub fn set_mode_named(&mut self, name: &str) -> Result<(), InvalidModeError> {
        match name.parse::<ThemeMode>() {
            Ok(mode) => {
                self.set_mode(mode);
                Ok(())
            }
            Err(err) => {
                log::warn!("Ignoring theme change: {}", err);
                Err(err)
            }
        }
    }

    /// Handles an OS preference change. Ignored unless the mode is `system`
    /// and the engine is mounted.
    pub fn on_system_theme_changed(&mut self, prefers_dark: bool) {
        if self.phase != Phase::Mounted || !self.preference.follows_system() {
            log::debug!("OS theme change ignored (mode={})", self.preference.mode());
            return;
        }
        let theme = self.preference.resolve(Some(prefers_dark));
        log::debug!("OS theme changed, resolved={}", theme);
        self.apply(theme);
    }

    /// Delivers queued OS changes and ends due transition markers.
    pub fn poll(&mut self) {
        let events: Vec<bool> = match &self.watch {
            Some(watch) => watch.events.try_iter().collect(),
            None => Vec::new(),
        };
        for prefers_dark in events {
            self.on_system_theme_changed(prefers_dark);
        }

        for task in self.timers.take_due(self.clock.now()) {
            match task {
                ThemeTask::EndTransition => self.sink.end_transition_marker(),
            }
        }
    }

    // ===== Internals =====

    /// Stored mode, `system` for a missing or unknown value, `None` when the
    /// store cannot be read.
    fn load_mode(&self) -> Option<ThemeMode> {
        match self.store.get(&self.storage_key) {
            Ok(Some(value)) => Some(value.parse().unwrap_or_else(|err: InvalidModeError| {
                log::debug!("Discarding stored theme: {}", err);
                ThemeMode::default()
            })),
            Ok(None) => Some(ThemeMode::default()),
            Err(err) => {
                log::warn!("Failed to read theme preference: {}", err);
                None
            }
        }
    }

    fn persist_mode(&mut self, mode: ThemeMode) {
        if let Err(err) = self.store.set(&self.storage_key, mode.as_str()) {
            log::warn!("Failed to persist theme preference: {}", err);
        }
    }

    /// Holds exactly one OS subscription while the mode is `system`, none otherwise.
    fn sync_subscription(&mut self) {
        match (self.preference.follows_system(), self.watch.is_some()) {
            (true, false) => {
                let (sender, events) = channel();
                let subscription = self.signal.subscribe(sender);
                self.watch = Some(SystemWatch {
                    _subscription: subscription,
                    events,
                });
                log::debug!("Subscribed to OS theme changes");
            }
            (false, true) => {
                self.watch = None;
                log::debug!("Unsubscribed from OS theme changes");
            }
            _ => {}
        }
    }

    fn recompute(&mut self) {
        let os_prefers_dark = if self.preference.follows_system() {
            self.signal.query_prefers_dark()
        } else {
            None
        };
        let theme = self.preference.resolve(os_prefers_dark);
        self.apply(theme);
    }

    /// Swaps the theme marker inside a transition marker that ends after the
    /// configured delay.
    fn apply(&mut self, theme: ResolvedTheme) {
        self.sink.begin_transition_marker();
        self.sink.apply_theme_class(theme);
        let due = self.clock.now() + self.transition_delay;
        self.timers.schedule(due, ThemeTask::EndTransition);
    }
}
