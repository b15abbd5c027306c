//! Page transition coordination.
//!
//! Owns the single "is the app navigating" flag that drives the progress
//! indicator, and filters out navigations to the page already shown or
//! already being navigated to.

use std::rc::Rc;
use std::time::Duration;

use crate::config::NavigationConfig;
use crate::scheduler::DeferredQueue;
use crate::state::NavigationState;
use crate::traits::{Clock, Router};

#[derive(Debug)]
enum NavigationTask {
    /// The router reported `path`; record it unless a later location was
    /// reported, and finish the transition unless a newer request was issued.
    Settle {
        path: String,
        generation: u64,
        location: u64,
    },
    /// Force-clear a transition that never settled.
    Timeout { generation: u64 },
}

/// Coordinates route transitions against an external router.
///
/// Requests arrive on the UI thread; the newest request always wins and
/// nothing is queued. Settlement is reported by the host through
/// [`on_location_settled`](Self::on_location_settled) and completes after the
/// configured settle delay, fired from [`poll`](Self::poll).
pub struct NavigationCoordinator {
    state: NavigationState,
    router: Box<dyn Router>,
    clock: Rc<dyn Clock>,
    timers: DeferredQueue<NavigationTask>,
    /// Bumped on every request that reaches the router and whenever a
    /// transition is ended early.
    generation: u64,
    /// Bumped on every location report.
    location: u64,
    settle_delay: Duration,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for NavigationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationCoordinator")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("location", &self.location)
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl NavigationCoordinator {
    /// Creates an idle coordinator showing `config.initial_path`.
    pub fn new(router: Box<dyn Router>, clock: Rc<dyn Clock>, config: &NavigationConfig) -> Self {
        Self {
            state: NavigationState::new(config.initial_path.as_str()),
            router,
            clock,
            timers: DeferredQueue::new(),
            generation: 0,
            location: 0,
            settle_delay: config.settle_delay(),
            timeout: config.timeout(),
        }
    }

    // ===== Queries =====

    pub fn is_navigating(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    pub fn target_path(&self) -> Option<&str> {
        self.state.target_path()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Earliest pending settle/timeout deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    // ===== Requests =====

    /// Navigates to `path` unless it is already displayed or already the
    /// in-flight target.
    ///
    /// Returns true if the router was asked to change location.
    pub fn request_navigate(&mut self, path: &str) -> bool {
        if self.state.is_redundant(path) {
            log::debug!("Navigation to {} skipped (already current or pending)", path);
            return false;
        }

        if let Some(previous) = self.state.target_path() {
            log::debug!("Navigation to {} superseded by {}", previous, path);
        }

        self.generation += 1;
        self.state.begin(path);
        log::debug!("Navigating {} -> {}", self.state.current_path(), path);

        self.schedule_timeout();
        self.router.push(path);
        true
    }

    /// Reports that the displayed location is now `path`.
    ///
    /// During a transition the in-flight flag clears after the settle delay;
    /// otherwise (back/forward, redirects outside the coordinator) only the
    /// current path is updated.
    pub fn on_location_settled(&mut self, path: &str) {
        self.location += 1;

        if !self.state.is_in_flight() {
            self.state.set_current_path(path);
            return;
        }

        if path == self.state.current_path() {
            return;
        }

        let due = self.clock.now() + self.settle_delay;
        self.timers.schedule(
            due,
            NavigationTask::Settle {
                path: path.to_string(),
                generation: self.generation,
                location: self.location,
            },
        );
    }

    /// Ends any in-flight transition immediately. Harmless when idle.
    ///
    /// Pending settle tasks may still record the location they observed, but
    /// none of them will end a later transition.
    pub fn complete_navigation(&mut self) {
        if self.state.is_in_flight() {
            log::debug!("Navigation completed manually");
            self.end_early();
        }
    }

    /// Starts the progress indicator without asking the router to move, for
    /// work that is not tied to a route change.
    ///
    /// Ends through [`complete_navigation`](Self::complete_navigation) or the
    /// configured timeout. Returns false if a transition is already in flight.
    pub fn start_navigation(&mut self) -> bool {
        if self.state.is_in_flight() {
            return false;
        }

        self.generation += 1;
        let current = self.state.current_path().to_string();
        self.state.begin(&current);
        log::debug!("Progress started at {}", current);
        self.schedule_timeout();
        true
    }

    /// Fires due settle and timeout tasks.
    pub fn poll(&mut self) {
        for task in self.timers.take_due(self.clock.now()) {
            match task {
                NavigationTask::Settle {
                    path,
                    generation,
                    location,
                } => {
                    if location == self.location {
                        self.state.set_current_path(&path);
                    }
                    if generation == self.generation && self.state.is_in_flight() {
                        self.state.finish();
                        log::debug!("Navigation settled at {}", path);
                    }
                }
                NavigationTask::Timeout { generation } => {
                    if generation == self.generation && self.state.is_in_flight() {
                        log::warn!(
                            "Navigation to {} did not settle in time, clearing progress",
                            self.state.target_path().unwrap_or_default()
                        );
                        self.end_early();
                    }
                }
            }
        }
    }

    fn schedule_timeout(&mut self) {
        if let Some(timeout) = self.timeout {
            let due = self.clock.now() + timeout;
            self.timers.schedule(
                due,
                NavigationTask::Timeout {
                    generation: self.generation,
                },
            );
        }
    }

    /// Finishes the transition and retires every task scheduled for it.
    fn end_early(&mut self) {
        self.generation += 1;
        self.state.finish();
    }
}
