use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::{diagnostics::report::DiagnosticsReport, scene::item::SceneItem};

/// Default time between diagnostics collection windows.
pub const SEND_DIAGNOSTICS_INTERVAL: Duration = Duration::from_secs(10);

/// Source type identifier of the overlay itself.
pub const OVERLAY_SOURCE_TYPE: &str = "hudguard_overlay";

/// Kinds of data a diagnostics window can request from the render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticsKind {
    /// Names of sources that hit at least one region.
    HitSourceNames,
}

#[derive(Debug, Default)]
struct State {
    elapsed: Duration,
    waiting: BTreeMap<DiagnosticsKind, bool>,
    queued: bool,
    hit_source_names: Vec<String>,
    scene_has_validator: bool,
}

/// Single-slot mailbox between the render thread and the diagnostics worker.
///
/// The worker opens a window with [`Diagnostics::tick`]; the render pass checks
/// [`Diagnostics::needs`] before collecting names and hands them over with
/// [`Diagnostics::push_hit_source_names`]. Only the latest push survives.
#[derive(Debug)]
pub struct Diagnostics {
    interval: Duration,
    state: Mutex<State>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(SEND_DIAGNOSTICS_INTERVAL)
    }
}

impl Diagnostics {
    /// Mailbox opening a window every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance the window clock.
    ///
    /// Once more than the interval has elapsed, pending requests are dropped and, when streaming
    /// to the selected service, [`DiagnosticsKind::HitSourceNames`] is requested again.
    pub fn tick(&self, elapsed: Duration, streaming_active: bool, service_selected: bool) {
        let mut st = self.lock();
        st.elapsed += elapsed;
        if st.elapsed <= self.interval {
            return;
        }
        st.elapsed = Duration::ZERO;
        st.waiting.clear();

        if !streaming_active || !service_selected {
            return;
        }
        st.waiting.insert(DiagnosticsKind::HitSourceNames, true);
        tracing::trace!("requested hit source names");
    }

    /// Whether the render pass should collect data of `kind`.
    pub fn needs(&self, kind: DiagnosticsKind) -> bool {
        self.lock().waiting.get(&kind).copied().unwrap_or(false)
    }

    /// Deliver names collected during one full scene traversal.
    pub fn push_hit_source_names(&self, names: Vec<String>) {
        let mut st = self.lock();
        st.hit_source_names = names;
        st.waiting.insert(DiagnosticsKind::HitSourceNames, false);
    }

    /// Record whether the live scene contains an overlay instance.
    pub fn set_scene_has_validator(&self, has: bool) {
        self.lock().scene_has_validator = has;
    }

    /// Scan the top level of `items` for an overlay instance and record the result.
    pub fn observe_scene(&self, items: &[SceneItem]) {
        let has = items.iter().any(|i| i.source_type == OVERLAY_SOURCE_TYPE);
        self.set_scene_has_validator(has);
    }

    /// Take the report once every requested kind has been delivered.
    ///
    /// Returns `None` while nothing was requested, data is outstanding, or an earlier report is
    /// still in flight. The report stays in flight until [`Diagnostics::complete`].
    pub fn take_ready(&self) -> Option<DiagnosticsReport> {
        let mut st = self.lock();
        if st.queued || st.waiting.is_empty() || st.waiting.values().any(|w| *w) {
            return None;
        }
        st.queued = true;
        let names = std::mem::take(&mut st.hit_source_names);
        Some(DiagnosticsReport::new(!st.scene_has_validator, names))
    }

    /// Mark the in-flight report as delivered (or failed) and reset the window.
    pub fn complete(&self) {
        let mut st = self.lock();
        st.queued = false;
        st.waiting.clear();
    }

    /// Whether a report is in flight.
    pub fn is_queued(&self) -> bool {
        self.lock().queued
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagnostics/mailbox.rs"]
mod tests;
