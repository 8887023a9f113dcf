//! Scroll-to-bottom detection.
//!
//! The renderer reports what it sees; the trigger decides whether that
//! warrants loading the next page. Two strategies are offered and behave
//! the same way from the collection's point of view.

use crate::collection::{LoadOutcome, PagedCollection, PagingFlags};
use crate::source::{Identified, PageSource};

/// Default distance from the bottom, in pixels, that still counts as
/// "at the bottom".
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Scroll geometry of the container holding a list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, viewport_height: f64, content_height: f64) -> Self {
        Self { scroll_top, viewport_height, content_height }
    }

    pub fn at_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_top + threshold >= self.content_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerStrategy {
    /// A sentinel element after the last item reports visibility changes.
    Sentinel,
    /// The container reports its scroll geometry.
    Offset { threshold: f64 },
}

impl Default for TriggerStrategy {
    fn default() -> Self {
        TriggerStrategy::Offset { threshold: DEFAULT_THRESHOLD }
    }
}

/// What the renderer observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    Visibility(bool),
    Scroll(Viewport),
}

/// Edge-triggered "load more" detector.
///
/// Fires once per arrival at the bottom. After firing it stays disarmed
/// until [`rearm`](Self::rearm) is called, which [`drive`](Self::drive)
/// does when the load it started completes.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    strategy: TriggerStrategy,
    armed: bool,
    /// Last visibility reported to a sentinel trigger.
    visible: bool,
}

impl ScrollTrigger {
    pub fn new(strategy: TriggerStrategy) -> Self {
        Self { strategy, armed: true, visible: false }
    }

    pub fn sentinel() -> Self {
        Self::new(TriggerStrategy::Sentinel)
    }

    pub fn offset(threshold: f64) -> Self {
        Self::new(TriggerStrategy::Offset { threshold })
    }

    pub fn strategy(&self) -> TriggerStrategy {
        self.strategy
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Collection-side gate, independent of the event.
    pub fn should_fire(&self, flags: &PagingFlags) -> bool {
        self.armed && flags.can_advance()
    }

    /// Feed one event. Returns true when a next-page load should start;
    /// the trigger is disarmed in that case.
    pub fn observe(&mut self, event: ScrollEvent, flags: &PagingFlags) -> bool {
        let reached = match (self.strategy, event) {
            (TriggerStrategy::Sentinel, ScrollEvent::Visibility(visible)) => {
                let entered = visible && !self.visible;
                self.visible = visible;
                entered
            }
            (TriggerStrategy::Offset { threshold }, ScrollEvent::Scroll(viewport)) => viewport.at_bottom(threshold),
            // Event kind the strategy does not listen to.
            _ => false,
        };

        if reached && self.should_fire(flags) {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Allow the next arrival at the bottom to fire again.
    ///
    /// A sentinel that is still visible counts as a fresh arrival, so a
    /// short page that leaves the sentinel on screen keeps loading.
    pub fn rearm(&mut self) {
        self.armed = true;
        if self.strategy == TriggerStrategy::Sentinel {
            self.visible = false;
        }
    }

    /// Evaluate `event` and, if it fires, load the next page.
    ///
    /// Returns `Skipped` when nothing was started.
    pub async fn drive<T, S>(&mut self, event: ScrollEvent, collection: &PagedCollection<T>, source: &S) -> LoadOutcome
    where
        T: Identified + Clone,
        S: PageSource<T> + ?Sized,
    {
        if !self.observe(event, &collection.flags()) {
            return LoadOutcome::Skipped;
        }
        let outcome = collection.advance_page(source).await;
        self.rearm();
        outcome
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(TriggerStrategy::default())
    }
}
