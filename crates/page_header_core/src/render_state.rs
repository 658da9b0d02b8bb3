//! Timed loading-placeholder state machine.

use std::{cell::Cell, fmt, rc::Rc, time::Duration};

use platform_host::{TimeoutHandle, TimeoutScheduler};

/// How long a placeholder is shown before the header switches to its content.
pub const PLACEHOLDER_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which visual branch the header renders.
pub enum RenderState {
    /// Skeleton placeholder blocks.
    Loading,
    /// Real content.
    #[default]
    Ready,
}

impl RenderState {
    /// State a new header instance starts in.
    pub const fn initial(show_placeholder: bool) -> Self {
        if show_placeholder {
            Self::Loading
        } else {
            Self::Ready
        }
    }

    /// Returns `true` for [`RenderState::Loading`].
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Stable token for `data-ui-state` hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }
}

struct TimelineShared {
    state: Cell<RenderState>,
    on_change: Box<dyn Fn(RenderState)>,
}

/// Owns one header instance's render state and its pending placeholder timeout.
///
/// `Loading` moves to `Ready` exactly once, [`PLACEHOLDER_DELAY`] after entering `Loading`.
/// Destroying (or dropping) the timeline cancels the timeout, and the scheduled task only holds a
/// weak reference, so a late fire never reaches a destroyed instance.
pub struct PlaceholderTimeline {
    shared: Rc<TimelineShared>,
    scheduler: Rc<dyn TimeoutScheduler>,
    pending: Option<TimeoutHandle>,
    show_placeholder: bool,
}

impl PlaceholderTimeline {
    /// Starts in the state selected by `show_placeholder`.
    ///
    /// `on_change` runs on every later transition; the initial state is read via
    /// [`PlaceholderTimeline::state`].
    pub fn start(
        show_placeholder: bool,
        scheduler: Rc<dyn TimeoutScheduler>,
        on_change: impl Fn(RenderState) + 'static,
    ) -> Self {
        let mut timeline = Self {
            shared: Rc::new(TimelineShared {
                state: Cell::new(RenderState::Ready),
                on_change: Box::new(on_change),
            }),
            scheduler,
            pending: None,
            show_placeholder,
        };
        if show_placeholder {
            timeline.enter_loading();
        }
        timeline
    }

    /// Current state.
    pub fn state(&self) -> RenderState {
        self.shared.state.get()
    }

    /// Returns `true` while the transition to `Ready` is still scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some() && self.state().is_loading()
    }

    /// Applies a new `show_placeholder` input.
    ///
    /// A false-to-true flip is treated as reconstruction: the header re-enters `Loading` with a
    /// fresh timeout. Every other change leaves the state alone.
    pub fn set_show_placeholder(&mut self, show_placeholder: bool) {
        let was_shown = std::mem::replace(&mut self.show_placeholder, show_placeholder);
        if show_placeholder && !was_shown {
            let previous = self.state();
            self.enter_loading();
            if previous != RenderState::Loading {
                (self.shared.on_change)(RenderState::Loading);
            }
        }
    }

    /// Tears the timeline down, cancelling any pending transition.
    pub fn destroy(mut self) {
        self.cancel_pending();
    }

    fn enter_loading(&mut self) {
        self.cancel_pending();
        self.shared.state.set(RenderState::Loading);

        let shared = Rc::downgrade(&self.shared);
        let handle = self.scheduler.schedule(
            PLACEHOLDER_DELAY,
            Box::new(move || {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                if shared.state.replace(RenderState::Ready) == RenderState::Loading {
                    (shared.on_change)(RenderState::Ready);
                }
            }),
        );
        self.pending = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.clear();
        }
    }
}

impl Drop for PlaceholderTimeline {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl fmt::Debug for PlaceholderTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderTimeline")
            .field("state", &self.state())
            .field("show_placeholder", &self.show_placeholder)
            .field("pending", &self.is_pending())
            .finish()
    }
}
