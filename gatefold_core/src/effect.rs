// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed visual effects and their completion contract.
//!
//! An [`Effect`] runs for a fixed, caller-specified number of frame ticks and
//! then finishes; there is no external timeout or cancellation. While a
//! *disabling* effect runs, the owning element's interaction flag is forced
//! off (see [`ElementStore::start_effect`]). Completion is observed by the
//! compositor, which drains the element's one-shot [`CompletionAction`]
//! subscriptions *before* acting on them, so an open-finished subscription can
//! never fire twice for the same element.
//!
//! Effects are not interruptible: starting a new effect on an element that
//! already has one parks the request in a pending slot, and the pending effect
//! is installed only when the running one reaches its natural completion.
//!
//! [`ElementStore::start_effect`]: crate::element::ElementStore::start_effect

/// Which way a fade effect runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FadeDirection {
    /// Fading in: magnitude rises from 0 to 1 (opening).
    In,
    /// Fading out: magnitude falls from 1 to 0 (closing).
    Out,
}

/// A fixed-duration fade, advanced once per frame by the effect pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Effect {
    direction: FadeDirection,
    duration: u32,
    elapsed: u32,
    disabling: bool,
}

impl Effect {
    /// Creates a disabling fade-in running for `ticks` frames.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero.
    #[must_use]
    pub const fn fade_in(ticks: u32) -> Self {
        assert!(ticks > 0, "effect duration must be at least one tick");
        Self {
            direction: FadeDirection::In,
            duration: ticks,
            elapsed: 0,
            disabling: true,
        }
    }

    /// Creates a disabling fade-out running for `ticks` frames.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero.
    #[must_use]
    pub const fn fade_out(ticks: u32) -> Self {
        assert!(ticks > 0, "effect duration must be at least one tick");
        Self {
            direction: FadeDirection::Out,
            duration: ticks,
            elapsed: 0,
            disabling: true,
        }
    }

    /// Returns a copy of this effect that does not force the element's
    /// interaction flag while running.
    #[must_use]
    pub const fn passive(mut self) -> Self {
        self.disabling = false;
        self
    }

    /// Which way this fade runs.
    #[inline]
    #[must_use]
    pub const fn direction(self) -> FadeDirection {
        self.direction
    }

    /// Whether the element must stay non-interactive while this effect runs.
    #[inline]
    #[must_use]
    pub const fn is_disabling(self) -> bool {
        self.disabling
    }

    /// Whether the effect has reached its target tick count.
    #[inline]
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the effect by one frame tick. Returns `true` on the tick that
    /// completes it.
    ///
    /// The owner is expected to take the effect out of its slot once it
    /// finishes; ticking a finished effect is a caller bug.
    pub fn tick(&mut self) -> bool {
        debug_assert!(!self.is_finished(), "ticked a finished effect");
        self.elapsed += 1;
        self.is_finished()
    }

    /// Current alpha multiplier in `[0, 1]`.
    ///
    /// A fade-in starts at 0 and ends at 1; a fade-out is the mirror image.
    #[must_use]
    pub fn magnitude(self) -> f32 {
        let progress = (self.elapsed.min(self.duration) as f32) / (self.duration as f32);
        match self.direction {
            FadeDirection::In => progress,
            FadeDirection::Out => 1.0 - progress,
        }
    }
}

/// A one-shot subscription invoked when an element's effect completes.
///
/// Subscriptions are drained from the element before being acted on, so each
/// fires at most once. The compositor interprets them as the state-machine
/// transitions of the open/close lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionAction {
    /// Open finished: clear the element's disabled flag so it accepts input.
    EnableInteraction,
    /// Close finished: detach the element from its parent and display lists
    /// and hand it to the deferred deleter.
    Retire,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_in_runs_zero_to_one() {
        let mut fx = Effect::fade_in(10);
        assert_eq!(fx.magnitude(), 0.0);
        assert!(!fx.is_finished());

        for i in 1..10 {
            assert!(!fx.tick(), "tick {i} must not complete");
        }
        assert!(fx.tick(), "tick 10 completes");
        assert!(fx.is_finished());
        assert_eq!(fx.magnitude(), 1.0);
    }

    #[test]
    fn fade_out_runs_one_to_zero() {
        let mut fx = Effect::fade_out(4);
        assert_eq!(fx.magnitude(), 1.0);
        fx.tick();
        fx.tick();
        assert_eq!(fx.magnitude(), 0.5);
        fx.tick();
        assert!(fx.tick());
        assert_eq!(fx.magnitude(), 0.0);
    }

    #[test]
    fn fades_disable_by_default() {
        assert!(Effect::fade_in(10).is_disabling());
        assert!(Effect::fade_out(10).is_disabling());
        assert!(!Effect::fade_in(10).passive().is_disabling());
    }

    #[test]
    #[should_panic(expected = "at least one tick")]
    fn zero_duration_panics() {
        let _ = Effect::fade_in(0);
    }
}
