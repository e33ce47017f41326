// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame pass driver.
//!
//! One frame runs exactly five passes, in order: input update, effect
//! advancement, primary draw, secondary draw, deferred-deletion drain. The
//! host calls [`FrameLoop::run_frame`] once per display refresh with the
//! controller samples gathered since the last frame; an empty batch still
//! runs one idle update so effect timers and the notice timer keep advancing.
//!
//! The drain runs strictly after both draw passes, so an element retired
//! during the effect pass of frame `N` is still drawable-safe until the end
//! of frame `N` and is destroyed before frame `N + 1` begins.

use crate::backend::{DrawSurface, InputSnapshot};
use crate::compositor::ViewCompositor;
use crate::trace::{
    DrainEvent, EffectsEvent, FrameBeginEvent, FrameSummary, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, Tracer,
};

/// Drives the fixed pass order over a [`ViewCompositor`].
#[derive(Debug, Default)]
pub struct FrameLoop {
    frame_index: u64,
}

impl FrameLoop {
    /// Creates a loop starting at frame zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of the next frame to run.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Runs one complete frame.
    ///
    /// `inputs` is the batch of controller samples for this frame; when it is
    /// empty a single idle sample is routed instead, so every frame performs
    /// at least one update pass.
    pub fn run_frame(
        &mut self,
        compositor: &mut ViewCompositor,
        inputs: &[InputSnapshot],
        primary: &mut dyn DrawSurface,
        secondary: &mut dyn DrawSurface,
        tracer: &mut Tracer<'_>,
    ) {
        let frame_index = self.frame_index;
        tracer.frame_begin(&FrameBeginEvent { frame_index });

        self.phase(tracer, PhaseKind::Input);
        if inputs.is_empty() {
            compositor.update(&InputSnapshot::IDLE);
        } else {
            for input in inputs {
                compositor.update(input);
            }
        }
        self.phase_done(tracer, PhaseKind::Input);

        self.phase(tracer, PhaseKind::Effects);
        let effects = compositor.update_effects();
        tracer.effects(&EffectsEvent {
            frame_index,
            finished: effects.finished,
            retired: effects.retired,
        });
        self.phase_done(tracer, PhaseKind::Effects);

        self.phase(tracer, PhaseKind::DrawPrimary);
        compositor.draw_primary(primary);
        self.phase_done(tracer, PhaseKind::DrawPrimary);

        self.phase(tracer, PhaseKind::DrawSecondary);
        compositor.draw_secondary(secondary);
        self.phase_done(tracer, PhaseKind::DrawSecondary);

        self.phase(tracer, PhaseKind::Drain);
        let freed = compositor.drain_deleted();
        tracer.drain(&DrainEvent { frame_index, freed });
        self.phase_done(tracer, PhaseKind::Drain);

        tracer.frame_summary(&FrameSummary::new(
            frame_index,
            inputs.len().max(1),
            &effects,
            freed,
            compositor.notifier().is_active(),
        ));
        self.frame_index += 1;
    }

    fn phase(&self, tracer: &mut Tracer<'_>, phase: PhaseKind) {
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index: self.frame_index,
            phase,
        });
    }

    fn phase_done(&self, tracer: &mut Tracer<'_>, phase: PhaseKind) {
        tracer.phase_end(&PhaseEndEvent {
            frame_index: self.frame_index,
            phase,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use kurbo::Point;

    use crate::backend::{
        ContentItem, ContentSource, DrawInfo, HostLauncher, ImageHandle, InstallStatus, Installer,
        ResourceProvider,
    };
    use crate::element::ElementId;

    use super::*;

    struct NoArt;
    impl ResourceProvider for NoArt {
        fn get_image(&mut self, _name: &str) -> Option<ImageHandle> {
            None
        }
        fn release_image(&mut self, _handle: ImageHandle) {}
    }

    struct EmptyShelf;
    impl ContentSource for EmptyShelf {
        fn enumerate(&mut self) -> Vec<ContentItem> {
            Vec::new()
        }
    }

    struct IdleInstaller;
    impl Installer for IdleInstaller {
        fn begin(&mut self, _items: &[ContentItem]) {}
        fn poll(&mut self) -> InstallStatus {
            InstallStatus::Idle
        }
    }

    struct NoLauncher;
    impl HostLauncher for NoLauncher {
        fn launch_menu(&mut self) {}
    }

    #[derive(Default)]
    struct CountingSurface {
        elements: usize,
        pointers: Vec<f32>,
    }
    impl DrawSurface for CountingSurface {
        fn draw_element(&mut self, _id: ElementId, _info: &DrawInfo<'_>) {
            self.elements += 1;
        }
        fn draw_pointer(
            &mut self,
            _channel: u8,
            _position: Point,
            _angle: f64,
            alpha: f32,
            _image: Option<ImageHandle>,
        ) {
            self.pointers.push(alpha);
        }
        fn draw_notice(&mut self, _title: &str, _message: &str) {}
    }

    fn compositor() -> ViewCompositor {
        ViewCompositor::new(
            1280.0,
            720.0,
            Box::new(NoArt),
            Box::new(EmptyShelf),
            Box::new(IdleInstaller),
            Box::new(NoLauncher),
        )
    }

    #[test]
    fn idle_frames_still_advance_effects() {
        let mut compositor = compositor();
        let mut frames = FrameLoop::new();
        let root = compositor.root();

        for _ in 0..10 {
            frames.run_frame(
                &mut compositor,
                &[],
                &mut CountingSurface::default(),
                &mut CountingSurface::default(),
                &mut Tracer::none(),
            );
        }
        assert_eq!(frames.frame_index(), 10);
        assert!(
            compositor.store().is_interactive(root),
            "ten idle frames complete the opening fade"
        );
    }

    #[test]
    fn pointer_validity_lasts_exactly_one_frame() {
        let mut compositor = compositor();
        let mut frames = FrameLoop::new();

        let sample = InputSnapshot {
            channel_index: 2,
            pointer_valid: true,
            pointer_pos: Point::new(100.0, 100.0),
            ..InputSnapshot::IDLE
        };
        let mut primary = CountingSurface::default();
        let mut secondary = CountingSurface::default();
        frames.run_frame(
            &mut compositor,
            &[sample],
            &mut primary,
            &mut secondary,
            &mut Tracer::none(),
        );
        // Same frame: reduced opacity on primary, full on secondary.
        assert_eq!(primary.pointers, [0.5]);
        assert_eq!(secondary.pointers, [1.0]);

        let mut primary = CountingSurface::default();
        let mut secondary = CountingSurface::default();
        frames.run_frame(
            &mut compositor,
            &[],
            &mut primary,
            &mut secondary,
            &mut Tracer::none(),
        );
        assert!(primary.pointers.is_empty(), "validity was consumed");
        assert!(secondary.pointers.is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn passes_run_in_fixed_order() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct PhaseLog {
            begun: Vec<PhaseKind>,
            summaries: usize,
        }
        impl TraceSink for PhaseLog {
            fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
                self.begun.push(e.phase);
            }
            fn on_frame_summary(&mut self, _s: &FrameSummary) {
                self.summaries += 1;
            }
        }

        let mut compositor = compositor();
        let mut frames = FrameLoop::new();
        let mut log = PhaseLog::default();
        frames.run_frame(
            &mut compositor,
            &[],
            &mut CountingSurface::default(),
            &mut CountingSurface::default(),
            &mut Tracer::new(&mut log),
        );

        assert_eq!(
            log.begun,
            [
                PhaseKind::Input,
                PhaseKind::Effects,
                PhaseKind::DrawPrimary,
                PhaseKind::DrawSecondary,
                PhaseKind::Drain,
            ]
        );
        assert_eq!(log.summaries, 1);
    }
}
