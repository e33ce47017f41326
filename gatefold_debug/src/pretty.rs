// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use gatefold_core::trace::{
    DrainEvent, EffectsEvent, FrameBeginEvent, FrameSummary, PhaseBeginEvent, PhaseEndEvent,
    PhaseKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Input => "input",
        PhaseKind::Effects => "effects",
        PhaseKind::DrawPrimary => "draw:primary",
        PhaseKind::DrawSecondary => "draw:secondary",
        PhaseKind::Drain => "drain",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        let _ = writeln!(self.writer, "[frame] index={}", e.frame_index);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_effects(&mut self, e: &EffectsEvent) {
        let _ = writeln!(
            self.writer,
            "[effects] frame={} finished={} retired={}",
            e.frame_index, e.finished, e.retired,
        );
    }

    fn on_drain(&mut self, e: &DrainEvent) {
        let _ = writeln!(
            self.writer,
            "[drain] frame={} freed={}",
            e.frame_index, e.freed,
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let notice = if s.notice_active { "shown" } else { "none" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} inputs={} finished={} retired={} freed={} notice={notice}",
            s.frame_index, s.inputs, s.finished_effects, s.retired, s.freed,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_frame_and_phase() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_begin(&FrameBeginEvent { frame_index: 1 });
        sink.on_phase_begin(&PhaseBeginEvent {
            frame_index: 1,
            phase: PhaseKind::DrawPrimary,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[frame] index=1"), "got: {output}");
        assert!(output.contains("draw:primary"), "got: {output}");
    }

    #[test]
    fn pretty_print_summary() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_summary(&FrameSummary {
            frame_index: 12,
            inputs: 1,
            finished_effects: 2,
            retired: 1,
            freed: 3,
            notice_active: true,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("frame=12"), "got: {output}");
        assert!(output.contains("freed=3"), "got: {output}");
        assert!(output.contains("notice=shown"), "got: {output}");
    }
}
