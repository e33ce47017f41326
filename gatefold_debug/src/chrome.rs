// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! The frame loop is tick-driven and carries no wall-clock timestamps, so
//! timestamps are synthesized: each frame occupies one 16.667 ms slot (a
//! nominal 60 Hz refresh) and the five passes are spread across it in order.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use gatefold_core::trace::PhaseKind;

use crate::recorder::{RecordedEvent, decode};

/// Microseconds per synthesized frame slot (nominal 60 Hz).
const FRAME_SLOT_US: f64 = 16_667.0;
/// Microseconds per pass inside a frame slot.
const PHASE_SLOT_US: f64 = 3_000.0;

fn frame_us(frame_index: u64) -> f64 {
    frame_index as f64 * FRAME_SLOT_US
}

fn phase_begin_us(frame_index: u64, phase: PhaseKind) -> f64 {
    frame_us(frame_index) + phase_ordinal(phase) * PHASE_SLOT_US
}

fn phase_ordinal(phase: PhaseKind) -> f64 {
    match phase {
        PhaseKind::Input => 0.0,
        PhaseKind::Effects => 1.0,
        PhaseKind::DrawPrimary => 2.0,
        PhaseKind::DrawSecondary => 3.0,
        PhaseKind::Drain => 4.0,
    }
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameBegin(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameBegin",
                    "cat": "Frame",
                    "ts": frame_us(e.frame_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": phase_begin_us(e.frame_index, e.phase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": phase_begin_us(e.frame_index, e.phase) + PHASE_SLOT_US * 0.8,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::Effects(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Effects",
                    "cat": "Effects",
                    "ts": phase_begin_us(e.frame_index, PhaseKind::Effects),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "finished": e.finished,
                        "retired": e.retired,
                    }
                }));
            }
            RecordedEvent::Drain(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Drain",
                    "cat": "Deleter",
                    "ts": phase_begin_us(e.frame_index, PhaseKind::Drain),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "freed": e.freed,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": frame_us(s.frame_index) + FRAME_SLOT_US * 0.96,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "inputs": s.inputs,
                        "finished_effects": s.finished_effects,
                        "retired": s.retired,
                        "freed": s.freed,
                        "notice_active": s.notice_active,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
