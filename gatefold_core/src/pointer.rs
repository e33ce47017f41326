// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-controller-channel pointer cursors.
//!
//! Up to four pointer cursors are tracked, one per controller channel. A
//! slot's validity is set when a fresh sample arrives and consumed exactly
//! once per secondary-display draw pass; the primary-display pass reads but
//! never clears it, so a stale cursor stays visible on the primary surface
//! for at most one extra frame.

use alloc::format;

use kurbo::Point;

use crate::backend::{DrawSurface, ImageHandle, ResourceProvider};

/// Number of pointer channels.
pub const POINTER_CHANNELS: usize = 4;

/// Opacity used for cursors on the primary surface.
const PRIMARY_ALPHA: f32 = 0.5;

/// Last known state of one pointer channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSlot {
    /// Last sampled position.
    pub position: Point,
    /// Last sampled orientation angle, in radians.
    pub angle: f64,
    /// Whether the slot holds a sample not yet consumed by a secondary draw.
    pub valid: bool,
    /// Cursor art for this channel, if available.
    pub image: Option<ImageHandle>,
}

/// Cursor overlay drawn on top of both display lists.
#[derive(Debug, Default)]
pub struct PointerOverlay {
    slots: [PointerSlot; POINTER_CHANNELS],
}

impl PointerOverlay {
    /// Creates the overlay, acquiring per-channel cursor art from the
    /// resource provider. Missing art is tolerated; the slot then draws
    /// without an image.
    #[must_use]
    pub fn new(resources: &mut dyn ResourceProvider) -> Self {
        let mut slots: [PointerSlot; POINTER_CHANNELS] = Default::default();
        for (i, slot) in slots.iter_mut().enumerate() {
            slot.image = resources.get_image(&format!("player{}_point.png", i + 1));
        }
        Self { slots }
    }

    /// Records a fresh sample for `channel` (in `1..=4`) and marks the slot
    /// valid.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is out of range; the compositor filters the raw
    /// snapshot before calling.
    pub fn sample(&mut self, channel: u8, position: Point, angle: f64) {
        assert!(
            (1..=POINTER_CHANNELS as u8).contains(&channel),
            "pointer channel {channel} out of range"
        );
        let slot = &mut self.slots[usize::from(channel) - 1];
        slot.position = position;
        slot.angle = angle;
        slot.valid = true;
    }

    /// Returns the slot for `channel` (in `1..=4`).
    #[must_use]
    pub fn slot(&self, channel: u8) -> &PointerSlot {
        assert!(
            (1..=POINTER_CHANNELS as u8).contains(&channel),
            "pointer channel {channel} out of range"
        );
        &self.slots[usize::from(channel) - 1]
    }

    /// Draws valid cursors at reduced opacity. Validity is left untouched.
    pub fn draw_primary(&self, surface: &mut dyn DrawSurface) {
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.valid {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "channel index is in 1..=4"
                )]
                surface.draw_pointer(
                    (i + 1) as u8,
                    slot.position,
                    slot.angle,
                    PRIMARY_ALPHA,
                    slot.image,
                );
            }
        }
    }

    /// Draws valid cursors at full opacity, then consumes their validity.
    pub fn draw_secondary(&mut self, surface: &mut dyn DrawSurface) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.valid {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "channel index is in 1..=4"
                )]
                surface.draw_pointer((i + 1) as u8, slot.position, slot.angle, 1.0, slot.image);
                slot.valid = false;
            }
        }
    }

    /// Returns all cursor art to the resource provider. Called exactly once
    /// from the compositor's teardown path.
    pub fn release_art(&mut self, resources: &mut dyn ResourceProvider) {
        for slot in &mut self.slots {
            if let Some(handle) = slot.image.take() {
                resources.release_image(handle);
            }
        }
    }
}
