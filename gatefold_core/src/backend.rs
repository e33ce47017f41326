// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts for host integrations.
//!
//! Gatefold owns composition and lifecycle only; everything that touches
//! hardware, codecs, or the package pipeline lives behind the narrow traits in
//! this module:
//!
//! - **[`DrawSurface`]** — receives the per-frame draw fan-out for one display
//!   surface. Both real renderers and test doubles implement this, enabling
//!   generic frame loops.
//!
//! - **[`ResourceProvider`]** — pool-owned image lookup. The core releases
//!   every handle it acquires exactly once, in its teardown path. A failed
//!   lookup is not an error: the UI proceeds without the art.
//!
//! - **[`ContentSource`]** — enumerates installable content. Zero items is a
//!   valid state ("no installable content"), not a failure.
//!
//! - **[`Installer`]** — the install flow. Constructed over the enumerated
//!   content via [`begin`](Installer::begin); its single "closed" notification
//!   is modelled as [`poll`](Installer::poll) returning
//!   [`InstallStatus::Closed`] once, in keeping with the single-threaded
//!   cooperative frame loop (no callbacks across the ownership boundary).
//!
//! - **[`HostLauncher`]** — a single no-argument call handing control back to
//!   the system menu; invoked only from the error-acknowledged transition.
//!
//! - **[`InputSnapshot`]** — the per-frame controller sample routed by
//!   [`ViewCompositor::update`](crate::compositor::ViewCompositor::update).
//!
//! # Crate boundaries
//!
//! `gatefold_core` owns the element store, effect machinery, compositor, and
//! this contract module. Host crates implement the traits and drive the
//! [`FrameLoop`](crate::frame::FrameLoop); `gatefold_harness` provides
//! recording doubles for all of them.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Size};

use crate::element::ElementId;

/// An opaque handle to a pool-owned image resource.
///
/// Handles are assigned by the [`ResourceProvider`]; the core passes them
/// through to [`DrawSurface`] calls without interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageHandle(pub u64);

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({})", self.0)
    }
}

/// Pool-owned image lookup and release.
pub trait ResourceProvider {
    /// Looks up an image by name. `None` means the art is unavailable; the
    /// caller proceeds without it.
    fn get_image(&mut self, name: &str) -> Option<ImageHandle>;

    /// Returns a previously acquired handle to the pool.
    fn release_image(&mut self, handle: ImageHandle);
}

/// One installable entry found by the [`ContentSource`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentItem {
    /// Display name of the entry.
    pub name: String,
}

/// Enumerates installable content.
pub trait ContentSource {
    /// Returns the currently installable entries. May legitimately be empty.
    fn enumerate(&mut self) -> Vec<ContentItem>;
}

/// Where the install flow currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstallStatus {
    /// No flow has been begun (or the last one was already observed closed).
    #[default]
    Idle,
    /// A flow is running; keep polling.
    Running,
    /// The user finished or cancelled. Reported exactly once per begun flow.
    Closed,
}

/// The install flow collaborator.
pub trait Installer {
    /// Constructs the install flow over the enumerated content.
    fn begin(&mut self, items: &[ContentItem]);

    /// Cooperative poll for the flow's single "closed" notification.
    fn poll(&mut self) -> InstallStatus;
}

/// Hands control back to the host environment's menu entry point.
pub trait HostLauncher {
    /// Terminal action — no further UI after this call.
    fn launch_menu(&mut self);
}

/// Controller channel bit for the handheld (secondary-display) controller.
pub const CHANNEL_1: u32 = 1 << 0;
/// Controller channel bit 2.
pub const CHANNEL_2: u32 = 1 << 1;
/// Controller channel bit 3.
pub const CHANNEL_3: u32 = 1 << 2;
/// Controller channel bit 4.
pub const CHANNEL_4: u32 = 1 << 3;
/// Controller channel bit 5.
pub const CHANNEL_5: u32 = 1 << 4;

/// A per-frame controller sample.
///
/// `channel_mask` selects which display list receives input routing
/// ([`CHANNEL_1`] is the handheld controller and routes to the secondary
/// list; everything else routes to the primary list). `channel_index` names
/// the pointer channel in `1..=4`; out-of-range values leave the pointer
/// slots untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    /// Bitmask of the physical channel that produced this sample.
    pub channel_mask: u32,
    /// Pointer channel index in `1..=4` (0 when the controller has none).
    pub channel_index: u8,
    /// Whether this sample carries a fresh pointer position.
    pub pointer_valid: bool,
    /// Pointer position on the primary surface.
    pub pointer_pos: Point,
    /// Pointer orientation angle, in radians.
    pub pointer_angle: f64,
}

impl InputSnapshot {
    /// A sample with no channel, no pointer — routes the primary list only.
    pub const IDLE: Self = Self {
        channel_mask: 0,
        channel_index: 0,
        pointer_valid: false,
        pointer_pos: Point::ZERO,
        pointer_angle: 0.0,
    };
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Resolved draw parameters for one element.
///
/// Positions are absolute (parent offsets applied); `alpha` accumulates the
/// ancestor chain and the element's running effect.
#[derive(Clone, Copy, Debug)]
pub struct DrawInfo<'a> {
    /// Absolute position on the surface.
    pub position: Point,
    /// Element size.
    pub size: Size,
    /// Orientation angle, in radians.
    pub angle: f64,
    /// Effective alpha in `[0, 1]`.
    pub alpha: f32,
    /// Image to present, if the element carries one.
    pub image: Option<ImageHandle>,
    /// Text to present, if the element carries any.
    pub text: Option<&'a str>,
}

/// Receives the draw fan-out for one display surface.
///
/// Calls arrive in back-to-front order: display-list elements (recursing
/// through children), then pointer cursors, then the error-notifier overlay.
pub trait DrawSurface {
    /// Draws one element.
    fn draw_element(&mut self, id: ElementId, info: &DrawInfo<'_>);

    /// Draws one pointer cursor.
    fn draw_pointer(
        &mut self,
        channel: u8,
        position: Point,
        angle: f64,
        alpha: f32,
        image: Option<ImageHandle>,
    );

    /// Draws the error-notifier overlay.
    fn draw_notice(&mut self, title: &str, message: &str);
}
