// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable collaborator doubles and scenario tests for gatefold.
//!
//! Every host-facing trait in [`gatefold_core::backend`] has a recording
//! double here, plus [`Shared`] for keeping a handle to a double after boxing
//! it into the [`ViewCompositor`], and [`TestRig`] wiring a full compositor
//! and frame loop together. The crate's own test module runs the end-to-end
//! lifecycle scenarios against the rig.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

use kurbo::{Point, Size};

use gatefold_core::backend::{
    ContentItem, ContentSource, DrawInfo, DrawSurface, HostLauncher, ImageHandle, InputSnapshot,
    InstallStatus, Installer, ResourceProvider,
};
use gatefold_core::compositor::ViewCompositor;
use gatefold_core::element::ElementId;
use gatefold_core::frame::FrameLoop;
use gatefold_core::trace::Tracer;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Shared handle to a double, so a test can keep observing it after boxing a
/// clone into the compositor.
///
/// Implements each backend trait by forwarding to the inner value, so a
/// `Shared<PoolResources>` can be passed wherever a `Box<dyn ResourceProvider>`
/// is expected.
#[derive(Debug, Default)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Shared<T> {
    /// Wraps a value in a shared handle.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrows the inner value.
    ///
    /// # Panics
    ///
    /// Panics if the value is mutably borrowed (only possible while a
    /// compositor call is on the stack).
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the inner value.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T: ResourceProvider> ResourceProvider for Shared<T> {
    fn get_image(&mut self, name: &str) -> Option<ImageHandle> {
        self.0.borrow_mut().get_image(name)
    }
    fn release_image(&mut self, handle: ImageHandle) {
        self.0.borrow_mut().release_image(handle);
    }
}

impl<T: ContentSource> ContentSource for Shared<T> {
    fn enumerate(&mut self) -> Vec<ContentItem> {
        self.0.borrow_mut().enumerate()
    }
}

impl<T: Installer> Installer for Shared<T> {
    fn begin(&mut self, items: &[ContentItem]) {
        self.0.borrow_mut().begin(items);
    }
    fn poll(&mut self) -> InstallStatus {
        self.0.borrow_mut().poll()
    }
}

impl<T: HostLauncher> HostLauncher for Shared<T> {
    fn launch_menu(&mut self) {
        self.0.borrow_mut().launch_menu();
    }
}

impl<T: DrawSurface> DrawSurface for Shared<T> {
    fn draw_element(&mut self, id: ElementId, info: &DrawInfo<'_>) {
        self.0.borrow_mut().draw_element(id, info);
    }
    fn draw_pointer(
        &mut self,
        channel: u8,
        position: Point,
        angle: f64,
        alpha: f32,
        image: Option<ImageHandle>,
    ) {
        self.0
            .borrow_mut()
            .draw_pointer(channel, position, angle, alpha, image);
    }
    fn draw_notice(&mut self, title: &str, message: &str) {
        self.0.borrow_mut().draw_notice(title, message);
    }
}

// ---------------------------------------------------------------------------
// Resource pool double
// ---------------------------------------------------------------------------

/// A [`ResourceProvider`] that hands out sequential handles and balances
/// acquisitions against releases.
#[derive(Debug, Default)]
pub struct PoolResources {
    next: u64,
    live: i64,
    acquired: Vec<String>,
    released: Vec<ImageHandle>,
    missing: Vec<String>,
}

impl PoolResources {
    /// Creates an empty pool where every lookup succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes lookups for `name` fail, simulating missing art.
    pub fn without(&mut self, name: &str) {
        self.missing.push(name.to_string());
    }

    /// Handles acquired minus handles released.
    #[must_use]
    pub fn live(&self) -> i64 {
        self.live
    }

    /// Names looked up so far, in order.
    #[must_use]
    pub fn acquired(&self) -> &[String] {
        &self.acquired
    }

    /// Handles released so far, in order.
    #[must_use]
    pub fn released(&self) -> &[ImageHandle] {
        &self.released
    }
}

impl ResourceProvider for PoolResources {
    fn get_image(&mut self, name: &str) -> Option<ImageHandle> {
        if self.missing.iter().any(|m| m == name) {
            return None;
        }
        self.acquired.push(name.to_string());
        self.next += 1;
        self.live += 1;
        Some(ImageHandle(self.next))
    }

    fn release_image(&mut self, handle: ImageHandle) {
        self.live -= 1;
        self.released.push(handle);
    }
}

// ---------------------------------------------------------------------------
// Content source double
// ---------------------------------------------------------------------------

/// A [`ContentSource`] backed by a settable item list.
#[derive(Debug, Default)]
pub struct StaticContent {
    items: Vec<ContentItem>,
    enumerations: usize,
}

impl StaticContent {
    /// Creates a source over the given item names.
    #[must_use]
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            items: names
                .iter()
                .map(|n| ContentItem {
                    name: (*n).to_string(),
                })
                .collect(),
            enumerations: 0,
        }
    }

    /// Replaces the item list, effective on the next enumeration.
    pub fn set_names(&mut self, names: &[&str]) {
        self.items = names
            .iter()
            .map(|n| ContentItem {
                name: (*n).to_string(),
            })
            .collect();
    }

    /// How many times the source has been enumerated.
    #[must_use]
    pub fn enumerations(&self) -> usize {
        self.enumerations
    }
}

impl ContentSource for StaticContent {
    fn enumerate(&mut self) -> Vec<ContentItem> {
        self.enumerations += 1;
        self.items.clone()
    }
}

// ---------------------------------------------------------------------------
// Installer double
// ---------------------------------------------------------------------------

/// An [`Installer`] whose flow is closed manually by the test.
#[derive(Debug, Default)]
pub struct ManualInstaller {
    begun: Vec<Vec<ContentItem>>,
    status: InstallStatus,
}

impl ManualInstaller {
    /// Creates an idle installer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            begun: Vec::new(),
            status: InstallStatus::Idle,
        }
    }

    /// Item batches the flow has been begun over.
    #[must_use]
    pub fn begun(&self) -> &[Vec<ContentItem>] {
        &self.begun
    }

    /// Marks the running flow as closed; the next poll reports it.
    pub fn close(&mut self) {
        self.status = InstallStatus::Closed;
    }
}

impl Installer for ManualInstaller {
    fn begin(&mut self, items: &[ContentItem]) {
        self.begun.push(items.to_vec());
        self.status = InstallStatus::Running;
    }

    fn poll(&mut self) -> InstallStatus {
        self.status
    }
}

// ---------------------------------------------------------------------------
// Launcher double
// ---------------------------------------------------------------------------

/// A [`HostLauncher`] that counts menu hand-offs.
#[derive(Debug, Default)]
pub struct CountingLauncher {
    launched: usize,
}

impl CountingLauncher {
    /// Number of times the menu hand-off fired.
    #[must_use]
    pub fn launched(&self) -> usize {
        self.launched
    }
}

impl HostLauncher for CountingLauncher {
    fn launch_menu(&mut self) {
        self.launched += 1;
    }
}

// ---------------------------------------------------------------------------
// Recording surface
// ---------------------------------------------------------------------------

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// An element draw.
    Element {
        /// The drawn element.
        id: ElementId,
        /// Absolute position.
        position: Point,
        /// Element size.
        size: Size,
        /// Accumulated alpha.
        alpha: f32,
        /// Image, if any.
        image: Option<ImageHandle>,
        /// Text, if any.
        text: Option<String>,
    },
    /// A pointer cursor draw.
    Pointer {
        /// Pointer channel in `1..=4`.
        channel: u8,
        /// Cursor position.
        position: Point,
        /// Cursor angle.
        angle: f64,
        /// Cursor opacity.
        alpha: f32,
    },
    /// An error-notice overlay draw.
    Notice {
        /// Notice heading.
        title: String,
        /// Notice body.
        message: String,
    },
}

/// A [`DrawSurface`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// All recorded calls, oldest first.
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Creates an empty recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` was drawn.
    #[must_use]
    pub fn drew_element(&self, id: ElementId) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, DrawCall::Element { id: drawn, .. } if *drawn == id))
    }

    /// Accumulated alpha `id` was drawn with, if it was drawn.
    #[must_use]
    pub fn element_alpha(&self, id: ElementId) -> Option<f32> {
        self.calls.iter().find_map(|c| match c {
            DrawCall::Element { id: drawn, alpha, .. } if *drawn == id => Some(*alpha),
            _ => None,
        })
    }

    /// Pointer draws as `(channel, alpha)` pairs, in order.
    #[must_use]
    pub fn pointer_calls(&self) -> Vec<(u8, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Pointer { channel, alpha, .. } => Some((*channel, *alpha)),
                _ => None,
            })
            .collect()
    }

    /// Notice draws as `(title, message)` pairs, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Notice { title, message } => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_element(&mut self, id: ElementId, info: &DrawInfo<'_>) {
        self.calls.push(DrawCall::Element {
            id,
            position: info.position,
            size: info.size,
            alpha: info.alpha,
            image: info.image,
            text: info.text.map(ToString::to_string),
        });
    }

    fn draw_pointer(
        &mut self,
        channel: u8,
        position: Point,
        angle: f64,
        alpha: f32,
        _image: Option<ImageHandle>,
    ) {
        self.calls.push(DrawCall::Pointer {
            channel,
            position,
            angle,
            alpha,
        });
    }

    fn draw_notice(&mut self, title: &str, message: &str) {
        self.calls.push(DrawCall::Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Input builders
// ---------------------------------------------------------------------------

/// An idle sample: no channel, no pointer.
#[must_use]
pub fn idle() -> InputSnapshot {
    InputSnapshot::IDLE
}

/// A sample from the given channel mask, with no pointer.
#[must_use]
pub fn channel(mask: u32) -> InputSnapshot {
    InputSnapshot {
        channel_mask: mask,
        ..InputSnapshot::IDLE
    }
}

/// A sample carrying a fresh pointer position for `channel_index`.
#[must_use]
pub fn pointer(channel_index: u8, position: Point, angle: f64) -> InputSnapshot {
    InputSnapshot {
        channel_index,
        pointer_valid: true,
        pointer_pos: position,
        pointer_angle: angle,
        ..InputSnapshot::IDLE
    }
}

// ---------------------------------------------------------------------------
// TestRig
// ---------------------------------------------------------------------------

/// A fully wired compositor with shared handles to all of its doubles.
#[derive(Debug)]
pub struct TestRig {
    /// The compositor under test.
    pub compositor: ViewCompositor,
    /// The frame loop driving it.
    pub frames: FrameLoop,
    /// Shared handle to the resource pool.
    pub resources: Shared<PoolResources>,
    /// Shared handle to the content source.
    pub content: Shared<StaticContent>,
    /// Shared handle to the installer.
    pub installer: Shared<ManualInstaller>,
    /// Shared handle to the launcher.
    pub launcher: Shared<CountingLauncher>,
}

impl TestRig {
    /// Builds a 1280×720 compositor over content with the given item names.
    #[must_use]
    pub fn new(names: &[&str]) -> Self {
        let resources = Shared::new(PoolResources::new());
        let content = Shared::new(StaticContent::with_names(names));
        let installer = Shared::new(ManualInstaller::new());
        let launcher = Shared::new(CountingLauncher::default());

        let compositor = ViewCompositor::new(
            1280.0,
            720.0,
            Box::new(resources.clone()),
            Box::new(content.clone()),
            Box::new(installer.clone()),
            Box::new(launcher.clone()),
        );
        Self {
            compositor,
            frames: FrameLoop::new(),
            resources,
            content,
            installer,
            launcher,
        }
    }

    /// Runs one frame over the given input batch, returning the recorded
    /// primary and secondary surfaces.
    pub fn run_frame(&mut self, inputs: &[InputSnapshot]) -> (RecordingSurface, RecordingSurface) {
        let mut primary = RecordingSurface::new();
        let mut secondary = RecordingSurface::new();
        self.frames.run_frame(
            &mut self.compositor,
            inputs,
            &mut primary,
            &mut secondary,
            &mut Tracer::none(),
        );
        (primary, secondary)
    }

    /// Runs `n` idle frames, discarding the draw output.
    pub fn run_idle_frames(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.run_frame(&[]);
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use gatefold_core::backend::{CHANNEL_1, CHANNEL_2};
    use gatefold_core::effect::{CompletionAction, Effect};

    use super::*;

    // -- lifecycle properties ----------------------------------------------

    #[test]
    fn effects_advance_once_per_frame_for_shared_elements() {
        let mut rig = TestRig::new(&[]);
        let shared = rig.compositor.store_mut().create_element();
        rig.compositor
            .store_mut()
            .start_effect(shared, Effect::fade_in(6), &[]);
        rig.compositor.append_primary(shared);
        rig.compositor.append_secondary(shared);

        rig.run_idle_frames(5);
        assert!(
            rig.compositor.store().has_effect(shared),
            "five frames advance five ticks, not ten"
        );
        rig.run_idle_frames(1);
        assert!(!rig.compositor.store().has_effect(shared));

        rig.compositor.remove_from_lists(shared);
        rig.compositor.store_mut().destroy_element(shared);
    }

    #[test]
    fn retirement_mid_pass_does_not_starve_other_entries() {
        let mut rig = TestRig::new(&[]);
        let store = rig.compositor.store_mut();
        let first = store.create_element();
        let second = store.create_element();
        store.start_effect(first, Effect::fade_out(1), &[CompletionAction::Retire]);
        store.start_effect(second, Effect::fade_in(1), &[]);
        rig.compositor.append_primary(first);
        rig.compositor.append_primary(second);

        // First retires mid-pass, shrinking the list; second still advances.
        rig.run_idle_frames(1);
        assert!(!rig.compositor.store().is_alive(first));
        assert!(rig.compositor.store().is_alive(second));
        assert!(
            !rig.compositor.store().has_effect(second),
            "second entry's one-tick effect completed the same frame"
        );

        rig.compositor.remove_from_lists(second);
        rig.compositor.store_mut().destroy_element(second);
    }

    #[test]
    fn entries_present_at_frame_start_participate() {
        let mut rig = TestRig::new(&[]);
        let late = rig.compositor.store_mut().create_element();
        rig.compositor
            .store_mut()
            .start_effect(late, Effect::fade_in(1), &[]);
        rig.compositor.append_primary(late);

        rig.run_idle_frames(1);
        assert!(
            !rig.compositor.store().has_effect(late),
            "entry appended before the frame participates in it"
        );

        rig.compositor.remove_from_lists(late);
        rig.compositor.store_mut().destroy_element(late);
    }

    #[test]
    fn views_open_disabled_and_enable_at_fade_completion() {
        let mut rig = TestRig::new(&["title-a"]);
        let root = rig.compositor.root();
        let browser = rig.compositor.browser().expect("browser built");

        rig.run_idle_frames(9);
        assert!(!rig.compositor.store().is_interactive(root));
        assert!(!rig.compositor.store().is_interactive(browser));

        rig.run_idle_frames(1);
        assert!(rig.compositor.store().is_interactive(root));
        assert!(rig.compositor.store().is_interactive(browser));
    }

    #[test]
    fn closing_view_is_removed_everywhere_then_destroyed() {
        let mut rig = TestRig::new(&["title-a"]);
        rig.run_idle_frames(10);
        let browser = rig.compositor.browser().unwrap();

        rig.compositor.install_clicked();
        rig.run_idle_frames(9);
        assert!(rig.compositor.store().is_alive(browser));

        // Completion frame: retired from tree and lists, destroyed by the
        // frame's own drain.
        rig.run_idle_frames(1);
        assert!(rig.compositor.browser().is_none());
        assert!(!rig.compositor.store().is_alive(browser));
    }

    #[test]
    fn retired_element_outlives_the_draw_passes_of_its_frame() {
        let mut rig = TestRig::new(&["title-a"]);
        rig.run_idle_frames(10);
        let browser = rig.compositor.browser().unwrap();
        rig.compositor.install_clicked();
        rig.run_idle_frames(9);

        // Run the completing frame's passes by hand to observe the window
        // between retirement and destruction.
        rig.compositor.update(&idle());
        let summary = rig.compositor.update_effects();
        assert_eq!(summary.retired, 1);
        assert!(rig.compositor.store().is_alive(browser));

        let mut primary = RecordingSurface::new();
        let mut secondary = RecordingSurface::new();
        rig.compositor.draw_primary(&mut primary);
        rig.compositor.draw_secondary(&mut secondary);
        assert!(!primary.drew_element(browser), "detached views do not draw");
        assert!(rig.compositor.store().is_alive(browser));

        assert_eq!(rig.compositor.drain_deleted(), 1);
        assert!(!rig.compositor.store().is_alive(browser));
    }

    #[test]
    fn pointer_draws_reduced_on_primary_and_consumed_by_secondary() {
        let mut rig = TestRig::new(&["title-a"]);
        let (primary, secondary) =
            rig.run_frame(&[pointer(2, Point::new(320.0, 200.0), 0.3)]);
        assert_eq!(primary.pointer_calls(), [(2, 0.5)]);
        assert_eq!(secondary.pointer_calls(), [(2, 1.0)]);

        let (primary, secondary) = rig.run_frame(&[]);
        assert!(primary.pointer_calls().is_empty());
        assert!(secondary.pointer_calls().is_empty());
    }

    #[test]
    fn channel_one_routes_to_the_secondary_list_only() {
        let mut rig = TestRig::new(&["title-a"]);
        rig.run_idle_frames(10);

        let primary_only = rig.compositor.store_mut().create_element();
        rig.compositor.append_primary(primary_only);

        rig.run_frame(&[channel(CHANNEL_1)]);
        assert_eq!(rig.compositor.store().input_marks(primary_only), 0);

        rig.run_frame(&[channel(CHANNEL_2)]);
        assert_eq!(rig.compositor.store().input_marks(primary_only), 1);

        rig.compositor.remove_from_lists(primary_only);
        rig.compositor.store_mut().destroy_element(primary_only);
    }

    // -- end-to-end scenarios ----------------------------------------------

    #[test]
    fn no_content_shows_notice_and_acknowledgement_exits_once() {
        let mut rig = TestRig::new(&[]);
        assert!(rig.compositor.browser().is_none());

        let (primary, secondary) = rig.run_frame(&[]);
        let expected = [(
            "Error:".to_string(),
            "No installable content found.".to_string(),
        )];
        assert_eq!(primary.notices(), expected);
        assert_eq!(secondary.notices(), expected);

        rig.compositor.acknowledge_error();
        assert_eq!(rig.launcher.borrow().launched(), 1);

        // Idempotent: nothing left to acknowledge, no second hand-off.
        rig.compositor.acknowledge_error();
        assert_eq!(rig.launcher.borrow().launched(), 1);

        let (primary, _) = rig.run_frame(&[]);
        assert!(primary.notices().is_empty());
    }

    #[test]
    fn install_round_trip_rebuilds_the_browser() {
        let mut rig = TestRig::new(&["title-a", "title-b"]);
        rig.run_idle_frames(10);
        let first = rig.compositor.browser().unwrap();

        rig.compositor.install_clicked();
        assert_eq!(rig.installer.borrow().begun().len(), 1);
        assert_eq!(rig.installer.borrow().begun()[0].len(), 2);

        // Close fade runs; the flow stays open past it.
        rig.run_idle_frames(10);
        assert!(!rig.compositor.store().is_alive(first));
        assert!(rig.compositor.install_running());
        assert_eq!(rig.content.borrow().enumerations(), 1);

        // The user leaves the install flow; content is re-enumerated and a
        // fresh browser opens disabled.
        rig.installer.borrow_mut().close();
        rig.run_idle_frames(1);
        assert!(!rig.compositor.install_running());
        assert_eq!(rig.content.borrow().enumerations(), 2);
        let second = rig.compositor.browser().expect("browser rebuilt");
        assert_ne!(first, second);
        assert!(!rig.compositor.store().is_interactive(second));

        // The header was restacked above the new browser.
        let kids: Vec<_> = rig
            .compositor
            .store()
            .children(rig.compositor.root())
            .collect();
        assert_eq!(kids.last(), Some(&rig.compositor.header()));

        // And it opens over the usual ten frames.
        rig.run_idle_frames(10);
        assert!(rig.compositor.store().is_interactive(second));
    }

    #[test]
    fn install_consuming_the_last_content_ends_in_the_notice() {
        let mut rig = TestRig::new(&["only-title"]);
        rig.run_idle_frames(10);
        rig.compositor.install_clicked();
        rig.run_idle_frames(10);

        // Everything was installed; the re-enumeration comes back empty.
        rig.content.borrow_mut().set_names(&[]);
        rig.installer.borrow_mut().close();
        let (primary, _) = rig.run_frame(&[]);

        assert!(rig.compositor.browser().is_none());
        assert_eq!(primary.notices().len(), 1);

        rig.compositor.acknowledge_error();
        assert_eq!(rig.launcher.borrow().launched(), 1);
    }

    #[test]
    fn double_click_during_close_starts_one_flow() {
        let mut rig = TestRig::new(&["title-a"]);
        rig.run_idle_frames(10);

        rig.compositor.install_clicked();
        rig.run_idle_frames(3);
        rig.compositor.install_clicked();
        rig.compositor.install_clicked();
        assert_eq!(rig.installer.borrow().begun().len(), 1);
    }

    #[test]
    fn teardown_returns_every_image_to_the_pool() {
        let mut rig = TestRig::new(&["title-a"]);
        rig.run_idle_frames(3);
        assert!(rig.resources.borrow().live() > 0);

        rig.compositor.teardown();
        assert_eq!(rig.resources.borrow().live(), 0);
    }

    #[test]
    fn missing_art_is_tolerated() {
        let resources = Shared::new(PoolResources::new());
        resources.borrow_mut().without("header.png");
        resources.borrow_mut().without("player1_point.png");

        let compositor = ViewCompositor::new(
            1280.0,
            720.0,
            Box::new(resources.clone()),
            Box::new(StaticContent::with_names(&["title-a"])),
            Box::new(ManualInstaller::new()),
            Box::new(CountingLauncher::default()),
        );
        assert!(compositor.browser().is_some());
        assert!(compositor.pointers().slot(1).image.is_none());
        assert!(compositor.pointers().slot(2).image.is_some());
        drop(compositor);
        assert_eq!(resources.borrow().live(), 0);
    }

    #[test]
    fn draw_output_fades_the_opening_tree() {
        let mut rig = TestRig::new(&["title-a"]);
        let browser = rig.compositor.browser().unwrap();

        rig.run_idle_frames(4);
        let (primary, _) = rig.run_frame(&[]);
        // Root and browser are both five ticks into their ten-tick fades.
        assert_eq!(primary.element_alpha(browser), Some(0.25));

        rig.run_idle_frames(5);
        let (primary, _) = rig.run_frame(&[]);
        assert_eq!(primary.element_alpha(browser), Some(1.0));
    }
}
