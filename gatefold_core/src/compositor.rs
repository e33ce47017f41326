// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-display view compositor.
//!
//! [`ViewCompositor`] owns the element store, both display lists, the pointer
//! overlay, the error notifier, and the deferred deleter, and wires them to
//! the host collaborators behind the [`backend`](crate::backend) traits. The
//! same element may appear in both display lists; the effect pass advances
//! each element at most once per frame by checking primary-list entries for
//! membership in the secondary list before advancing them.
//!
//! Display lists hold handles, not ownership: elements are owned by their
//! parents in the store's tree, and the root view frame is the ancestor of
//! everything the compositor creates. List iteration during a pass snapshots
//! the list length first and re-checks the live bound each step, so completion
//! callbacks may append or remove entries mid-pass without invalidating the
//! iteration (appended entries are picked up next frame).
//!
//! # The open/close lifecycle
//!
//! Views open with a disabling fade-in and an `EnableInteraction` completion
//! subscription; they close with a disabling fade-out and a `Retire`
//! subscription. Retiring detaches the element from its parent and both
//! display lists synchronously and queues it on the deferred deleter, which
//! the frame loop drains after both draw passes. A destroyed handle is never
//! reachable from a list.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};

use crate::backend::{
    CHANNEL_1, ContentItem, ContentSource, DrawInfo, DrawSurface, HostLauncher, ImageHandle,
    InputSnapshot, InstallStatus, Installer, ResourceProvider,
};
use crate::deleter::DeferredDeleter;
use crate::effect::{CompletionAction, Effect};
use crate::element::{Capabilities, ElementId, ElementStore};
use crate::notifier::ErrorNotifier;
use crate::pointer::{POINTER_CHANNELS, PointerOverlay};

/// Frames an opening fade-in runs for.
const OPEN_TICKS: u32 = 10;
/// Frames a closing fade-out runs for.
const CLOSE_TICKS: u32 = 10;
/// Height of the header strip across the top of the root frame.
const HEADER_HEIGHT: f64 = 88.0;
/// Fixed width of the content browser view.
const BROWSER_WIDTH: f64 = 920.0;
/// Horizontal offset of the content browser inside the root frame.
const BROWSER_X: f64 = 50.0;

/// Notice heading for the empty-content case.
const NO_CONTENT_TITLE: &str = "Error:";
/// Notice body for the empty-content case.
const NO_CONTENT_MESSAGE: &str = "No installable content found.";

/// Counters produced by one effect pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectsSummary {
    /// Effects that reached their target tick this pass.
    pub finished: usize,
    /// Elements retired to the deferred deleter this pass.
    pub retired: usize,
}

/// Owns the view tree and runs the per-frame passes over it.
pub struct ViewCompositor {
    width: f64,
    height: f64,

    store: ElementStore,
    deleter: DeferredDeleter,
    pointers: PointerOverlay,
    notifier: ErrorNotifier,

    /// Handles drawn on the primary (large) display, back to front.
    primary: Vec<ElementId>,
    /// Handles drawn on the secondary (handheld) display, back to front.
    secondary: Vec<ElementId>,

    resources: Box<dyn ResourceProvider>,
    content: Box<dyn ContentSource>,
    installer: Box<dyn Installer>,
    launcher: Box<dyn HostLauncher>,

    items: Vec<ContentItem>,
    root: ElementId,
    header: ElementId,
    browser: Option<ElementId>,
    header_art: Option<ImageHandle>,
    background_art: Option<ImageHandle>,

    install_running: bool,
    menu_requested: bool,
    torn_down: bool,
}

impl core::fmt::Debug for ViewCompositor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewCompositor")
            .field("root", &self.root)
            .field("browser", &self.browser)
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .field("install_running", &self.install_running)
            .finish_non_exhaustive()
    }
}

impl ViewCompositor {
    /// Builds the view tree and enumerates content.
    ///
    /// The root frame starts disabled behind a 10-tick fade-in; nothing
    /// accepts input until that completes. When enumeration finds no items,
    /// the no-content notice is queued instead of a browser view.
    #[must_use]
    pub fn new(
        width: f64,
        height: f64,
        mut resources: Box<dyn ResourceProvider>,
        content: Box<dyn ContentSource>,
        installer: Box<dyn Installer>,
        launcher: Box<dyn HostLauncher>,
    ) -> Self {
        let mut store = ElementStore::new();
        let pointers = PointerOverlay::new(resources.as_mut());
        let header_art = resources.get_image("header.png");
        let background_art = resources.get_image("background.png");

        let root = store.create_element();
        store.set_size(root, Size::new(width, height));
        store.start_effect(
            root,
            Effect::fade_in(OPEN_TICKS),
            &[CompletionAction::EnableInteraction],
        );

        let background = store.create_element();
        store.set_size(background, Size::new(width, height));
        store.set_image(background, background_art);
        store.set_capabilities(
            background,
            Capabilities {
                updatable: false,
                drawable: true,
            },
        );
        store.add_child(root, background);

        let header = store.create_element();
        store.set_size(header, Size::new(width, HEADER_HEIGHT));
        store.set_capabilities(
            header,
            Capabilities {
                updatable: false,
                drawable: true,
            },
        );
        let title = store.create_element();
        store.set_size(title, Size::new(400.0, HEADER_HEIGHT));
        store.set_image(title, header_art);
        store.set_text(title, Some(String::from("Gatefold")));
        store.add_child(header, title);
        let version = store.create_element();
        store.set_position(version, Point::new(width - 150.0, HEADER_HEIGHT - 32.0));
        store.set_text(version, Some(format!("v{}", env!("CARGO_PKG_VERSION"))));
        store.add_child(header, version);
        store.add_child(root, header);

        let mut this = Self {
            width,
            height,
            store,
            deleter: DeferredDeleter::new(),
            pointers,
            notifier: ErrorNotifier::new(),
            primary: Vec::new(),
            secondary: Vec::new(),
            resources,
            content,
            installer,
            launcher,
            items: Vec::new(),
            root,
            header,
            browser: None,
            header_art,
            background_art,
            install_running: false,
            menu_requested: false,
            torn_down: false,
        };

        if !this.build_browser_view() {
            this.notifier.show(NO_CONTENT_TITLE, NO_CONTENT_MESSAGE);
        }
        // The header always stacks above the browser.
        this.store.bring_to_front(this.root, this.header);

        this.primary.push(root);
        this.secondary.push(root);
        this
    }

    // -- Frame passes --

    /// Input-update pass: routes one controller sample, samples the pointer
    /// overlay, polls a running install flow, and advances the notice timer.
    ///
    /// Channel 1 is the handheld controller and routes to the secondary list;
    /// every other channel routes to the primary list. Only interactive
    /// elements receive routing, and a non-interactive element shields its
    /// whole subtree.
    pub fn update(&mut self, input: &InputSnapshot) {
        if input.channel_mask & CHANNEL_1 != 0 {
            let snap = self.secondary.len();
            let mut i = 0;
            while i < snap && i < self.secondary.len() {
                route_subtree(&mut self.store, self.secondary[i]);
                i += 1;
            }
        } else {
            let snap = self.primary.len();
            let mut i = 0;
            while i < snap && i < self.primary.len() {
                route_subtree(&mut self.store, self.primary[i]);
                i += 1;
            }
        }

        if input.pointer_valid
            && input.channel_index >= 1
            && usize::from(input.channel_index) <= POINTER_CHANNELS
        {
            self.pointers
                .sample(input.channel_index, input.pointer_pos, input.pointer_angle);
        }

        if self.install_running && self.installer.poll() == InstallStatus::Closed {
            self.install_running = false;
            self.on_install_flow_closed();
        }

        self.notifier.advance_timer();
    }

    /// Effect pass: advances every element's effect once and dispatches
    /// completion subscriptions.
    ///
    /// The secondary list is walked first; primary-list entries that also
    /// appear in the secondary list are skipped so shared elements advance
    /// exactly once per frame. Both walks and the membership test are bounded
    /// by length snapshots taken before the pass.
    pub fn update_effects(&mut self) -> EffectsSummary {
        let mut summary = EffectsSummary::default();
        let sec_snap = self.secondary.len();
        let pri_snap = self.primary.len();

        let mut i = 0;
        while i < sec_snap && i < self.secondary.len() {
            let id = self.secondary[i];
            self.advance_subtree(id, &mut summary);
            i += 1;
        }

        let mut i = 0;
        while i < pri_snap && i < self.primary.len() {
            let id = self.primary[i];
            let mut n = 0;
            while n < sec_snap && n < self.secondary.len() {
                if self.secondary[n] == id {
                    break;
                }
                n += 1;
            }
            if n == self.secondary.len() {
                self.advance_subtree(id, &mut summary);
            }
            i += 1;
        }
        summary
    }

    /// Primary-display draw pass: display list, then pointer cursors at
    /// reduced opacity (validity untouched), then the notice overlay.
    pub fn draw_primary(&self, surface: &mut dyn DrawSurface) {
        for &id in &self.primary {
            draw_subtree(&self.store, id, Vec2::ZERO, 1.0, surface);
        }
        self.pointers.draw_primary(surface);
        self.notifier.draw_on(surface);
    }

    /// Secondary-display draw pass: display list, then pointer cursors at
    /// full opacity (consuming their validity), then the notice overlay.
    pub fn draw_secondary(&mut self, surface: &mut dyn DrawSurface) {
        for &id in &self.secondary {
            draw_subtree(&self.store, id, Vec2::ZERO, 1.0, surface);
        }
        self.pointers.draw_secondary(surface);
        self.notifier.draw_on(surface);
    }

    /// Destroys everything queued on the deferred deleter. Runs once per
    /// frame, after both draw passes. Returns the number of elements freed.
    pub fn drain_deleted(&mut self) -> usize {
        self.deleter.drain(&mut self.store)
    }

    // -- Transitions --

    /// Starts the install flow over the enumerated content.
    ///
    /// Ignored while the browser is still transitioning (or closing), or
    /// while a flow is already running. The browser view closes with a
    /// 10-tick fade-out and retires at its completion.
    pub fn install_clicked(&mut self) {
        if self.install_running {
            return;
        }
        let Some(browser) = self.browser else {
            return;
        };
        if !self.store.is_interactive(browser) {
            return;
        }

        self.store.start_effect(
            browser,
            Effect::fade_out(CLOSE_TICKS),
            &[CompletionAction::Retire],
        );
        self.installer.begin(&self.items);
        self.install_running = true;
    }

    /// Dismisses the current error notice, if any. Acknowledging the last
    /// notice hands control back to the host menu, exactly once.
    pub fn acknowledge_error(&mut self) {
        if self.notifier.acknowledge() && !self.notifier.is_active() && !self.menu_requested {
            self.menu_requested = true;
            self.launcher.launch_menu();
        }
    }

    /// The install flow reported closed: re-enumerate content and either
    /// rebuild the browser view or queue the no-content notice.
    fn on_install_flow_closed(&mut self) {
        if !self.build_browser_view() {
            self.notifier.show(NO_CONTENT_TITLE, NO_CONTENT_MESSAGE);
        }
        self.store.bring_to_front(self.root, self.header);
    }

    /// Enumerates content and, when non-empty, creates the browser view as a
    /// child of the root with an opening fade-in. Returns whether a browser
    /// was built.
    fn build_browser_view(&mut self) -> bool {
        self.items = self.content.enumerate();
        if self.items.is_empty() {
            self.browser = None;
            return false;
        }

        let browser = self.store.create_element();
        self.store
            .set_position(browser, Point::new(BROWSER_X, 0.0));
        self.store
            .set_size(browser, Size::new(BROWSER_WIDTH, self.height));
        self.store.add_child(self.root, browser);
        self.store.start_effect(
            browser,
            Effect::fade_in(OPEN_TICKS),
            &[CompletionAction::EnableInteraction],
        );
        self.browser = Some(browser);
        true
    }

    /// Advances `id`'s effect, dispatches its drained completion
    /// subscriptions, then recurses into its children.
    fn advance_subtree(&mut self, id: ElementId, summary: &mut EffectsSummary) {
        if let Some((_, actions)) = self.store.advance_effect(id) {
            summary.finished += 1;
            for action in actions {
                match action {
                    CompletionAction::EnableInteraction => {
                        // A close parked behind the open keeps the element
                        // disabled through the boundary.
                        if !self.store.has_disabling_effect(id) {
                            self.store.set_disabled(id, false);
                        }
                    }
                    CompletionAction::Retire => {
                        self.retire(id);
                        summary.retired += 1;
                    }
                }
            }
        }
        let children: Vec<ElementId> = self.store.children(id).collect();
        for child in children {
            self.advance_subtree(child, summary);
        }
    }

    /// Detaches `id` from both display lists and its parent, then queues it
    /// for deferred destruction. The handle stays valid until the drain.
    fn retire(&mut self, id: ElementId) {
        self.primary.retain(|&e| e != id);
        self.secondary.retain(|&e| e != id);
        if self.store.parent(id).is_some() {
            self.store.remove_from_parent(id);
        }
        if self.browser == Some(id) {
            self.browser = None;
        }
        self.deleter.enqueue(id);
    }

    // -- Display-list management --

    /// Appends a handle to the primary display list.
    ///
    /// Appending during a pass is safe; the new entry participates from the
    /// next frame.
    pub fn append_primary(&mut self, id: ElementId) {
        debug_assert!(self.store.is_alive(id), "appending a dead element");
        self.primary.push(id);
    }

    /// Appends a handle to the secondary display list.
    pub fn append_secondary(&mut self, id: ElementId) {
        debug_assert!(self.store.is_alive(id), "appending a dead element");
        self.secondary.push(id);
    }

    /// Removes a handle from both display lists without destroying it.
    pub fn remove_from_lists(&mut self, id: ElementId) {
        self.primary.retain(|&e| e != id);
        self.secondary.retain(|&e| e != id);
    }

    // -- Accessors --

    /// The root view frame.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The header strip element.
    #[must_use]
    pub fn header(&self) -> ElementId {
        self.header
    }

    /// The content browser view, while one exists.
    #[must_use]
    pub fn browser(&self) -> Option<ElementId> {
        self.browser
    }

    /// Size of the root frame.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Mutable access to the element store, for hosts building their own
    /// views under the root frame.
    pub fn store_mut(&mut self) -> &mut ElementStore {
        &mut self.store
    }

    /// The primary display list, back to front.
    #[must_use]
    pub fn primary_list(&self) -> &[ElementId] {
        &self.primary
    }

    /// The secondary display list, back to front.
    #[must_use]
    pub fn secondary_list(&self) -> &[ElementId] {
        &self.secondary
    }

    /// The pointer overlay.
    #[must_use]
    pub fn pointers(&self) -> &PointerOverlay {
        &self.pointers
    }

    /// The error notifier.
    #[must_use]
    pub fn notifier(&self) -> &ErrorNotifier {
        &self.notifier
    }

    /// The most recent content enumeration.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Whether an install flow is currently running.
    #[must_use]
    pub fn install_running(&self) -> bool {
        self.install_running
    }

    /// Whether the terminal menu hand-off has been requested.
    #[must_use]
    pub fn menu_requested(&self) -> bool {
        self.menu_requested
    }

    // -- Teardown --

    /// Tears the compositor down: drops queued notices, returns all acquired
    /// image resources, and destroys the view tree. Idempotent; also runs on
    /// drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.notifier.reset();

        if let Some(handle) = self.header_art.take() {
            self.resources.release_image(handle);
        }
        if let Some(handle) = self.background_art.take() {
            self.resources.release_image(handle);
        }
        self.pointers.release_art(self.resources.as_mut());

        // Anything already retired goes first, then the whole tree.
        self.deleter.drain(&mut self.store);
        self.primary.clear();
        self.secondary.clear();
        self.browser = None;
        if self.store.is_alive(self.root) {
            self.deleter.enqueue(self.root);
            self.deleter.drain(&mut self.store);
        }
    }
}

impl Drop for ViewCompositor {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Routes one input delivery to `id` and its children. A non-interactive
/// element shields its whole subtree.
fn route_subtree(store: &mut ElementStore, id: ElementId) {
    if !store.is_interactive(id) {
        return;
    }
    store.note_input(id);
    let children: Vec<ElementId> = store.children(id).collect();
    for child in children {
        route_subtree(store, child);
    }
}

/// Draws `id` and its children, accumulating parent offsets and alpha.
/// A non-drawable element hides its whole subtree.
fn draw_subtree(
    store: &ElementStore,
    id: ElementId,
    origin: Vec2,
    alpha: f32,
    surface: &mut dyn DrawSurface,
) {
    if !store.capabilities(id).drawable {
        return;
    }
    let position = store.position(id) + origin;
    let alpha = alpha * store.alpha(id) * store.effect_magnitude(id);
    let info = DrawInfo {
        position,
        size: store.size(id),
        angle: store.angle(id),
        alpha,
        image: store.image(id),
        text: store.text(id),
    };
    surface.draw_element(id, &info);
    for child in store.children(id) {
        draw_subtree(store, child, position.to_vec2(), alpha, surface);
    }
}
