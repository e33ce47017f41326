// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and effect
//! slot management.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::backend::ImageHandle;
use crate::effect::{CompletionAction, Effect, FadeDirection};

use super::id::{ElementId, INVALID};
use super::traverse::Children;

/// What an element is able to do during the frame passes.
///
/// Effect-bearing is not a static capability: any element becomes
/// effect-bearing while its effect slot is occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// The input-update pass routes controller input to this element.
    pub updatable: bool,
    /// The draw passes emit this element (and recurse into its children).
    pub drawable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            updatable: true,
            drawable: true,
        }
    }
}

/// An effect request parked while another effect is still running.
///
/// Effects are not interruptible, so a new request replaces the old one only
/// at a completion boundary.
#[derive(Clone, Debug)]
struct PendingEffect {
    effect: Effect,
    actions: Vec<CompletionAction>,
}

/// Struct-of-arrays storage for all elements.
///
/// Elements are addressed by [`ElementId`] handles. Internally, each element
/// occupies a slot in parallel arrays. Destroyed elements are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// Ownership: a parent exclusively owns its children; display lists and the
/// deferred deleter hold handles only. Destroying an element that still has
/// children is a caller bug (destroy the subtree bottom-up, as the deleter
/// does).
#[derive(Debug, Default)]
pub struct ElementStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties --
    position: Vec<Point>,
    size: Vec<Size>,
    angle: Vec<f64>,
    alpha: Vec<f32>,
    image: Vec<Option<ImageHandle>>,
    text: Vec<Option<String>>,
    caps: Vec<Capabilities>,
    disabled: Vec<bool>,

    // -- Effect slots --
    effect: Vec<Option<Effect>>,
    on_complete: Vec<Vec<CompletionAction>>,
    pending: Vec<Option<PendingEffect>>,

    // -- Input routing bookkeeping --
    input_marks: Vec<u64>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl ElementStore {
    /// Creates an empty element store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Allocation API --

    /// Creates a new element and returns its handle.
    ///
    /// The element starts at the origin with zero size, full alpha, no image,
    /// no text, default capabilities, enabled, with empty effect slots, and no
    /// parent.
    pub fn create_element(&mut self) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.position[i] = Point::ZERO;
            self.size[i] = Size::ZERO;
            self.angle[i] = 0.0;
            self.alpha[i] = 1.0;
            self.image[i] = None;
            self.text[i] = None;
            self.caps[i] = Capabilities::default();
            self.disabled[i] = false;
            self.effect[i] = None;
            self.on_complete[i] = Vec::new();
            self.pending[i] = None;
            self.input_marks[i] = 0;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.position.push(Point::ZERO);
            self.size.push(Size::ZERO);
            self.angle.push(0.0);
            self.alpha.push(1.0);
            self.image.push(None);
            self.text.push(None);
            self.caps.push(Capabilities::default());
            self.disabled.push(false);
            self.effect.push(None);
            self.on_complete.push(Vec::new());
            self.pending.push(None);
            self.input_marks.push(0);
            self.generation.push(0);
            idx
        };

        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an element, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the element still has children (destroy them first) or if
    /// the handle is stale.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy element with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.effect[idx as usize] = None;
        self.on_complete[idx as usize].clear();
        self.pending[idx as usize] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last (frontmost) child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to the last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the element has no parent.
    pub fn remove_from_parent(&mut self, child: ElementId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "element has no parent");
        self.unlink_from_parent(c);
    }

    /// Restacks `child` to the front of `parent`'s child list (drawn last).
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or `child` is not a child of
    /// `parent`.
    pub fn bring_to_front(&mut self, parent: ElementId, child: ElementId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == parent.idx,
            "element is not a child of the given parent"
        );
        self.unlink_from_parent(child.idx);
        self.add_child(parent, child);
    }

    /// Returns the parent of an element, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(ElementId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct children of an element,
    /// back-to-front.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    // -- Property getters --

    /// Returns the position of an element, relative to its parent.
    #[must_use]
    pub fn position(&self, id: ElementId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the size of an element.
    #[must_use]
    pub fn size(&self, id: ElementId) -> Size {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns the orientation angle of an element, in radians.
    #[must_use]
    pub fn angle(&self, id: ElementId) -> f64 {
        self.validate(id);
        self.angle[id.idx as usize]
    }

    /// Returns the local alpha of an element.
    #[must_use]
    pub fn alpha(&self, id: ElementId) -> f32 {
        self.validate(id);
        self.alpha[id.idx as usize]
    }

    /// Returns the image shown by an element, if any.
    ///
    /// The handle is a non-owning reference; whoever acquired it from the
    /// resource provider releases it.
    #[must_use]
    pub fn image(&self, id: ElementId) -> Option<ImageHandle> {
        self.validate(id);
        self.image[id.idx as usize]
    }

    /// Returns the text shown by an element, if any.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.validate(id);
        self.text[id.idx as usize].as_deref()
    }

    /// Returns the capabilities of an element.
    #[must_use]
    pub fn capabilities(&self, id: ElementId) -> Capabilities {
        self.validate(id);
        self.caps[id.idx as usize]
    }

    /// Returns whether the element's interaction flag is set to disabled.
    #[must_use]
    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.validate(id);
        self.disabled[id.idx as usize]
    }

    /// Returns whether the element currently accepts user input.
    #[must_use]
    pub fn is_interactive(&self, id: ElementId) -> bool {
        self.validate(id);
        self.caps[id.idx as usize].updatable && !self.disabled[id.idx as usize]
    }

    /// Returns how many times input has been routed to this element.
    #[must_use]
    pub fn input_marks(&self, id: ElementId) -> u64 {
        self.validate(id);
        self.input_marks[id.idx as usize]
    }

    // -- Property setters --

    /// Sets the position of an element, relative to its parent.
    pub fn set_position(&mut self, id: ElementId, position: Point) {
        self.validate(id);
        self.position[id.idx as usize] = position;
    }

    /// Sets the size of an element.
    pub fn set_size(&mut self, id: ElementId, size: Size) {
        self.validate(id);
        self.size[id.idx as usize] = size;
    }

    /// Sets the orientation angle of an element, in radians.
    pub fn set_angle(&mut self, id: ElementId, angle: f64) {
        self.validate(id);
        self.angle[id.idx as usize] = angle;
    }

    /// Sets the local alpha of an element.
    pub fn set_alpha(&mut self, id: ElementId, alpha: f32) {
        self.validate(id);
        self.alpha[id.idx as usize] = alpha;
    }

    /// Sets the image shown by an element.
    pub fn set_image(&mut self, id: ElementId, image: Option<ImageHandle>) {
        self.validate(id);
        self.image[id.idx as usize] = image;
    }

    /// Sets the text shown by an element.
    pub fn set_text(&mut self, id: ElementId, text: Option<String>) {
        self.validate(id);
        self.text[id.idx as usize] = text;
    }

    /// Sets the capabilities of an element.
    pub fn set_capabilities(&mut self, id: ElementId, caps: Capabilities) {
        self.validate(id);
        self.caps[id.idx as usize] = caps;
    }

    /// Sets or clears the element's disabled interaction flag.
    ///
    /// # Panics
    ///
    /// Debug-panics when clearing the flag while a disabling effect is still
    /// running; the flag is forced for the lifetime of such an effect and may
    /// only be cleared from its completion.
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.validate(id);
        if !disabled {
            debug_assert!(
                !self.effect[id.idx as usize].is_some_and(Effect::is_disabling),
                "cannot re-enable an element while a disabling effect runs"
            );
        }
        self.disabled[id.idx as usize] = disabled;
    }

    // -- Effect API --

    /// Starts an effect on an element, subscribing `actions` to its
    /// completion.
    ///
    /// If the element already has a running effect, the request is parked and
    /// installed at that effect's completion boundary (replacing any earlier
    /// parked request). A disabling effect forces the interaction flag off
    /// the moment it is installed.
    pub fn start_effect(&mut self, id: ElementId, effect: Effect, actions: &[CompletionAction]) {
        self.validate(id);
        let i = id.idx as usize;
        if self.effect[i].is_some() {
            self.pending[i] = Some(PendingEffect {
                effect,
                actions: actions.to_vec(),
            });
        } else {
            self.install_effect(i, effect, actions.to_vec());
        }
    }

    /// Returns whether the element has a running effect.
    #[must_use]
    pub fn has_effect(&self, id: ElementId) -> bool {
        self.validate(id);
        self.effect[id.idx as usize].is_some()
    }

    /// Returns whether the element's running effect forces the disabled flag.
    #[must_use]
    pub fn has_disabling_effect(&self, id: ElementId) -> bool {
        self.validate(id);
        self.effect[id.idx as usize].is_some_and(Effect::is_disabling)
    }

    /// Returns the alpha multiplier contributed by the element's running
    /// effect (1.0 when idle).
    #[must_use]
    pub fn effect_magnitude(&self, id: ElementId) -> f32 {
        self.validate(id);
        self.effect[id.idx as usize].map_or(1.0, Effect::magnitude)
    }

    /// Advances the element's effect by one tick.
    ///
    /// On the completing tick, the effect slot is emptied, the subscription
    /// list is drained (detached before the caller can invoke it), and any
    /// parked effect is installed. Returns the finished effect's direction
    /// together with the drained subscriptions; `None` while the effect is
    /// still running or when there is none.
    pub fn advance_effect(
        &mut self,
        id: ElementId,
    ) -> Option<(FadeDirection, Vec<CompletionAction>)> {
        self.validate(id);
        let i = id.idx as usize;
        let fx = self.effect[i].as_mut()?;
        if !fx.tick() {
            return None;
        }
        let direction = fx.direction();
        self.effect[i] = None;
        let actions = core::mem::take(&mut self.on_complete[i]);
        if let Some(parked) = self.pending[i].take() {
            self.install_effect(i, parked.effect, parked.actions);
        }
        Some((direction, actions))
    }

    /// Marks one routed input delivery on the element.
    pub(crate) fn note_input(&mut self, id: ElementId) {
        self.validate(id);
        self.input_marks[id.idx as usize] += 1;
    }

    // -- Internal helpers --

    fn install_effect(&mut self, i: usize, effect: Effect, actions: Vec<CompletionAction>) {
        debug_assert!(self.effect[i].is_none(), "effect slot already occupied");
        debug_assert!(
            self.on_complete[i].is_empty(),
            "stale completion subscriptions"
        );
        if effect.is_disabling() {
            self.disabled[i] = true;
        }
        self.effect[i] = Some(effect);
        self.on_complete[i] = actions;
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: ElementId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
