// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element data model.
//!
//! An *element* is a node in the installer's view hierarchy. Each element has:
//!
//! - An identity ([`ElementId`]) — a generational handle that becomes stale
//!   when the element is destroyed, preventing use-after-free bugs at the API
//!   level even though destruction is deferred to the end of the frame.
//! - Topology — parent, first-child, and sibling links forming an ordered
//!   tree. The parent exclusively owns its children; a display list may hold
//!   the same element by handle without taking ownership.
//! - Local properties set by the caller: position, size, angle, alpha, image,
//!   text, [`Capabilities`], and the disabled interaction flag.
//! - Effect slots: at most one running [`Effect`](crate::effect::Effect), one
//!   parked follow-up request, and the one-shot completion subscription list.
//!
//! Elements are stored in struct-of-arrays layout with index-based handles.
//! Handle equality is the identity test used when an element appears in both
//! display lists.

mod id;
mod store;
mod traverse;

pub use id::{ElementId, INVALID};
pub use store::{Capabilities, ElementStore};
pub use traverse::Children;
