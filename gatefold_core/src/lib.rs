// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-display view composition and lifecycle for an installer front-end.
//!
//! `gatefold_core` owns the element tree, the per-display draw lists, timed
//! open/close effects, and frame-aligned deferred destruction for a UI that
//! renders simultaneously to a large primary display and a handheld secondary
//! display. It is `no_std` compatible (with `alloc`) and uses array-based
//! struct-of-arrays storage with generational index handles.
//!
//! # Architecture
//!
//! Every frame runs five passes over the [`ViewCompositor`], in fixed order:
//!
//! ```text
//!   InputSnapshot ──► update() ──► update_effects() ─► completion actions
//!                        │                                  │
//!                        ▼                                  ▼
//!   draw_primary() / draw_secondary() ──► DrawSurface   DeferredDeleter
//!                        │                                  │
//!                        └──────────► drain_deleted() ◄─────┘
//! ```
//!
//! **[`element`]** — Struct-of-arrays element tree with generational handles.
//! Parents own children; display lists hold handles only.
//!
//! **[`effect`]** — Fixed-duration fades with one-shot completion
//! subscriptions; disabling effects force the interaction flag off while
//! they run.
//!
//! **[`compositor`]** — The [`ViewCompositor`]: both display lists (which may
//! share elements), input routing by controller channel, the open/close view
//! lifecycle, and the install-flow transitions.
//!
//! **[`deleter`]** — Frame-aligned deferred destruction, drained once per
//! frame after both draw passes.
//!
//! **[`pointer`]** — Four pointer cursor slots whose validity is consumed by
//! the secondary draw pass.
//!
//! **[`notifier`]** — Acknowledgeable error notices, drawn above everything.
//!
//! **[`backend`]** — Host collaborator traits: [`DrawSurface`],
//! [`ResourceProvider`], [`ContentSource`], [`Installer`], [`HostLauncher`].
//!
//! **[`frame`]** — The [`FrameLoop`](frame::FrameLoop) pass driver.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`ViewCompositor`]: compositor::ViewCompositor
//! [`DrawSurface`]: backend::DrawSurface
//! [`ResourceProvider`]: backend::ResourceProvider
//! [`ContentSource`]: backend::ContentSource
//! [`Installer`]: backend::Installer
//! [`HostLauncher`]: backend::HostLauncher

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod compositor;
pub mod deleter;
pub mod effect;
pub mod element;
pub mod frame;
pub mod notifier;
pub mod pointer;
pub mod trace;
