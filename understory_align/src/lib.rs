// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_align --heading-base-level=0

//! Understory Align: viewport-aware placement of popups, menus and tooltips.
//!
//! ## Overview
//!
//! This crate answers one question: given a box of a known size, a reference box to place it
//! against, and a containing viewport, where should the box's origin go?
//!
//! Each axis is solved independently with an [`Align`] mode:
//!
//! - [`Align::Start`]: the box's start edge is flush with the reference's start edge.
//! - [`Align::End`]: the box's far edge is flush with the reference's far edge.
//! - [`Align::Center`]: the box is centered on the reference.
//! - [`Align::StartOutside`]: the box sits immediately before the reference.
//! - [`Align::EndOutside`]: the box sits immediately after the reference.
//!
//! ## Fallbacks
//!
//! When the requested placement overflows the viewport on an axis, the mode is replaced by its
//! [opposite](Align::opposite) (a *flip*; [`Align::Center`] has no opposite). If that still
//! overflows, the box's far edge is clamped to the viewport's far edge and the axis reports
//! [`Placement::Contain`].
//!
//! The clamp is one-sided: a box larger than the viewport ends up starting before the viewport
//! origin. Hosts that need a symmetric clamp can apply it to the returned origin.
//!
//! ## Minimal example
//!
//! A cascading submenu near the right edge of the screen flips to the left of its anchor:
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_align::{Align, Placement, align_box};
//!
//! let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let anchor = Rect::new(90.0, 10.0, 95.0, 20.0);
//! let submenu = Size::new(20.0, 30.0);
//!
//! let placed = align_box(viewport, submenu, anchor, Align::EndOutside, Align::Start);
//! assert_eq!(placed.horizontal, Placement::StartOutside);
//! assert_eq!(placed.origin.x, 70.0);
//! assert_eq!(placed.vertical, Placement::Start);
//! assert_eq!(placed.origin.y, 10.0);
//! ```
//!
//! Alignment modes can also be parsed from their textual names, which is convenient when they
//! come from markup or configuration:
//!
//! ```rust
//! use understory_align::Align;
//!
//! assert_eq!("end-outside".parse::<Align>(), Ok(Align::EndOutside));
//! assert!("sideways".parse::<Align>().is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod mode;

pub use axis::{Alignment, align_axis, align_box, fits};
pub use mode::{Align, ParseAlignError, Placement};
