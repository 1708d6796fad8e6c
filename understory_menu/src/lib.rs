// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: headless state machines for menus, menu bars, context menus and dropdowns.
//!
//! ## Overview
//!
//! A [`MenuSystem`] owns every menu, item, menu bar and trigger binding and addresses them with
//! small copyable handles ([`MenuId`], [`ItemId`], [`BarId`], [`TriggerId`]). It does not
//! draw. Everything visible goes through a host-provided [`Surface`], and everything observable
//! is queued as a [`MenuEvent`].
//!
//! - **Items** are commands, separators, checkboxes or radio buttons. An item may open a
//!   submenu; expanding an item collapses its siblings.
//! - **Menus** mount their items on show, equalize the text column, and are placed against an
//!   anchor or a point with [`understory_align`], flipping or clamping to stay in the viewport.
//!   Hiding a menu hides everything below it.
//! - **Commands** raised by clicking an item close the whole chain, innermost first.
//! - **Menu bars** keep at most one entry open and switch entries on hover while open.
//! - **Context menus** and **dropdowns** are plain menus bound to a host element.
//!
//! ## Input
//!
//! The host translates native input into calls: pointer movement over items and menus
//! ([`MenuSystem::pointer_over_item`], [`MenuSystem::pointer_over_menu`]), clicks
//! ([`MenuSystem::click_item`]), window-level presses and releases
//! ([`MenuSystem::pointer_down`], [`MenuSystem::pointer_up`]) and keys
//! ([`MenuSystem::key_down`]). Calls that consume native input return a [`Disposition`].
//!
//! Hover delays are deadlines in host milliseconds. Call [`MenuSystem::advance`] when the clock
//! reaches [`MenuSystem::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_menu::{HeadlessSurface, ItemOptions, MenuEvent, MenuSystem};
//!
//! let mut surface = HeadlessSurface::default();
//! let mut menus = MenuSystem::new();
//!
//! let recent = menus.create_menu();
//! let readme = menus.append(recent, "README.md", ItemOptions::default()).unwrap();
//!
//! let file = menus.create_menu();
//! let open_recent = menus
//!     .append(file, "Open Recent", ItemOptions::default().with_submenu(recent))
//!     .unwrap();
//!
//! menus.show(file, &mut surface).unwrap();
//!
//! // Hovering "Open Recent" expands it once the hover delay has passed.
//! menus.pointer_over_item(open_recent, 0).unwrap();
//! menus.advance(menus.next_deadline().unwrap(), &mut surface);
//! assert!(menus.menu(recent).unwrap().is_shown());
//!
//! // Clicking a leaf closes the whole chain.
//! menus.click_item(readme, &mut surface).unwrap();
//! assert!(!menus.menu(file).unwrap().is_shown());
//! assert!(menus.take_events().contains(&MenuEvent::Command(file)));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bar;
mod config;
mod error;
mod headless;
mod hover;
mod item;
mod listeners;
mod menu;
mod surface;
mod system;
mod trigger;
mod types;

pub use bar::{BarEntry, MenuBar};
pub use config::MenuConfig;
pub use error::MenuError;
pub use headless::HeadlessSurface;
pub use item::{ClickHandler, Entry, ItemOptions, ItemProps, MenuItem, ShowHook};
pub use menu::{Menu, MenuShowHook};
pub use surface::{ItemView, MenuView, Surface};
pub use system::MenuSystem;
pub use trigger::{TriggerBinding, TriggerKind};
pub use types::{
    BarId, Disposition, Icon, IconCode, ItemFlags, ItemId, ItemKind, Key, MenuEvent, MenuId,
    MenuOwner, PointerTarget, TriggerId,
};

pub use understory_align::{Align, Alignment, Placement};
