// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering host contract.
//!
//! A [`Surface`] owns the actual elements (DOM nodes, retained widgets, terminal cells). The
//! menu system never measures or draws on its own: it hands the surface a [`MenuView`] to mount,
//! asks it for measurements, and tells it where to put things.

use alloc::vec::Vec;
use kurbo::{Insets, Point, Rect, Size};

use crate::item::{ItemProps, MenuItem};
use crate::types::{BarId, Icon, ItemFlags, ItemId, ItemKind, MenuId};

/// A snapshot of one item, passed to the surface when mounting or refreshing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView<'a> {
    /// Item handle.
    pub id: ItemId,
    /// Row kind.
    pub kind: ItemKind,
    /// Label text.
    pub text: &'a str,
    /// Shortcut hint.
    pub shortcut: Option<&'a str>,
    /// Icon.
    pub icon: Option<&'a Icon>,
    /// Disabled, checked and default flags.
    pub flags: ItemFlags,
    /// Whether the item opens a submenu.
    pub has_submenu: bool,
    /// Whether the item's submenu is expanded.
    pub active: bool,
}

impl<'a> ItemView<'a> {
    pub(crate) fn new(id: ItemId, item: &'a MenuItem) -> Self {
        let ItemProps {
            text,
            shortcut,
            icon,
            flags,
        } = &item.props;
        Self {
            id,
            kind: item.kind,
            text,
            shortcut: shortcut.as_deref(),
            icon: icon.as_ref(),
            flags: *flags,
            has_submenu: item.submenu.is_some(),
            active: item.active,
        }
    }
}

/// A snapshot of a menu, passed to [`Surface::mount`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView<'a> {
    /// Menu handle.
    pub id: MenuId,
    /// Items in display order.
    pub items: Vec<ItemView<'a>>,
    /// Whether any item uses the icon column (an icon, a checkbox or a radio).
    pub contains_icons: bool,
}

/// Rendering host for menus and menu bars.
///
/// All geometry is in viewport coordinates. Implementations should tolerate handles they do
/// not know (for example by returning zero-sized boxes).
pub trait Surface {
    /// The visible area menus must stay within.
    fn viewport(&self) -> Rect;

    /// Create and attach the element for a menu.
    fn mount(&mut self, view: &MenuView<'_>);

    /// Detach and drop the element for a menu.
    fn unmount(&mut self, menu: MenuId);

    /// Border-box size of a mounted menu.
    fn menu_size(&self, menu: MenuId) -> Size;

    /// Padding plus border of a mounted menu, per edge.
    fn menu_insets(&self, menu: MenuId) -> Insets;

    /// Border box of a mounted item row.
    fn item_bounds(&self, item: ItemId) -> Rect;

    /// Current width of an item's text column.
    fn text_width(&self, item: ItemId) -> f64;

    /// Force the width of an item's text column.
    fn set_text_width(&mut self, item: ItemId, width: f64);

    /// Move a mounted menu so its border box starts at `origin`.
    fn set_position(&mut self, menu: MenuId, origin: Point);

    /// Mark an item row as expanded or not.
    fn set_item_active(&mut self, item: ItemId, active: bool);

    /// Refresh an item row with its current text, shortcut, icon and flags.
    fn update_item(&mut self, view: &ItemView<'_>);

    /// Create the element for a menu bar, replacing any previous one.
    fn mount_bar(&mut self, bar: BarId, labels: &[&str]);

    /// Border box of a menu bar entry.
    fn bar_entry_bounds(&self, bar: BarId, index: usize) -> Rect;

    /// Mark a menu bar entry as open or not.
    fn set_bar_entry_active(&mut self, bar: BarId, index: usize, active: bool);
}
