// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`] with fixed-metric layout.
//!
//! Menus are laid out as a single column of equal-height rows. Text is measured as
//! `chars * char_width`. Useful for tests, demos and hosts that only need positions.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::surface::{ItemView, MenuView, Surface};
use crate::types::{BarId, ItemFlags, ItemId, MenuId};

#[derive(Clone, Debug)]
struct MountedMenu {
    origin: Point,
    items: Vec<ItemId>,
    contains_icons: bool,
}

#[derive(Clone, Debug)]
struct MountedItem {
    menu: MenuId,
    row: usize,
    text: String,
    shortcut: Option<String>,
    natural_width: f64,
    text_width: Option<f64>,
    flags: ItemFlags,
    active: bool,
}

#[derive(Clone, Debug, Default)]
struct MountedBar {
    labels: Vec<String>,
    active: Vec<bool>,
}

/// A surface that keeps mounted menus in hash maps and lays them out with fixed metrics.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    /// Area menus must stay within.
    pub viewport: Rect,
    /// Height of every item row.
    pub row_height: f64,
    /// Advance of every character of item text.
    pub char_width: f64,
    /// Width of the icon and shortcut columns added to the text column.
    pub chrome_width: f64,
    /// Padding plus border of every menu.
    pub insets: Insets,
    /// Top-left corner of every menu bar.
    pub bar_origin: Point,
    /// Size of every menu bar entry; entries are laid out left to right.
    pub bar_entry_size: Size,
    menus: HashMap<MenuId, MountedMenu>,
    items: HashMap<ItemId, MountedItem>,
    bars: HashMap<BarId, MountedBar>,
    mounts: usize,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
            row_height: 20.0,
            char_width: 8.0,
            chrome_width: 48.0,
            insets: Insets::new(2.0, 4.0, 2.0, 4.0),
            bar_origin: Point::ZERO,
            bar_entry_size: Size::new(60.0, 24.0),
            menus: HashMap::new(),
            items: HashMap::new(),
            bars: HashMap::new(),
            mounts: 0,
        }
    }
}

impl HeadlessSurface {
    /// A surface with the default metrics and the given viewport.
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Whether `menu` is mounted.
    pub fn is_mounted(&self, menu: MenuId) -> bool {
        self.menus.contains_key(&menu)
    }

    /// Number of mounted menus.
    pub fn mounted_menus(&self) -> usize {
        self.menus.len()
    }

    /// Total number of mounts since creation.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Origin of a mounted menu.
    pub fn position(&self, menu: MenuId) -> Option<Point> {
        self.menus.get(&menu).map(|m| m.origin)
    }

    /// Whether a mounted menu reserves the icon column.
    pub fn contains_icons(&self, menu: MenuId) -> Option<bool> {
        self.menus.get(&menu).map(|m| m.contains_icons)
    }

    /// Whether a mounted item row is marked expanded.
    pub fn is_item_active(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|i| i.active)
    }

    /// Text column width forced by the menu system, if any.
    pub fn forced_text_width(&self, item: ItemId) -> Option<f64> {
        self.items.get(&item).and_then(|i| i.text_width)
    }

    /// Flags last rendered for a mounted item.
    pub fn item_flags(&self, item: ItemId) -> Option<ItemFlags> {
        self.items.get(&item).map(|i| i.flags)
    }

    /// Label text last rendered for a mounted item.
    pub fn item_text(&self, item: ItemId) -> Option<&str> {
        self.items.get(&item).map(|i| i.text.as_str())
    }

    /// Shortcut hint last rendered for a mounted item.
    pub fn item_shortcut(&self, item: ItemId) -> Option<&str> {
        self.items.get(&item).and_then(|i| i.shortcut.as_deref())
    }

    /// Label of a menu bar entry.
    pub fn bar_label(&self, bar: BarId, index: usize) -> Option<&str> {
        self.bars
            .get(&bar)
            .and_then(|b| b.labels.get(index))
            .map(String::as_str)
    }

    /// Whether a menu bar entry is marked open.
    pub fn is_bar_entry_active(&self, bar: BarId, index: usize) -> bool {
        self.bars
            .get(&bar)
            .and_then(|b| b.active.get(index).copied())
            .unwrap_or(false)
    }

    fn measure(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn text_column(&self, menu: &MountedMenu) -> f64 {
        menu.items
            .iter()
            .filter_map(|id| self.items.get(id))
            .map(|i| i.text_width.unwrap_or(i.natural_width))
            .fold(0.0, f64::max)
    }

    fn inner_width(&self, menu: &MountedMenu) -> f64 {
        self.text_column(menu) + self.chrome_width
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn mount(&mut self, view: &MenuView<'_>) {
        self.unmount(view.id);
        for (row, item) in view.items.iter().enumerate() {
            self.items.insert(
                item.id,
                MountedItem {
                    menu: view.id,
                    row,
                    text: String::from(item.text),
                    shortcut: item.shortcut.map(String::from),
                    natural_width: self.measure(item.text),
                    text_width: None,
                    flags: item.flags,
                    active: item.active,
                },
            );
        }
        self.menus.insert(
            view.id,
            MountedMenu {
                origin: Point::ZERO,
                items: view.items.iter().map(|i| i.id).collect(),
                contains_icons: view.contains_icons,
            },
        );
        self.mounts += 1;
    }

    fn unmount(&mut self, menu: MenuId) {
        if let Some(mounted) = self.menus.remove(&menu) {
            for item in mounted.items {
                if self.items.get(&item).is_some_and(|i| i.menu == menu) {
                    self.items.remove(&item);
                }
            }
        }
    }

    fn menu_size(&self, menu: MenuId) -> Size {
        let Some(mounted) = self.menus.get(&menu) else {
            return Size::ZERO;
        };
        Size::new(
            self.insets.x0 + self.inner_width(mounted) + self.insets.x1,
            self.insets.y0 + mounted.items.len() as f64 * self.row_height + self.insets.y1,
        )
    }

    fn menu_insets(&self, menu: MenuId) -> Insets {
        if self.menus.contains_key(&menu) {
            self.insets
        } else {
            Insets::ZERO
        }
    }

    fn item_bounds(&self, item: ItemId) -> Rect {
        let Some(mounted) = self.items.get(&item) else {
            return Rect::ZERO;
        };
        let Some(menu) = self.menus.get(&mounted.menu) else {
            return Rect::ZERO;
        };
        let origin = menu.origin
            + Vec2::new(
                self.insets.x0,
                self.insets.y0 + mounted.row as f64 * self.row_height,
            );
        Rect::from_origin_size(origin, Size::new(self.inner_width(menu), self.row_height))
    }

    fn text_width(&self, item: ItemId) -> f64 {
        self.items
            .get(&item)
            .map_or(0.0, |i| i.text_width.unwrap_or(i.natural_width))
    }

    fn set_text_width(&mut self, item: ItemId, width: f64) {
        if let Some(mounted) = self.items.get_mut(&item) {
            mounted.text_width = Some(width);
        }
    }

    fn set_position(&mut self, menu: MenuId, origin: Point) {
        if let Some(mounted) = self.menus.get_mut(&menu) {
            mounted.origin = origin;
        }
    }

    fn set_item_active(&mut self, item: ItemId, active: bool) {
        if let Some(mounted) = self.items.get_mut(&item) {
            mounted.active = active;
        }
    }

    fn update_item(&mut self, view: &ItemView<'_>) {
        let natural_width = self.measure(view.text);
        if let Some(mounted) = self.items.get_mut(&view.id) {
            mounted.text = String::from(view.text);
            mounted.shortcut = view.shortcut.map(String::from);
            mounted.natural_width = natural_width;
            mounted.flags = view.flags;
            mounted.active = view.active;
        }
    }

    fn mount_bar(&mut self, bar: BarId, labels: &[&str]) {
        self.bars.insert(
            bar,
            MountedBar {
                labels: labels.iter().map(|l| String::from(*l)).collect(),
                active: alloc::vec![false; labels.len()],
            },
        );
    }

    fn bar_entry_bounds(&self, bar: BarId, index: usize) -> Rect {
        if !self.bars.contains_key(&bar) {
            return Rect::ZERO;
        }
        let origin = self.bar_origin + Vec2::new(index as f64 * self.bar_entry_size.width, 0.0);
        Rect::from_origin_size(origin, self.bar_entry_size)
    }

    fn set_bar_entry_active(&mut self, bar: BarId, index: usize, active: bool) {
        if let Some(slot) = self
            .bars
            .get_mut(&bar)
            .and_then(|b| b.active.get_mut(index))
        {
            *slot = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MenuSystem;
    use crate::item::ItemOptions;
    use crate::types::ItemKind;

    #[test]
    fn layout_uses_fixed_metrics() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let first = menus.append(menu, "Cut", ItemOptions::default()).unwrap();
        let second = menus.append(menu, "Paste", ItemOptions::default()).unwrap();
        menus.show(menu, &mut surface).unwrap();
        surface.set_position(menu, Point::new(10.0, 20.0));

        let size = surface.menu_size(menu);
        assert_eq!(size, Size::new(2.0 + 40.0 + 48.0 + 2.0, 4.0 + 40.0 + 4.0));
        assert_eq!(
            surface.item_bounds(second),
            Rect::new(12.0, 44.0, 12.0 + 88.0, 64.0)
        );
        assert_eq!(surface.text_width(first), 40.0);
    }

    #[test]
    fn unknown_handles_are_zero_sized() {
        let surface = HeadlessSurface::default();
        assert_eq!(surface.menu_size(MenuId::new(3)), Size::ZERO);
        assert_eq!(surface.item_bounds(ItemId::new(3)), Rect::ZERO);
        assert_eq!(surface.bar_entry_bounds(BarId::new(0), 1), Rect::ZERO);
        assert!(!surface.is_bar_entry_active(BarId::new(0), 1));
    }

    #[test]
    fn update_refreshes_text_and_flags() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let item = menus
            .append(menu, "Paste", ItemOptions::default().with_shortcut("Ctrl+V"))
            .unwrap();
        menus.show(menu, &mut surface).unwrap();
        assert_eq!(surface.item_text(item), Some("Paste"));
        assert_eq!(surface.item_shortcut(item), Some("Ctrl+V"));

        surface.update_item(&ItemView {
            id: item,
            kind: ItemKind::Command,
            text: "Paste text",
            shortcut: None,
            icon: None,
            flags: ItemFlags::DISABLED,
            has_submenu: false,
            active: false,
        });
        assert_eq!(surface.item_text(item), Some("Paste text"));
        assert_eq!(surface.item_shortcut(item), None);
        assert_eq!(surface.item_flags(item), Some(ItemFlags::DISABLED));
    }

    #[test]
    fn remount_replaces_rows() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        menus.append(menu, "One", ItemOptions::default()).unwrap();
        menus.show(menu, &mut surface).unwrap();
        menus.show(menu, &mut surface).unwrap();
        assert_eq!(surface.mounted_menus(), 1);
        assert_eq!(surface.mount_count(), 2);
        menus.hide(menu, &mut surface).unwrap();
        assert_eq!(surface.mounted_menus(), 0);
    }
}
