// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menus: construction, show/hide lifecycle and placement.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use understory_align::{Align, Alignment, Placement, align_box};

use crate::error::MenuError;
use crate::item::{Entry, ItemOptions, MenuItem};
use crate::listeners::Listener;
use crate::surface::{ItemView, MenuView, Surface};
use crate::system::MenuSystem;
use crate::types::{ItemId, ItemKind, MenuEvent, MenuId, MenuOwner};

/// Hook run each time a menu is about to be shown, before its items are rendered.
///
/// It gets the whole system, so it can [`clear`](MenuSystem::clear) the menu and append fresh
/// items. Item show hooks run after it, on whatever items the menu then holds.
pub type MenuShowHook = Box<dyn FnMut(&mut MenuSystem, MenuId)>;

/// An ordered list of items that can be shown, hidden and positioned.
#[derive(Default)]
pub struct Menu {
    pub(crate) items: Vec<ItemId>,
    pub(crate) owner: Option<MenuOwner>,
    /// Bound to a context-menu or dropdown trigger.
    pub(crate) bound: bool,
    pub(crate) shown: bool,
    pub(crate) active: bool,
    pub(crate) position: Option<Point>,
    /// Pending background-hover timer deadline.
    pub(crate) collapse_deadline: Option<u64>,
    pub(crate) on_show: Option<MenuShowHook>,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("items", &self.items)
            .field("owner", &self.owner)
            .field("bound", &self.bound)
            .field("shown", &self.shown)
            .field("active", &self.active)
            .field("position", &self.position)
            .field("collapse_deadline", &self.collapse_deadline)
            .field("on_show", &self.on_show.is_some())
            .finish()
    }
}

impl Menu {
    /// Items in display order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of items, separators included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// What opens this menu, if anything.
    pub fn owner(&self) -> Option<MenuOwner> {
        self.owner
    }

    /// The item whose submenu this is.
    pub fn parent_item(&self) -> Option<ItemId> {
        match self.owner {
            Some(MenuOwner::Item(item)) => Some(item),
            _ => None,
        }
    }

    /// Whether the menu is mounted on the surface.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether the menu currently receives input focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Origin last handed to the surface while shown.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Whether a background-hover collapse is pending.
    pub fn has_pending_collapse(&self) -> bool {
        self.collapse_deadline.is_some()
    }
}

impl MenuSystem {
    /// Create an empty, hidden menu.
    pub fn create_menu(&mut self) -> MenuId {
        let id = MenuId::new(self.menus.len());
        self.menus.push(Menu::default());
        id
    }

    /// Append a new item labelled `label` to `menu`.
    ///
    /// `options.props.text` is replaced by `label`. Appending a checked radio item unchecks the
    /// other radios of its group in `menu`.
    pub fn append(
        &mut self,
        menu: MenuId,
        label: impl Into<String>,
        options: ItemOptions,
    ) -> Result<ItemId, MenuError> {
        self.menu_ref(menu)?;
        let submenu = options.submenu;
        if let Some(sub) = submenu {
            self.check_submenu(Some(menu), sub, None)?;
        }
        let id = self.push_item(options.with_text(label));
        self.attach(menu, id);
        Ok(id)
    }

    /// Append a separator to `menu`.
    pub fn append_separator(&mut self, menu: MenuId) -> Result<ItemId, MenuError> {
        self.menu_ref(menu)?;
        let id = self.push_item(ItemOptions::separator());
        self.attach(menu, id);
        Ok(id)
    }

    /// Append several entries to `menu`, returning `menu` for chaining.
    ///
    /// Entries are appended in order. If one is rejected, the entries before it stay appended.
    ///
    /// ```
    /// use understory_menu::{Entry, ItemOptions, MenuSystem};
    ///
    /// let mut menus = MenuSystem::new();
    /// let menu = menus.create_menu();
    /// let prebuilt = menus.create_item(ItemOptions::command("Close")).unwrap();
    /// menus
    ///     .populate_from(menu, [
    ///         Entry::from(ItemOptions::command("New").with_shortcut("Ctrl+N")),
    ///         Entry::Separator,
    ///         Entry::from(prebuilt),
    ///     ])
    ///     .unwrap();
    /// assert_eq!(menus.menu(menu).unwrap().len(), 3);
    /// ```
    pub fn populate_from<I>(&mut self, menu: MenuId, entries: I) -> Result<MenuId, MenuError>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        self.menu_ref(menu)?;
        for entry in entries {
            match entry.into() {
                Entry::Descriptor(options) => {
                    if let Some(sub) = options.submenu {
                        self.check_submenu(Some(menu), sub, None)?;
                    }
                    let id = self.push_item(options);
                    self.attach(menu, id);
                }
                Entry::Item(id) => {
                    let item = self.item_ref(id)?;
                    if item.parent_menu.is_some() {
                        return Err(MenuError::ItemAlreadyAttached(id));
                    }
                    if let Some(sub) = item.submenu
                        && self.would_cycle(menu, sub)
                    {
                        return Err(MenuError::SubmenuCycle(sub));
                    }
                    self.attach(menu, id);
                }
                Entry::Separator => {
                    let id = self.push_item(ItemOptions::separator());
                    self.attach(menu, id);
                }
            }
        }
        Ok(menu)
    }

    /// Detach every item from a hidden `menu`.
    ///
    /// The items keep their handles and can be attached elsewhere with
    /// [`populate_from`](Self::populate_from). Their pending hover timers are cancelled and their
    /// submenus become free menus again.
    pub fn clear(&mut self, menu: MenuId) -> Result<(), MenuError> {
        if self.menu_ref(menu)?.shown {
            return Err(MenuError::Shown(menu));
        }
        let items = core::mem::take(&mut self.menus[menu.idx()].items);
        for &item in &items {
            let it = &mut self.items[item.idx()];
            it.parent_menu = None;
            it.hover_deadline = None;
            it.active = false;
            if let Some(sub) = it.submenu.take() {
                self.menus[sub.idx()].owner = None;
            }
        }
        tracing::debug!(?menu, detached = items.len(), "menu cleared");
        Ok(())
    }

    /// Run `hook` each time `menu` is about to be shown, replacing any previous hook.
    ///
    /// ```
    /// use understory_menu::{HeadlessSurface, ItemOptions, MenuSystem};
    ///
    /// let mut surface = HeadlessSurface::default();
    /// let mut menus = MenuSystem::new();
    /// let recent = menus.create_menu();
    /// let mut opened = 0;
    /// menus
    ///     .set_menu_show_hook(recent, move |menus, menu| {
    ///         opened += 1;
    ///         menus.clear(menu).unwrap();
    ///         for n in 0..opened {
    ///             menus.append(menu, format!("file{n}.txt"), ItemOptions::default()).unwrap();
    ///         }
    ///     })
    ///     .unwrap();
    ///
    /// menus.show(recent, &mut surface).unwrap();
    /// menus.show(recent, &mut surface).unwrap();
    /// assert_eq!(menus.menu(recent).unwrap().len(), 2);
    /// ```
    pub fn set_menu_show_hook(
        &mut self,
        menu: MenuId,
        hook: impl FnMut(&mut Self, MenuId) + 'static,
    ) -> Result<(), MenuError> {
        self.menu_ref(menu)?;
        self.menus[menu.idx()].on_show = Some(Box::new(hook));
        Ok(())
    }

    /// Remove the show hook of `menu`.
    pub fn clear_menu_show_hook(&mut self, menu: MenuId) -> Result<(), MenuError> {
        self.menu_ref(menu)?;
        self.menus[menu.idx()].on_show = None;
        Ok(())
    }

    /// Mount `menu`, focus it and equalize its text column.
    ///
    /// Showing a menu that is already shown hides it first. Outside-click listeners of a shown
    /// context menu or dropdown stay installed across the re-show.
    pub fn show<S: Surface>(&mut self, menu: MenuId, surface: &mut S) -> Result<(), MenuError> {
        self.menu_ref(menu)?;
        self.show_inner(menu, surface);
        Ok(())
    }

    /// Close `menu` and every submenu below it.
    ///
    /// A submenu also collapses the item that opened it, and a menu bar drop-down collapses its
    /// bar entry. Hiding a hidden menu does nothing.
    pub fn hide<S: Surface>(&mut self, menu: MenuId, surface: &mut S) -> Result<(), MenuError> {
        self.menu_ref(menu)?;
        self.close_menu(menu, surface);
        Ok(())
    }

    /// Position a shown menu against `anchor`.
    ///
    /// When the vertical placement ends up as [`Placement::Start`] or [`Placement::End`], the
    /// menu is shifted by its top or bottom insets so its content, not its border, lines up
    /// with the anchor.
    pub fn align_to_element<S: Surface>(
        &mut self,
        menu: MenuId,
        anchor: Rect,
        horizontal: Align,
        vertical: Align,
        surface: &mut S,
    ) -> Result<Alignment, MenuError> {
        if !self.menu_ref(menu)?.shown {
            return Err(MenuError::NotShown(menu));
        }
        Ok(self.place(menu, anchor, horizontal, vertical, surface))
    }

    /// Position a shown menu at a pointer location, opening down and to the right when it fits.
    pub fn align_to_point<S: Surface>(
        &mut self,
        menu: MenuId,
        point: Point,
        surface: &mut S,
    ) -> Result<Alignment, MenuError> {
        if !self.menu_ref(menu)?.shown {
            return Err(MenuError::NotShown(menu));
        }
        Ok(self.place_at_point(menu, point, surface))
    }

    fn push_item(&mut self, options: ItemOptions) -> ItemId {
        let id = ItemId::new(self.items.len());
        let submenu = options.submenu;
        self.items.push(MenuItem::from_options(options));
        if let Some(sub) = submenu {
            self.menus[sub.idx()].owner = Some(MenuOwner::Item(id));
            self.items[id.idx()].submenu = Some(sub);
        }
        id
    }

    fn attach(&mut self, menu: MenuId, item: ItemId) {
        self.items[item.idx()].parent_menu = Some(menu);
        self.menus[menu.idx()].items.push(item);
        if self.items[item.idx()].is_checked() {
            self.apply_checked(item, true);
        }
    }

    pub(crate) fn show_inner<S: Surface>(&mut self, menu: MenuId, surface: &mut S) {
        let mut popups = SmallVec::<[Listener; 2]>::new();
        if self.menus[menu.idx()].shown {
            popups = self.outside.popups_for(menu);
            self.hide_inner(menu, surface);
        }

        if let Some(mut hook) = self.menus[menu.idx()].on_show.take() {
            hook(self, menu);
            // Keep a replacement installed by the hook itself.
            let slot = &mut self.menus[menu.idx()].on_show;
            if slot.is_none() {
                *slot = Some(hook);
            }
        }

        let item_ids = self.menus[menu.idx()].items.clone();
        for &item in &item_ids {
            self.items[item.idx()].run_show_hook();
        }

        {
            let view = MenuView {
                id: menu,
                items: item_ids
                    .iter()
                    .map(|&item| ItemView::new(item, &self.items[item.idx()]))
                    .collect(),
                contains_icons: item_ids
                    .iter()
                    .any(|item| self.items[item.idx()].wants_icon_column()),
            };
            surface.mount(&view);
        }

        let m = &mut self.menus[menu.idx()];
        m.shown = true;
        m.active = true;
        m.position = None;
        self.keys.focus(menu);
        self.events.push(MenuEvent::Shown(menu));
        for listener in popups {
            self.outside.install(listener);
        }

        let text_items = item_ids
            .iter()
            .copied()
            .filter(|item| self.items[item.idx()].kind != ItemKind::Separator);
        let widest = text_items
            .clone()
            .map(|item| surface.text_width(item))
            .fold(0.0, f64::max);
        for item in text_items {
            surface.set_text_width(item, widest);
        }

        tracing::debug!(?menu, items = item_ids.len(), "menu shown");
    }

    pub(crate) fn hide_inner<S: Surface>(&mut self, menu: MenuId, surface: &mut S) {
        let Some(m) = self.menus.get_mut(menu.idx()) else {
            return;
        };
        if !m.shown {
            return;
        }
        // Flip state first so cascades triggered below see this menu as closed.
        m.shown = false;
        m.active = false;
        m.collapse_deadline = None;
        let owner = m.owner;
        let item_ids = m.items.clone();

        for &item in &item_ids {
            self.items[item.idx()].hover_deadline = None;
            self.deactivate_item(item, surface);
        }

        surface.unmount(menu);
        self.outside.remove_menu(menu);
        self.keys.release(menu, None);
        self.events.push(MenuEvent::Dismissed(menu));
        tracing::debug!(?menu, "menu hidden");

        // Dismissal hands input back to the parent menu if it is still open.
        let parent = match owner {
            Some(MenuOwner::Item(item)) => self.items[item.idx()]
                .parent_menu
                .filter(|p| self.menus[p.idx()].shown),
            _ => None,
        };
        if let Some(parent) = parent {
            self.menus[parent.idx()].active = true;
            self.keys.focus(parent);
        }
    }

    pub(crate) fn place<S: Surface>(
        &mut self,
        menu: MenuId,
        anchor: Rect,
        horizontal: Align,
        vertical: Align,
        surface: &mut S,
    ) -> Alignment {
        let size = surface.menu_size(menu);
        let mut placed = align_box(surface.viewport(), size, anchor, horizontal, vertical);
        let insets = surface.menu_insets(menu);
        match placed.vertical {
            Placement::Start => placed.origin.y -= insets.y0,
            Placement::End => placed.origin.y += insets.y1,
            _ => {}
        }
        self.set_position(menu, placed.origin, surface);
        placed
    }

    pub(crate) fn place_at_point<S: Surface>(
        &mut self,
        menu: MenuId,
        point: Point,
        surface: &mut S,
    ) -> Alignment {
        let size = surface.menu_size(menu);
        let reference = Rect::from_origin_size(point, Size::ZERO);
        let placed = align_box(
            surface.viewport(),
            size,
            reference,
            Align::EndOutside,
            Align::EndOutside,
        );
        self.set_position(menu, placed.origin, surface);
        placed
    }

    fn set_position<S: Surface>(&mut self, menu: MenuId, origin: Point, surface: &mut S) {
        surface.set_position(menu, origin);
        self.menus[menu.idx()].position = Some(origin);
    }
}
