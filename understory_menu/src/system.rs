// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The arena that owns menus, items, bars and triggers, plus window-level input.

use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_align::Align;

use crate::bar::MenuBar;
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::item::{ItemOptions, MenuItem};
use crate::listeners::{KeyRouter, Listener, OutsideClick};
use crate::menu::Menu;
use crate::surface::{ItemView, Surface};
use crate::trigger::{TriggerBinding, TriggerKind};
use crate::types::{
    BarId, Disposition, ItemFlags, ItemId, ItemKind, Key, MenuEvent, MenuId, MenuOwner,
    PointerTarget,
};

/// Owner of every menu, item, menu bar and trigger binding.
///
/// All state changes go through `&mut self` and, when something visible changes, a
/// [`Surface`]. Observable lifecycle changes are queued as [`MenuEvent`]s and drained with
/// [`MenuSystem::take_events`].
#[derive(Debug, Default)]
pub struct MenuSystem {
    pub(crate) config: MenuConfig,
    pub(crate) menus: Vec<Menu>,
    pub(crate) items: Vec<MenuItem>,
    pub(crate) bars: Vec<MenuBar>,
    pub(crate) triggers: Vec<TriggerBinding>,
    pub(crate) outside: OutsideClick,
    pub(crate) keys: KeyRouter,
    pub(crate) events: Vec<MenuEvent>,
}

impl MenuSystem {
    /// Create an empty system with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty system with `config`.
    pub fn with_config(config: MenuConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Mutable configuration. Changes apply to timers armed afterwards.
    pub fn config_mut(&mut self) -> &mut MenuConfig {
        &mut self.config
    }

    /// Look up a menu.
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id.idx())
    }

    /// Look up an item.
    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id.idx())
    }

    /// Look up a menu bar.
    pub fn bar(&self, id: BarId) -> Option<&MenuBar> {
        self.bars.get(id.idx())
    }

    /// The menu currently receiving key input.
    pub fn key_target(&self) -> Option<MenuId> {
        self.keys.target()
    }

    /// Number of installed outside-click listeners.
    pub fn outside_listener_count(&self) -> usize {
        self.outside.len()
    }

    /// Events queued since the last [`take_events`](Self::take_events).
    pub fn events(&self) -> &[MenuEvent] {
        &self.events
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<MenuEvent> {
        core::mem::take(&mut self.events)
    }

    /// Create an item that belongs to no menu yet.
    ///
    /// Attach it later with [`populate_from`](Self::populate_from).
    pub fn create_item(&mut self, options: ItemOptions) -> Result<ItemId, MenuError> {
        if let Some(sub) = options.submenu {
            self.check_submenu(None, sub, None)?;
        }
        let id = ItemId::new(self.items.len());
        let submenu = options.submenu;
        self.items.push(MenuItem::from_options(options));
        if let Some(sub) = submenu {
            self.menus[sub.idx()].owner = Some(MenuOwner::Item(id));
            self.items[id.idx()].submenu = Some(sub);
        }
        Ok(id)
    }

    /// Attach, replace or detach the submenu opened by `item`.
    ///
    /// An expanded item is collapsed first. A detached submenu becomes a free menu again.
    pub fn set_submenu<S: Surface>(
        &mut self,
        item: ItemId,
        submenu: Option<MenuId>,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        let it = self.item_ref(item)?;
        if it.submenu == submenu {
            return Ok(());
        }
        if let Some(sub) = submenu {
            self.check_submenu(it.parent_menu, sub, Some(item))?;
        }
        self.deactivate_item(item, surface);
        if let Some(old) = self.items[item.idx()].submenu.take() {
            self.hide_inner(old, surface);
            self.menus[old.idx()].owner = None;
        }
        if let Some(sub) = submenu {
            self.menus[sub.idx()].owner = Some(MenuOwner::Item(item));
            self.items[item.idx()].submenu = Some(sub);
        }
        self.refresh_items(&[item], surface);
        Ok(())
    }

    /// Check or uncheck `item`.
    ///
    /// Checking a radio item unchecks the other radios of its group in the same menu.
    pub fn set_checked<S: Surface>(
        &mut self,
        item: ItemId,
        checked: bool,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        self.item_ref(item)?;
        let changed = self.apply_checked(item, checked);
        self.refresh_items(&changed, surface);
        Ok(())
    }

    /// Enable or disable `item`. Disabling an expanded item collapses it.
    pub fn set_disabled<S: Surface>(
        &mut self,
        item: ItemId,
        disabled: bool,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        let it = self.item_ref(item)?;
        if it.is_disabled() == disabled {
            return Ok(());
        }
        if disabled {
            self.deactivate_item(item, surface);
        }
        self.items[item.idx()]
            .props
            .flags
            .set(ItemFlags::DISABLED, disabled);
        self.refresh_items(&[item], surface);
        Ok(())
    }

    /// Expand or collapse `item`.
    ///
    /// Activating collapses every expanded sibling, shows the submenu (if any) to the right of
    /// the item and marks the row. Setting the current state again does nothing.
    pub fn set_item_active<S: Surface>(
        &mut self,
        item: ItemId,
        active: bool,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        self.item_ref(item)?;
        if active {
            self.activate_item(item, surface);
        } else {
            self.deactivate_item(item, surface);
        }
        Ok(())
    }

    /// Handle a click on `item`.
    ///
    /// Disabled items and separators swallow the click. Otherwise checkboxes toggle, radios
    /// check, the click handler runs and [`MenuEvent::Clicked`] is queued. Items without a
    /// submenu in a shown menu then raise a command that closes every menu up to the root.
    pub fn click_item<S: Surface>(
        &mut self,
        item: ItemId,
        surface: &mut S,
    ) -> Result<Disposition, MenuError> {
        let it = self.item_ref(item)?;
        if it.kind == ItemKind::Separator || it.is_disabled() {
            return Ok(Disposition::CONSUMED);
        }
        let kind = it.kind;
        let changed = match kind {
            ItemKind::Checkbox => {
                let checked = !it.is_checked();
                self.apply_checked(item, checked)
            }
            ItemKind::Radio => self.apply_checked(item, true),
            _ => SmallVec::new(),
        };
        self.refresh_items(&changed, surface);

        let it = &mut self.items[item.idx()];
        if let Some(handler) = it.on_click.as_mut() {
            handler(item, &it.props);
        }
        self.events.push(MenuEvent::Clicked(item));
        tracing::debug!(?item, ?kind, "item clicked");

        let it = &self.items[item.idx()];
        if it.submenu.is_none()
            && kind.raises_command()
            && let Some(parent) = it.parent_menu
            && self.menus[parent.idx()].shown
        {
            self.dispatch_command(parent, surface);
        }
        Ok(Disposition::CONSUMED)
    }

    /// Route a key press to the menu receiving key input.
    ///
    /// Escape and Left close that menu. Any key is stopped from reaching the page while a menu
    /// has key input.
    pub fn key_down<S: Surface>(&mut self, key: Key, surface: &mut S) -> Disposition {
        let Some(target) = self.keys.target() else {
            return Disposition::IGNORED;
        };
        match key {
            Key::Escape | Key::ArrowLeft => {
                tracing::debug!(menu = ?target, ?key, "key closes menu");
                self.close_menu(target, surface);
                Disposition::CONSUMED
            }
            Key::Other => Disposition::STOPPED,
        }
    }

    /// Handle a pointer press anywhere in the window.
    ///
    /// Presses inside a menu are consumed. Anywhere else, open context menus and dropdowns
    /// close, except a dropdown whose own trigger was pressed.
    pub fn pointer_down<S: Surface>(
        &mut self,
        target: PointerTarget,
        surface: &mut S,
    ) -> Disposition {
        if matches!(target, PointerTarget::Menu(_) | PointerTarget::Item(_)) {
            return Disposition::CONSUMED;
        }
        for listener in self.outside.snapshot() {
            let Listener::Popup { menu, trigger } = listener else {
                continue;
            };
            if target == PointerTarget::Trigger(trigger)
                && self
                    .triggers
                    .get(trigger.idx())
                    .is_some_and(|t| matches!(t.kind, TriggerKind::Dropdown { .. }))
            {
                continue;
            }
            tracing::debug!(?menu, "pointer down outside popup");
            self.hide_inner(menu, surface);
            self.outside.remove(listener);
        }
        Disposition::IGNORED
    }

    /// Handle a pointer release anywhere in the window.
    ///
    /// Releases inside a menu are consumed. Anywhere else except on the bar itself, an open menu
    /// bar collapses.
    pub fn pointer_up<S: Surface>(
        &mut self,
        target: PointerTarget,
        surface: &mut S,
    ) -> Disposition {
        if matches!(target, PointerTarget::Menu(_) | PointerTarget::Item(_)) {
            return Disposition::CONSUMED;
        }
        for listener in self.outside.snapshot() {
            let Listener::Bar(bar) = listener else {
                continue;
            };
            let on_bar = matches!(
                target,
                PointerTarget::Bar(b) | PointerTarget::BarEntry(b, _) if b == bar
            );
            if !on_bar {
                tracing::debug!(?bar, "pointer up outside menu bar");
                self.collapse_bar(bar, surface);
            }
        }
        Disposition::IGNORED
    }

    /// The window lost focus.
    pub fn window_blurred<S: Surface>(&mut self, surface: &mut S) {
        if self.config.dismiss_on_blur {
            self.dismiss_all(surface);
        }
    }

    /// The viewport was resized.
    pub fn viewport_resized<S: Surface>(&mut self, surface: &mut S) {
        if self.config.dismiss_on_resize {
            self.dismiss_all(surface);
        }
    }

    /// Close every open menu and collapse every menu bar.
    pub fn dismiss_all<S: Surface>(&mut self, surface: &mut S) {
        for index in 0..self.bars.len() {
            self.collapse_bar(BarId::new(index), surface);
        }
        for index in 0..self.menus.len() {
            let menu = MenuId::new(index);
            if self.menus[index].shown {
                self.close_menu(menu, surface);
            }
        }
    }

    pub(crate) fn menu_ref(&self, id: MenuId) -> Result<&Menu, MenuError> {
        self.menus.get(id.idx()).ok_or(MenuError::UnknownMenu(id))
    }

    pub(crate) fn item_ref(&self, id: ItemId) -> Result<&MenuItem, MenuError> {
        self.items.get(id.idx()).ok_or(MenuError::UnknownItem(id))
    }

    /// Validate attaching `sub` below `host` as the submenu of `item`.
    pub(crate) fn check_submenu(
        &self,
        host: Option<MenuId>,
        sub: MenuId,
        item: Option<ItemId>,
    ) -> Result<(), MenuError> {
        let menu = self.menu_ref(sub)?;
        match menu.owner {
            None => {}
            Some(MenuOwner::Item(owner)) if Some(owner) == item => {}
            Some(_) => return Err(MenuError::AlreadyOwned(sub)),
        }
        if menu.bound {
            return Err(MenuError::AlreadyOwned(sub));
        }
        if let Some(host) = host
            && self.would_cycle(host, sub)
        {
            return Err(MenuError::SubmenuCycle(sub));
        }
        Ok(())
    }

    /// Whether `sub` is `host` or one of its ancestors.
    pub(crate) fn would_cycle(&self, host: MenuId, sub: MenuId) -> bool {
        let mut current = Some(host);
        for _ in 0..=self.menus.len() {
            let Some(menu) = current else {
                return false;
            };
            if menu == sub {
                return true;
            }
            current = match self.menus[menu.idx()].owner {
                Some(MenuOwner::Item(item)) => self.items[item.idx()].parent_menu,
                _ => None,
            };
        }
        true
    }

    /// Set `item`'s checked flag and return every item whose flag changed.
    pub(crate) fn apply_checked(&mut self, item: ItemId, checked: bool) -> SmallVec<[ItemId; 4]> {
        let mut changed = SmallVec::new();
        let it = &mut self.items[item.idx()];
        if it.is_checked() != checked {
            it.props.flags.set(ItemFlags::CHECKED, checked);
            changed.push(item);
        }
        let it = &self.items[item.idx()];
        if !checked || it.kind != ItemKind::Radio {
            return changed;
        }
        let Some(parent) = it.parent_menu else {
            return changed;
        };
        for &sibling in &self.menus[parent.idx()].items {
            if sibling == item {
                continue;
            }
            let same = self.items[item.idx()].same_radio_group(&self.items[sibling.idx()]);
            let other = &mut self.items[sibling.idx()];
            if same && other.is_checked() {
                other.props.flags.remove(ItemFlags::CHECKED);
                changed.push(sibling);
            }
        }
        changed
    }

    /// Push fresh views of `items` to the surface for those in a shown menu.
    pub(crate) fn refresh_items<S: Surface>(&self, items: &[ItemId], surface: &mut S) {
        for &id in items {
            let item = &self.items[id.idx()];
            if item
                .parent_menu
                .is_some_and(|menu| self.menus[menu.idx()].shown)
            {
                surface.update_item(&ItemView::new(id, item));
            }
        }
    }

    pub(crate) fn activate_item<S: Surface>(&mut self, item: ItemId, surface: &mut S) {
        if self.items[item.idx()].active {
            return;
        }
        let parent = self.items[item.idx()].parent_menu;
        if let Some(parent) = parent {
            let siblings = self.menus[parent.idx()].items.clone();
            for sibling in siblings {
                if sibling != item {
                    self.deactivate_item(sibling, surface);
                }
            }
        }
        let it = &mut self.items[item.idx()];
        it.active = true;
        it.hover_deadline = None;
        let submenu = it.submenu;
        tracing::debug!(?item, ?submenu, "item activated");
        if let Some(sub) = submenu {
            if let Some(parent) = parent {
                self.menus[parent.idx()].active = false;
            }
            self.show_inner(sub, surface);
            let anchor = surface.item_bounds(item);
            self.place(sub, anchor, Align::EndOutside, Align::Start, surface);
        }
        if parent.is_some_and(|p| self.menus[p.idx()].shown) {
            surface.set_item_active(item, true);
        }
    }

    pub(crate) fn deactivate_item<S: Surface>(&mut self, item: ItemId, surface: &mut S) {
        let it = &mut self.items[item.idx()];
        if !it.active {
            return;
        }
        it.active = false;
        let submenu = it.submenu;
        let parent = it.parent_menu;
        tracing::debug!(?item, "item deactivated");
        if let Some(sub) = submenu {
            self.hide_inner(sub, surface);
        }
        if parent.is_some_and(|p| self.menus[p.idx()].shown) {
            surface.set_item_active(item, false);
        }
    }

    /// Close `menu` through whatever opened it.
    pub(crate) fn close_menu<S: Surface>(&mut self, menu: MenuId, surface: &mut S) {
        match self.menus[menu.idx()].owner {
            Some(MenuOwner::Item(item)) if self.items[item.idx()].active => {
                self.deactivate_item(item, surface);
            }
            Some(MenuOwner::Bar(bar, index))
                if self.bars[bar.idx()].active_index == Some(index) =>
            {
                self.collapse_bar(bar, surface);
            }
            _ => {}
        }
        self.hide_inner(menu, surface);
    }

    /// Raise a command from `menu`: hide it and every ancestor, innermost first, queueing a
    /// [`MenuEvent::Command`] for each.
    pub(crate) fn dispatch_command<S: Surface>(&mut self, menu: MenuId, surface: &mut S) {
        let mut chain: SmallVec<[MenuId; 4]> = SmallVec::new();
        let mut current = Some(menu);
        while let Some(m) = current
            && !chain.contains(&m)
        {
            chain.push(m);
            current = match self.menus[m.idx()].owner {
                Some(MenuOwner::Item(item)) => self.items[item.idx()].parent_menu,
                _ => None,
            };
        }

        for &m in &chain {
            self.hide_inner(m, surface);
            self.events.push(MenuEvent::Command(m));
        }

        if let Some(&root) = chain.last()
            && let Some(MenuOwner::Bar(bar, _)) = self.menus[root.idx()].owner
        {
            self.collapse_bar(bar, surface);
        }
        tracing::debug!(origin = ?menu, depth = chain.len(), "command dispatched");
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;
    use crate::headless::HeadlessSurface;
    use kurbo::Point;

    struct Tree {
        root: MenuId,
        sub: MenuId,
        subsub: MenuId,
        open_sub: ItemId,
        open_subsub: ItemId,
        leaf: ItemId,
    }

    fn tree(menus: &mut MenuSystem) -> Tree {
        let root = menus.create_menu();
        let sub = menus.create_menu();
        let subsub = menus.create_menu();
        let leaf = menus.append(subsub, "Deep", ItemOptions::default()).unwrap();
        let open_subsub = menus
            .append(sub, "More", ItemOptions::default().with_submenu(subsub))
            .unwrap();
        menus.append(root, "Plain", ItemOptions::default()).unwrap();
        let open_sub = menus
            .append(root, "Open", ItemOptions::default().with_submenu(sub))
            .unwrap();
        Tree {
            root,
            sub,
            subsub,
            open_sub,
            open_subsub,
            leaf,
        }
    }

    fn open_all(menus: &mut MenuSystem, t: &Tree, surface: &mut HeadlessSurface) {
        menus.show(t.root, surface).unwrap();
        menus.set_item_active(t.open_sub, true, surface).unwrap();
        menus.set_item_active(t.open_subsub, true, surface).unwrap();
    }

    #[test]
    fn radio_exclusivity_on_click() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let a = menus
            .append(menu, "A", ItemOptions::radio("", "g").checked(true))
            .unwrap();
        let b = menus.append(menu, "B", ItemOptions::radio("", "g")).unwrap();
        let other = menus
            .append(menu, "Other", ItemOptions::radio("", "h").checked(true))
            .unwrap();
        menus.show(menu, &mut surface).unwrap();

        menus.click_item(b, &mut surface).unwrap();
        assert!(!menus.item(a).unwrap().is_checked());
        assert!(menus.item(b).unwrap().is_checked());
        assert!(menus.item(other).unwrap().is_checked());
        // The command closed the menu.
        assert!(!surface.is_mounted(menu));

        // Checking without a click refreshes the mounted rows.
        menus.show(menu, &mut surface).unwrap();
        menus.set_checked(a, true, &mut surface).unwrap();
        assert!(surface.item_flags(a).unwrap().contains(ItemFlags::CHECKED));
        assert!(!surface.item_flags(b).unwrap().contains(ItemFlags::CHECKED));
        assert!(surface.item_flags(other).unwrap().contains(ItemFlags::CHECKED));

        // Clicking a checked radio keeps it checked.
        menus.set_checked(b, true, &mut surface).unwrap();
        menus.show(menu, &mut surface).unwrap();
        menus.click_item(b, &mut surface).unwrap();
        assert!(menus.item(b).unwrap().is_checked());
    }

    #[test]
    fn radio_group_of_three_keeps_last_click() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let ids: Vec<ItemId> = ["A", "B", "C"]
            .into_iter()
            .map(|t| menus.append(menu, t, ItemOptions::radio("", "g")).unwrap())
            .collect();
        let checked = |menus: &MenuSystem| -> Vec<ItemId> {
            ids.iter()
                .copied()
                .filter(|&i| menus.item(i).unwrap().is_checked())
                .collect()
        };

        menus.show(menu, &mut surface).unwrap();
        menus.click_item(ids[1], &mut surface).unwrap();
        assert_eq!(checked(&menus), [ids[1]]);
        menus.show(menu, &mut surface).unwrap();
        menus.click_item(ids[2], &mut surface).unwrap();
        assert_eq!(checked(&menus), [ids[2]]);
    }

    #[test]
    fn radio_exclusivity_on_append_and_set_checked() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let a = menus
            .append(menu, "A", ItemOptions::radio("", "g").checked(true))
            .unwrap();
        let b = menus
            .append(menu, "B", ItemOptions::radio("", "g").checked(true))
            .unwrap();
        assert!(!menus.item(a).unwrap().is_checked());
        assert!(menus.item(b).unwrap().is_checked());

        menus.set_checked(a, true, &mut surface).unwrap();
        assert!(menus.item(a).unwrap().is_checked());
        assert!(!menus.item(b).unwrap().is_checked());
    }

    #[test]
    fn checkbox_toggles_and_closes() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let wrap = menus
            .append(menu, "Wrap", ItemOptions::checkbox(""))
            .unwrap();
        menus.show(menu, &mut surface).unwrap();
        menus.take_events();

        menus.click_item(wrap, &mut surface).unwrap();
        assert!(menus.item(wrap).unwrap().is_checked());
        assert_eq!(
            menus.take_events(),
            [
                MenuEvent::Clicked(wrap),
                MenuEvent::Dismissed(menu),
                MenuEvent::Command(menu)
            ]
        );
        menus.show(menu, &mut surface).unwrap();
        menus.click_item(wrap, &mut surface).unwrap();
        assert!(!menus.item(wrap).unwrap().is_checked());
    }

    #[test]
    fn disabled_items_and_separators_swallow_clicks() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let off = menus
            .append(
                menu,
                "Off",
                ItemOptions::checkbox("")
                    .disabled(true)
                    .on_click(move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();
        let sep = menus.append_separator(menu).unwrap();
        menus.show(menu, &mut surface).unwrap();
        menus.take_events();

        assert_eq!(
            menus.click_item(off, &mut surface).unwrap(),
            Disposition::CONSUMED
        );
        menus.click_item(sep, &mut surface).unwrap();
        assert_eq!(calls.get(), 0);
        assert!(!menus.item(off).unwrap().is_checked());
        assert!(menus.take_events().is_empty());
        assert!(menus.menu(menu).unwrap().is_shown());
    }

    #[test]
    fn click_handler_sees_updated_props() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let menu = menus.create_menu();
        let seen = Rc::new(Cell::new(false));
        let sink = seen.clone();
        let item = menus
            .append(
                menu,
                "Wrap",
                ItemOptions::checkbox("").on_click(move |_, props| sink.set(props.is_checked())),
            )
            .unwrap();
        menus.show(menu, &mut surface).unwrap();
        menus.click_item(item, &mut surface).unwrap();
        assert!(seen.get());
    }

    #[test]
    fn activation_cascades_and_hide_closes_descendants() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);

        assert!(menus.menu(t.sub).unwrap().is_shown());
        assert!(menus.menu(t.subsub).unwrap().is_shown());
        assert!(surface.is_item_active(t.open_sub));
        assert_eq!(menus.key_target(), Some(t.subsub));
        // Submenus open to the right of their item, content aligned with its top.
        let row = surface.item_bounds(t.open_sub);
        let inset = surface.menu_insets(t.sub).y0;
        assert_eq!(
            surface.position(t.sub),
            Some(Point::new(row.x1, row.y0 - inset))
        );
        menus.take_events();

        menus.hide(t.root, &mut surface).unwrap();
        for m in [t.root, t.sub, t.subsub] {
            assert!(!menus.menu(m).unwrap().is_shown());
            assert!(!surface.is_mounted(m));
        }
        assert!(!menus.item(t.open_sub).unwrap().is_active());
        assert!(!menus.item(t.open_subsub).unwrap().is_active());
        assert_eq!(
            menus.take_events(),
            [
                MenuEvent::Dismissed(t.subsub),
                MenuEvent::Dismissed(t.sub),
                MenuEvent::Dismissed(t.root)
            ]
        );
        assert_eq!(menus.key_target(), None);
    }

    #[test]
    fn sibling_exclusivity() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let root = menus.create_menu();
        let a_menu = menus.create_menu();
        let b_menu = menus.create_menu();
        let a = menus
            .append(root, "A", ItemOptions::default().with_submenu(a_menu))
            .unwrap();
        let b = menus
            .append(root, "B", ItemOptions::default().with_submenu(b_menu))
            .unwrap();
        menus.show(root, &mut surface).unwrap();

        menus.set_item_active(a, true, &mut surface).unwrap();
        menus.set_item_active(b, true, &mut surface).unwrap();
        assert!(!menus.item(a).unwrap().is_active());
        assert!(menus.item(b).unwrap().is_active());
        assert!(!menus.menu(a_menu).unwrap().is_shown());
        assert!(menus.menu(b_menu).unwrap().is_shown());
        assert!(!surface.is_item_active(a));
        assert!(surface.is_item_active(b));
    }

    #[test]
    fn setting_active_twice_is_a_no_op() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        menus.show(t.root, &mut surface).unwrap();
        menus.set_item_active(t.open_sub, true, &mut surface).unwrap();
        menus.take_events();
        menus.set_item_active(t.open_sub, true, &mut surface).unwrap();
        assert!(menus.take_events().is_empty());
        menus.set_item_active(t.open_sub, false, &mut surface).unwrap();
        menus.set_item_active(t.open_sub, false, &mut surface).unwrap();
        assert_eq!(menus.take_events(), [MenuEvent::Dismissed(t.sub)]);
    }

    #[test]
    fn command_bubbles_through_two_levels() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);
        menus.take_events();

        menus.click_item(t.leaf, &mut surface).unwrap();
        let events = menus.take_events();
        let commands: Vec<MenuId> = events
            .iter()
            .filter_map(|e| match e {
                MenuEvent::Command(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(commands, [t.subsub, t.sub, t.root]);
        let dismissed = events
            .iter()
            .filter(|e| matches!(e, MenuEvent::Dismissed(_)))
            .count();
        assert_eq!(dismissed, 3);
        assert_eq!(events[0], MenuEvent::Clicked(t.leaf));
        assert_eq!(surface.mounted_menus(), 0);
    }

    #[test]
    fn clicks_in_hidden_menus_raise_no_command() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        menus.click_item(t.leaf, &mut surface).unwrap();
        assert_eq!(menus.take_events(), [MenuEvent::Clicked(t.leaf)]);

        // Detached items have no menu to close either.
        let loose = menus.create_item(ItemOptions::command("Loose")).unwrap();
        menus.click_item(loose, &mut surface).unwrap();
        assert_eq!(menus.take_events(), [MenuEvent::Clicked(loose)]);
    }

    #[test]
    fn items_with_submenus_do_not_raise_commands() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        menus.show(t.root, &mut surface).unwrap();
        menus.take_events();
        menus.click_item(t.open_sub, &mut surface).unwrap();
        assert_eq!(menus.take_events(), [MenuEvent::Clicked(t.open_sub)]);
        assert!(menus.menu(t.root).unwrap().is_shown());
    }

    #[test]
    fn escape_closes_one_level_and_refocuses_parent() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);

        assert_eq!(
            menus.key_down(Key::Escape, &mut surface),
            Disposition::CONSUMED
        );
        assert!(!menus.menu(t.subsub).unwrap().is_shown());
        assert!(!menus.item(t.open_subsub).unwrap().is_active());
        assert!(menus.menu(t.sub).unwrap().is_active());
        assert_eq!(menus.key_target(), Some(t.sub));

        assert_eq!(
            menus.key_down(Key::ArrowLeft, &mut surface),
            Disposition::CONSUMED
        );
        assert_eq!(menus.key_target(), Some(t.root));
        assert_eq!(
            menus.key_down(Key::Other, &mut surface),
            Disposition::STOPPED
        );
        menus.key_down(Key::Escape, &mut surface);
        assert!(!menus.menu(t.root).unwrap().is_shown());
        assert_eq!(
            menus.key_down(Key::Escape, &mut surface),
            Disposition::IGNORED
        );
    }

    #[test]
    fn submenu_validation() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);

        // A menu can only be opened by one item.
        let err = menus
            .append(t.root, "Again", ItemOptions::default().with_submenu(t.sub))
            .unwrap_err();
        assert_eq!(err, MenuError::AlreadyOwned(t.sub));

        // An item cannot open one of its own ancestors.
        let err = menus
            .set_submenu(t.leaf, Some(t.root), &mut surface)
            .unwrap_err();
        assert_eq!(err, MenuError::SubmenuCycle(t.root));
        let err = menus
            .set_submenu(t.leaf, Some(t.subsub), &mut surface)
            .unwrap_err();
        assert_eq!(err, MenuError::AlreadyOwned(t.subsub));

        let missing = MenuId::new(99);
        assert_eq!(
            menus.append(missing, "x", ItemOptions::default()),
            Err(MenuError::UnknownMenu(missing))
        );
    }

    #[test]
    fn set_submenu_replaces_and_detaches() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);

        let replacement = menus.create_menu();
        menus
            .set_submenu(t.open_sub, Some(replacement), &mut surface)
            .unwrap();
        assert!(!menus.item(t.open_sub).unwrap().is_active());
        assert!(!menus.menu(t.sub).unwrap().is_shown());
        assert_eq!(menus.menu(t.sub).unwrap().owner(), None);
        assert_eq!(
            menus.menu(replacement).unwrap().parent_item(),
            Some(t.open_sub)
        );

        menus.set_submenu(t.open_sub, None, &mut surface).unwrap();
        assert_eq!(menus.item(t.open_sub).unwrap().submenu(), None);
        assert_eq!(menus.menu(replacement).unwrap().owner(), None);
    }

    #[test]
    fn disabling_an_active_item_collapses_it() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);
        menus.set_disabled(t.open_sub, true, &mut surface).unwrap();
        assert!(!menus.item(t.open_sub).unwrap().is_active());
        assert!(!menus.menu(t.sub).unwrap().is_shown());
        assert!(surface
            .item_flags(t.open_sub)
            .unwrap()
            .contains(ItemFlags::DISABLED));
    }

    #[test]
    fn blur_and_resize_follow_config() {
        let mut menus = MenuSystem::with_config(MenuConfig::debug());
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        open_all(&mut menus, &t, &mut surface);

        menus.window_blurred(&mut surface);
        menus.viewport_resized(&mut surface);
        assert!(menus.menu(t.root).unwrap().is_shown());

        menus.config_mut().dismiss_on_resize = true;
        menus.viewport_resized(&mut surface);
        for m in [t.root, t.sub, t.subsub] {
            assert!(!menus.menu(m).unwrap().is_shown());
        }
        assert_eq!(surface.mounted_menus(), 0);
    }

    #[test]
    fn pointer_inside_menus_is_consumed() {
        let mut menus = MenuSystem::new();
        let mut surface = HeadlessSurface::default();
        let t = tree(&mut menus);
        menus.show(t.root, &mut surface).unwrap();
        assert_eq!(
            menus.pointer_down(PointerTarget::Menu(t.root), &mut surface),
            Disposition::CONSUMED
        );
        assert_eq!(
            menus.pointer_up(PointerTarget::Item(t.open_sub), &mut surface),
            Disposition::CONSUMED
        );
        assert_eq!(
            menus.pointer_down(PointerTarget::Elsewhere, &mut surface),
            Disposition::IGNORED
        );
        // A plain shown menu has no outside-click listener.
        assert!(menus.menu(t.root).unwrap().is_shown());
    }
}
