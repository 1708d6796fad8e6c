// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed hover expansion and background-hover collapse.
//!
//! Timers are deadlines stored on the item or menu they belong to. The host reports pointer
//! movement with a timestamp and calls [`MenuSystem::advance`] when time passes; nothing runs
//! on its own. Deadlines are cleared whenever their owner is hidden, so a timer never fires
//! against a closed menu.

use alloc::vec::Vec;

use crate::error::MenuError;
use crate::surface::Surface;
use crate::system::MenuSystem;
use crate::types::{Disposition, ItemId, MenuId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Timer {
    Hover(ItemId),
    Collapse(MenuId),
}

impl MenuSystem {
    /// The pointer entered `item` at `now`.
    ///
    /// Cancels the parent menu's pending collapse and, unless the item is already expanded,
    /// arms its hover timer. Stops propagation so the parent menu does not see the move.
    pub fn pointer_over_item(
        &mut self,
        item: ItemId,
        now: u64,
    ) -> Result<Disposition, MenuError> {
        let it = self.item_ref(item)?;
        let active = it.active;
        let Some(parent) = it.parent_menu.filter(|m| self.menus[m.idx()].shown) else {
            return Ok(Disposition::STOPPED);
        };
        self.menus[parent.idx()].collapse_deadline = None;
        if !active {
            let deadline = now.saturating_add(self.config.hover_delay);
            self.items[item.idx()].hover_deadline = Some(deadline);
            tracing::trace!(?item, deadline, "hover timer armed");
        }
        Ok(Disposition::STOPPED)
    }

    /// The pointer left `item`; its hover timer is cancelled.
    pub fn pointer_out_item(&mut self, item: ItemId) -> Result<(), MenuError> {
        self.item_ref(item)?;
        self.items[item.idx()].hover_deadline = None;
        Ok(())
    }

    /// The pointer moved over the background of `menu` at `now`.
    ///
    /// The menu takes key input back and arms its collapse timer, which closes any open
    /// submenu unless the pointer reaches one of the menu's items first.
    pub fn pointer_over_menu(
        &mut self,
        menu: MenuId,
        now: u64,
    ) -> Result<Disposition, MenuError> {
        if !self.menu_ref(menu)?.shown {
            return Ok(Disposition::IGNORED);
        }
        let deadline = now.saturating_add(self.config.collapse_delay);
        let m = &mut self.menus[menu.idx()];
        m.active = true;
        m.collapse_deadline = Some(deadline);
        self.keys.focus(menu);
        tracing::trace!(?menu, deadline, "collapse timer armed");
        Ok(Disposition::STOPPED)
    }

    /// The pointer left `menu`; its collapse timer is cancelled.
    pub fn pointer_out_menu(&mut self, menu: MenuId) -> Result<(), MenuError> {
        self.menu_ref(menu)?;
        self.menus[menu.idx()].collapse_deadline = None;
        Ok(())
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        let items = self.items.iter().filter_map(|i| i.hover_deadline);
        let menus = self.menus.iter().filter_map(|m| m.collapse_deadline);
        items.chain(menus).min()
    }

    /// Fire every timer due at `now`, in deadline order, and return how many fired.
    ///
    /// A timer cancelled by an earlier one in the same call does not fire.
    pub fn advance<S: Surface>(&mut self, now: u64, surface: &mut S) -> usize {
        let mut due: Vec<(u64, Timer)> = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            if let Some(deadline) = item.hover_deadline
                && deadline <= now
            {
                due.push((deadline, Timer::Hover(ItemId::new(index))));
            }
        }
        for (index, menu) in self.menus.iter().enumerate() {
            if let Some(deadline) = menu.collapse_deadline
                && deadline <= now
            {
                due.push((deadline, Timer::Collapse(MenuId::new(index))));
            }
        }
        due.sort_unstable();

        let mut fired = 0;
        for (deadline, timer) in due {
            match timer {
                Timer::Hover(item) => {
                    if self.items[item.idx()].hover_deadline != Some(deadline) {
                        continue;
                    }
                    self.items[item.idx()].hover_deadline = None;
                    self.fire_hover(item, surface);
                }
                Timer::Collapse(menu) => {
                    if self.menus[menu.idx()].collapse_deadline != Some(deadline) {
                        continue;
                    }
                    self.menus[menu.idx()].collapse_deadline = None;
                    self.fire_collapse(menu, surface);
                }
            }
            fired += 1;
        }
        fired
    }

    fn fire_hover<S: Surface>(&mut self, item: ItemId, surface: &mut S) {
        tracing::trace!(?item, "hover timer fired");
        let it = &self.items[item.idx()];
        let expands = it.submenu.is_some() && !it.is_disabled();
        let parent = it.parent_menu;
        if let Some(parent) = parent {
            let siblings = self.menus[parent.idx()].items.clone();
            for sibling in siblings {
                if !(expands && sibling == item) {
                    self.deactivate_item(sibling, surface);
                }
            }
        }
        if expands {
            self.activate_item(item, surface);
        }
    }

    fn fire_collapse<S: Surface>(&mut self, menu: MenuId, surface: &mut S) {
        tracing::trace!(?menu, "collapse timer fired");
        let items = self.menus[menu.idx()].items.clone();
        for item in items {
            self.deactivate_item(item, surface);
        }
    }
}
