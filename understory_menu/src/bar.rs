// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal menu bars whose entries drop down menus.
//!
//! At most one entry of a bar is open at a time. While one is open, hovering another entry
//! switches to it immediately, and a pointer release outside the bar collapses it.

use alloc::string::String;
use alloc::vec::Vec;

use understory_align::Align;

use crate::error::MenuError;
use crate::listeners::Listener;
use crate::surface::Surface;
use crate::system::MenuSystem;
use crate::types::{BarId, Disposition, MenuId, MenuOwner};

/// One labelled entry of a [`MenuBar`].
#[derive(Clone, Debug)]
pub struct BarEntry {
    pub(crate) text: String,
    pub(crate) menu: MenuId,
    pub(crate) active: bool,
}

impl BarEntry {
    /// Entry label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Menu dropped down by this entry.
    pub fn menu(&self) -> MenuId {
        self.menu
    }

    /// Whether the entry's menu is open.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A row of entries, each opening a menu below it.
#[derive(Clone, Debug, Default)]
pub struct MenuBar {
    pub(crate) entries: Vec<BarEntry>,
    pub(crate) active_index: Option<usize>,
}

impl MenuBar {
    /// Entries in display order.
    pub fn entries(&self) -> &[BarEntry] {
        &self.entries
    }

    /// Index of the open entry.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }
}

impl MenuSystem {
    /// Create an empty menu bar.
    pub fn create_menu_bar(&mut self) -> BarId {
        let id = BarId::new(self.bars.len());
        self.bars.push(MenuBar::default());
        id
    }

    /// Append an entry labelled `label` that drops down `menu`, returning its index.
    ///
    /// The bar takes ownership of `menu`; it must not already be opened by anything else.
    pub fn bar_append(
        &mut self,
        bar: BarId,
        label: impl Into<String>,
        menu: MenuId,
    ) -> Result<usize, MenuError> {
        self.bar_ref(bar)?;
        let m = self.menu_ref(menu)?;
        if m.owner.is_some() || m.bound {
            return Err(MenuError::AlreadyOwned(menu));
        }
        let entries = &mut self.bars[bar.idx()].entries;
        let index = entries.len();
        entries.push(BarEntry {
            text: label.into(),
            menu,
            active: false,
        });
        self.menus[menu.idx()].owner = Some(MenuOwner::Bar(bar, index));
        Ok(index)
    }

    /// Mount the bar's element with one label per entry.
    pub fn render_bar<S: Surface>(
        &mut self,
        bar: BarId,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        let b = self.bar_ref(bar)?;
        let labels: Vec<&str> = b.entries.iter().map(|e| e.text.as_str()).collect();
        surface.mount_bar(bar, &labels);
        Ok(())
    }

    /// Open the entry at `index`, collapsing any other open entry.
    ///
    /// With `toggle`, an entry that is already open closes instead.
    pub fn expand_bar_item<S: Surface>(
        &mut self,
        bar: BarId,
        index: usize,
        toggle: bool,
        surface: &mut S,
    ) -> Result<(), MenuError> {
        self.bar_entry(bar, index)?;
        self.expand_bar_inner(bar, index, toggle, surface);
        Ok(())
    }

    /// A pointer press on the entry at `index`: toggles it.
    pub fn click_bar_entry<S: Surface>(
        &mut self,
        bar: BarId,
        index: usize,
        surface: &mut S,
    ) -> Result<Disposition, MenuError> {
        self.bar_entry(bar, index)?;
        self.expand_bar_inner(bar, index, true, surface);
        Ok(Disposition::CONSUMED)
    }

    /// The pointer moved over the entry at `index`.
    ///
    /// Switches to it when another entry of the bar is already open.
    pub fn pointer_over_bar_entry<S: Surface>(
        &mut self,
        bar: BarId,
        index: usize,
        surface: &mut S,
    ) -> Result<Disposition, MenuError> {
        self.bar_entry(bar, index)?;
        match self.bars[bar.idx()].active_index {
            Some(open) if open != index => {
                self.expand_bar_inner(bar, index, false, surface);
                Ok(Disposition::STOPPED)
            }
            _ => Ok(Disposition::IGNORED),
        }
    }

    fn bar_ref(&self, bar: BarId) -> Result<&MenuBar, MenuError> {
        self.bars.get(bar.idx()).ok_or(MenuError::UnknownBar(bar))
    }

    fn bar_entry(&self, bar: BarId, index: usize) -> Result<&BarEntry, MenuError> {
        self.bar_ref(bar)?
            .entries
            .get(index)
            .ok_or(MenuError::NoSuchEntry { bar, index })
    }

    fn expand_bar_inner<S: Surface>(
        &mut self,
        bar: BarId,
        index: usize,
        toggle: bool,
        surface: &mut S,
    ) {
        let was_active = self.bars[bar.idx()].entries[index].active;
        if toggle && was_active {
            self.set_bar_entry_active(bar, index, false, surface);
        } else {
            for other in 0..self.bars[bar.idx()].entries.len() {
                if other != index {
                    self.set_bar_entry_active(bar, other, false, surface);
                }
            }
            self.set_bar_entry_active(bar, index, true, surface);
        }

        let b = &mut self.bars[bar.idx()];
        b.active_index = b.entries.iter().position(|e| e.active);
        if b.active_index.is_some() {
            if !self.outside.contains(Listener::Bar(bar)) {
                self.outside.install(Listener::Bar(bar));
            }
        } else {
            self.outside.remove(Listener::Bar(bar));
        }
    }

    /// Close whichever entry of `bar` is open.
    pub(crate) fn collapse_bar<S: Surface>(&mut self, bar: BarId, surface: &mut S) {
        let Some(index) = self.bars.get(bar.idx()).and_then(|b| b.active_index) else {
            return;
        };
        self.set_bar_entry_active(bar, index, false, surface);
        self.bars[bar.idx()].active_index = None;
        self.outside.remove(Listener::Bar(bar));
        tracing::debug!(?bar, index, "menu bar collapsed");
    }

    fn set_bar_entry_active<S: Surface>(
        &mut self,
        bar: BarId,
        index: usize,
        active: bool,
        surface: &mut S,
    ) {
        let entry = &mut self.bars[bar.idx()].entries[index];
        if entry.active == active {
            return;
        }
        entry.active = active;
        let menu = entry.menu;
        if active {
            // `active_index` is set before the menu is shown.
            self.bars[bar.idx()].active_index = Some(index);
            self.show_inner(menu, surface);
            let anchor = surface.bar_entry_bounds(bar, index);
            self.place(menu, anchor, Align::Start, Align::EndOutside, surface);
        } else {
            self.hide_inner(menu, surface);
        }
        surface.set_bar_entry_active(bar, index, active);
        tracing::debug!(?bar, index, active, "menu bar entry toggled");
    }
}
