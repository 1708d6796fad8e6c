// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menus and dropdowns: plain menus bound to a host element.
//!
//! A binding only records which gesture opens the menu and how it is placed. The host resolves
//! its own elements to a [`TriggerId`] and forwards the gesture.

use kurbo::{Point, Rect};
use understory_align::Align;

use crate::error::MenuError;
use crate::listeners::Listener;
use crate::surface::Surface;
use crate::system::MenuSystem;
use crate::types::{Disposition, MenuId, TriggerId};

/// The gesture that opens a bound menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// Secondary click; the menu opens at the pointer.
    Context,
    /// Primary click toggles the menu below the element.
    Dropdown {
        /// Horizontal alignment against the element.
        align: Align,
    },
}

/// A menu bound to a host element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriggerBinding {
    pub(crate) menu: MenuId,
    pub(crate) kind: TriggerKind,
}

impl TriggerBinding {
    /// The bound menu.
    pub fn menu(&self) -> MenuId {
        self.menu
    }

    /// The opening gesture.
    pub fn kind(&self) -> TriggerKind {
        self.kind
    }
}

impl MenuSystem {
    /// Bind `menu` as a context menu.
    ///
    /// A menu can be bound to several triggers but never to a trigger and an item or bar entry.
    pub fn bind_context_menu(&mut self, menu: MenuId) -> Result<TriggerId, MenuError> {
        self.bind(menu, TriggerKind::Context)
    }

    /// Bind `menu` as a dropdown aligned horizontally by `align`.
    pub fn bind_dropdown(&mut self, menu: MenuId, align: Align) -> Result<TriggerId, MenuError> {
        self.bind(menu, TriggerKind::Dropdown { align })
    }

    /// Look up a trigger binding.
    pub fn trigger(&self, id: TriggerId) -> Option<&TriggerBinding> {
        self.triggers.get(id.idx())
    }

    /// Change the horizontal alignment of a dropdown. Applies from the next opening.
    pub fn set_dropdown_alignment(
        &mut self,
        trigger: TriggerId,
        align: Align,
    ) -> Result<(), MenuError> {
        let binding = self
            .triggers
            .get_mut(trigger.idx())
            .ok_or(MenuError::UnknownTrigger(trigger))?;
        match &mut binding.kind {
            TriggerKind::Dropdown { align: current } => {
                *current = align;
                Ok(())
            }
            TriggerKind::Context => Err(MenuError::WrongTriggerKind(trigger)),
        }
    }

    /// A context-menu gesture at `at` on a bound element.
    ///
    /// Shows the menu at the pointer and asks the host to suppress the native context menu.
    pub fn context_menu_requested<S: Surface>(
        &mut self,
        trigger: TriggerId,
        at: Point,
        surface: &mut S,
    ) -> Result<Disposition, MenuError> {
        let binding = self.binding(trigger)?;
        if binding.kind != TriggerKind::Context {
            return Err(MenuError::WrongTriggerKind(trigger));
        }
        let menu = binding.menu;
        self.show_inner(menu, surface);
        self.place_at_point(menu, at, surface);
        self.listen_outside(menu, trigger);
        tracing::debug!(?trigger, ?menu, "context menu opened");
        Ok(Disposition::PREVENTED)
    }

    /// A primary click on a dropdown's element, whose border box is `anchor`.
    ///
    /// Closes the menu if it is open; otherwise shows it below the element.
    pub fn trigger_clicked<S: Surface>(
        &mut self,
        trigger: TriggerId,
        anchor: Rect,
        surface: &mut S,
    ) -> Result<Disposition, MenuError> {
        let binding = self.binding(trigger)?;
        let TriggerKind::Dropdown { align } = binding.kind else {
            return Err(MenuError::WrongTriggerKind(trigger));
        };
        let menu = binding.menu;
        if self.menus[menu.idx()].shown {
            self.hide_inner(menu, surface);
            tracing::debug!(?trigger, ?menu, "dropdown closed");
        } else {
            self.show_inner(menu, surface);
            self.place(menu, anchor, align, Align::EndOutside, surface);
            self.listen_outside(menu, trigger);
            tracing::debug!(?trigger, ?menu, "dropdown opened");
        }
        Ok(Disposition::CONSUMED)
    }

    fn listen_outside(&mut self, menu: MenuId, trigger: TriggerId) {
        let listener = Listener::Popup { menu, trigger };
        if !self.outside.contains(listener) {
            self.outside.install(listener);
        }
    }

    fn bind(&mut self, menu: MenuId, kind: TriggerKind) -> Result<TriggerId, MenuError> {
        if self.menu_ref(menu)?.owner.is_some() {
            return Err(MenuError::AlreadyOwned(menu));
        }
        self.menus[menu.idx()].bound = true;
        let id = TriggerId::new(self.triggers.len());
        self.triggers.push(TriggerBinding { menu, kind });
        Ok(id)
    }

    fn binding(&self, trigger: TriggerId) -> Result<TriggerBinding, MenuError> {
        self.triggers
            .get(trigger.idx())
            .copied()
            .ok_or(MenuError::UnknownTrigger(trigger))
    }
}
