// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by [`MenuSystem`](crate::MenuSystem).

use crate::types::{BarId, ItemId, MenuId, TriggerId};

/// Invalid arguments passed to a [`MenuSystem`](crate::MenuSystem).
///
/// These are caller errors. The system state is left unchanged when one is returned, except
/// that [`populate_from`](crate::MenuSystem::populate_from) keeps the entries it appended
/// before the rejected one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The menu handle does not belong to this system.
    #[error("unknown menu {0:?}")]
    UnknownMenu(MenuId),
    /// The item handle does not belong to this system.
    #[error("unknown menu item {0:?}")]
    UnknownItem(ItemId),
    /// The menu bar handle does not belong to this system.
    #[error("unknown menu bar {0:?}")]
    UnknownBar(BarId),
    /// The trigger handle does not belong to this system.
    #[error("unknown trigger {0:?}")]
    UnknownTrigger(TriggerId),
    /// The menu bar has no entry at this index.
    #[error("menu bar {bar:?} has no entry {index}")]
    NoSuchEntry {
        /// The bar that was addressed.
        bar: BarId,
        /// The out-of-range index.
        index: usize,
    },
    /// The menu is already opened by another item, bar entry or trigger.
    #[error("menu {0:?} is already owned")]
    AlreadyOwned(MenuId),
    /// Attaching the submenu would make a menu contain itself.
    #[error("menu {0:?} would become its own descendant")]
    SubmenuCycle(MenuId),
    /// The item already belongs to a menu.
    #[error("menu item {0:?} is already attached to a menu")]
    ItemAlreadyAttached(ItemId),
    /// The operation needs a mounted menu.
    #[error("menu {0:?} is not shown")]
    NotShown(MenuId),
    /// The operation needs a hidden menu.
    #[error("menu {0:?} is shown")]
    Shown(MenuId),
    /// The trigger was bound for a different gesture.
    #[error("trigger {0:?} is bound to a different gesture")]
    WrongTriggerKind(TriggerId),
}
