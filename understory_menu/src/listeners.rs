// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window-scoped dispatch: the outside-click registry and the keyboard router.
//!
//! Both are owned by the [`MenuSystem`](crate::MenuSystem) and stand in for listeners a DOM host
//! would otherwise attach to `window`. Registration is explicit and tied to open/close.

use smallvec::SmallVec;

use crate::types::{BarId, MenuId, TriggerId};

/// A registered outside-click listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Listener {
    /// A context menu or dropdown; closes on pointer down outside.
    Popup { menu: MenuId, trigger: TriggerId },
    /// A menu bar with an open entry; collapses on pointer up outside.
    Bar(BarId),
}

/// The set of currently installed outside-click listeners.
#[derive(Clone, Debug, Default)]
pub(crate) struct OutsideClick {
    listeners: SmallVec<[Listener; 2]>,
}

impl OutsideClick {
    /// Install `listener`; returns `false` if it was already installed.
    pub(crate) fn install(&mut self, listener: Listener) -> bool {
        if self.listeners.contains(&listener) {
            tracing::warn!(?listener, "outside-click listener already installed");
            return false;
        }
        tracing::debug!(?listener, "outside-click listener installed");
        self.listeners.push(listener);
        true
    }

    /// Remove `listener`; returns `false` if it was not installed.
    pub(crate) fn remove(&mut self, listener: Listener) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| *l != listener);
        let removed = self.listeners.len() != before;
        if removed {
            tracing::debug!(?listener, "outside-click listener removed");
        }
        removed
    }

    /// Remove every popup listener for `menu`.
    pub(crate) fn remove_menu(&mut self, menu: MenuId) {
        self.listeners.retain(|l| {
            let keep = !matches!(l, Listener::Popup { menu: m, .. } if *m == menu);
            if !keep {
                tracing::debug!(listener = ?*l, "outside-click listener removed");
            }
            keep
        });
    }

    /// The popup listeners installed for `menu`.
    pub(crate) fn popups_for(&self, menu: MenuId) -> SmallVec<[Listener; 2]> {
        self.listeners
            .iter()
            .copied()
            .filter(|l| matches!(l, Listener::Popup { menu: m, .. } if *m == menu))
            .collect()
    }

    /// Snapshot of the installed listeners, so handlers may install or remove while iterating.
    pub(crate) fn snapshot(&self) -> SmallVec<[Listener; 2]> {
        self.listeners.clone()
    }

    pub(crate) fn contains(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

/// Routes key input to the single menu currently receiving it.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct KeyRouter {
    target: Option<MenuId>,
}

impl KeyRouter {
    pub(crate) fn target(&self) -> Option<MenuId> {
        self.target
    }

    pub(crate) fn focus(&mut self, menu: MenuId) {
        self.target = Some(menu);
    }

    /// Stop routing to `menu`, handing input to `fallback` if `menu` was the target.
    pub(crate) fn release(&mut self, menu: MenuId, fallback: Option<MenuId>) {
        if self.target == Some(menu) {
            self.target = fallback;
        }
    }
}
