// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for [`MenuSystem`](crate::MenuSystem).

/// Timing and dismissal configuration.
///
/// All durations are in milliseconds, in the same clock the host passes to the pointer entry
/// points and to [`MenuSystem::advance`](crate::MenuSystem::advance).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Hover time over an item before siblings collapse and its submenu expands.
    pub hover_delay: u64,
    /// Hover time over a menu background before its open submenus collapse.
    pub collapse_delay: u64,
    /// Close every open menu when the window loses focus.
    pub dismiss_on_blur: bool,
    /// Close every open menu when the viewport is resized.
    pub dismiss_on_resize: bool,
}

impl MenuConfig {
    /// Configuration for interactive debugging: menus survive window blur and resize so they
    /// can be inspected with external tools.
    pub fn debug() -> Self {
        Self {
            dismiss_on_blur: false,
            dismiss_on_resize: false,
            ..Self::default()
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hover_delay: 250,
            collapse_delay: 250,
            dismiss_on_blur: true,
            dismiss_on_resize: true,
        }
    }
}
