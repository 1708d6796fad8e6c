// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: handles, item kinds and flags, icons, input targets and events.

use alloc::string::String;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arenas never hold more than u32::MAX entries"
            )]
            pub(crate) const fn new(idx: usize) -> Self {
                Self(idx as u32)
            }

            pub(crate) const fn idx(self) -> usize {
                self.0 as usize
            }
        }
    };
}

handle!(
    /// Handle of a menu owned by a [`MenuSystem`](crate::MenuSystem).
    MenuId
);
handle!(
    /// Handle of a menu item owned by a [`MenuSystem`](crate::MenuSystem).
    ItemId
);
handle!(
    /// Handle of a menu bar owned by a [`MenuSystem`](crate::MenuSystem).
    BarId
);
handle!(
    /// Handle of a context-menu or dropdown trigger binding.
    TriggerId
);

/// The kind of row a menu item renders as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A plain command.
    #[default]
    Command,
    /// A non-interactive divider.
    Separator,
    /// A command with an independent checked state.
    Checkbox,
    /// A command whose checked state is exclusive within its group.
    Radio,
}

impl ItemKind {
    /// Whether clicking an item of this kind (without a submenu) raises a command.
    pub const fn raises_command(self) -> bool {
        matches!(self, Self::Command | Self::Checkbox | Self::Radio)
    }

    /// Whether this kind reserves the icon column.
    pub const fn shows_check(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

bitflags::bitflags! {
    /// Per-item state flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// The item ignores clicks and never expands.
        const DISABLED = 0b0000_0001;
        /// Checkbox or radio is checked.
        const CHECKED  = 0b0000_0010;
        /// The item is rendered as the default choice.
        const DEFAULT  = 0b0000_0100;
    }
}

/// Icon glyph source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconCode {
    /// Literal text, usually a single glyph.
    Text(String),
    /// A Unicode scalar value, typically from an icon font's private use area.
    CodePoint(u32),
}

/// A font icon shown in the item's icon column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    /// The glyph to show.
    pub code: IconCode,
    /// Optional font family override.
    pub font_family: Option<String>,
}

impl Icon {
    /// An icon drawn from literal text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            code: IconCode::Text(text.into()),
            font_family: None,
        }
    }

    /// An icon drawn from a code point.
    pub fn code_point(code: u32) -> Self {
        Self {
            code: IconCode::CodePoint(code),
            font_family: None,
        }
    }

    /// Set the font family used to draw the glyph.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// The glyph as a `char`, if it resolves to exactly one.
    pub fn glyph(&self) -> Option<char> {
        match &self.code {
            IconCode::CodePoint(c) => char::from_u32(*c),
            IconCode::Text(t) => {
                let mut chars = t.chars();
                let first = chars.next()?;
                chars.next().is_none().then_some(first)
            }
        }
    }
}

/// What opens a menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuOwner {
    /// The menu is the submenu of an item.
    Item(ItemId),
    /// The menu drops down from a menu bar entry.
    Bar(BarId, usize),
}

/// Keys the focused menu chain reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Close the focused menu.
    Escape,
    /// Close the focused menu (collapse one cascade level).
    ArrowLeft,
    /// Any other key; routed but not acted upon.
    Other,
}

/// What a pointer event landed on, as resolved by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The background of a mounted menu.
    Menu(MenuId),
    /// An item row of a mounted menu.
    Item(ItemId),
    /// The background of a menu bar.
    Bar(BarId),
    /// An entry of a menu bar.
    BarEntry(BarId, usize),
    /// The element a context menu or dropdown is bound to.
    Trigger(TriggerId),
    /// Anything else.
    Elsewhere,
}

/// How the host should treat the native event after the system handled it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Disposition {
    /// Suppress the native default action.
    pub default_prevented: bool,
    /// Do not propagate the native event further.
    pub propagation_stopped: bool,
}

impl Disposition {
    /// Not handled; let the event continue normally.
    pub const IGNORED: Self = Self {
        default_prevented: false,
        propagation_stopped: false,
    };

    /// Fully handled: default prevented and propagation stopped.
    pub const CONSUMED: Self = Self {
        default_prevented: true,
        propagation_stopped: true,
    };

    /// Default prevented, propagation continues.
    pub const PREVENTED: Self = Self {
        default_prevented: true,
        propagation_stopped: false,
    };

    /// Propagation stopped, default action kept.
    pub const STOPPED: Self = Self {
        default_prevented: false,
        propagation_stopped: true,
    };
}

/// Notifications queued for the host; drain with
/// [`MenuSystem::take_events`](crate::MenuSystem::take_events).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    /// The menu was mounted.
    Shown(MenuId),
    /// The menu was unmounted.
    Dismissed(MenuId),
    /// An enabled, non-separator item was clicked.
    Clicked(ItemId),
    /// A command reached this menu; the menu has already been hidden.
    Command(MenuId),
}
