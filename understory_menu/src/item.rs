// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu items, their descriptors, and the hooks attached to them.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::types::{Icon, ItemFlags, ItemId, ItemKind, MenuId};

/// Handler run when an enabled item is clicked.
pub type ClickHandler = Box<dyn FnMut(ItemId, &ItemProps)>;

/// Hook run right before an item's view is built, each time its menu is shown.
///
/// Use it to refresh text, enabled state or checked state from application state.
/// Radio exclusivity is not enforced for changes made here.
pub type ShowHook = Box<dyn FnMut(&mut ItemProps)>;

/// The displayed, host-editable part of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemProps {
    /// Label text.
    pub text: String,
    /// Shortcut hint shown in the trailing column.
    pub shortcut: Option<String>,
    /// Icon shown in the leading column.
    pub icon: Option<Icon>,
    /// Disabled, checked and default flags.
    pub flags: ItemFlags,
}

impl ItemProps {
    /// Whether the item ignores clicks and never expands.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ItemFlags::DISABLED)
    }

    /// Whether the item is checked.
    pub fn is_checked(&self) -> bool {
        self.flags.contains(ItemFlags::CHECKED)
    }

    /// Whether the item is the default choice.
    pub fn is_default(&self) -> bool {
        self.flags.contains(ItemFlags::DEFAULT)
    }
}

/// Descriptor used to create an item.
///
/// ```
/// use understory_menu::{ItemKind, ItemOptions};
///
/// let opts = ItemOptions::radio("Dark", "theme").checked(true).with_shortcut("Ctrl+D");
/// assert_eq!(opts.kind, ItemKind::Radio);
/// assert_eq!(opts.group.as_deref(), Some("theme"));
/// ```
#[derive(Default)]
pub struct ItemOptions {
    /// Row kind.
    pub kind: ItemKind,
    /// Displayed properties.
    pub props: ItemProps,
    /// Radio group; `None` is the unnamed group.
    pub group: Option<String>,
    /// Submenu opened by this item.
    pub submenu: Option<MenuId>,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_show: Option<ShowHook>,
}

impl fmt::Debug for ItemOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemOptions")
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("group", &self.group)
            .field("submenu", &self.submenu)
            .field("on_click", &self.on_click.is_some())
            .field("on_show", &self.on_show.is_some())
            .finish()
    }
}

impl ItemOptions {
    /// A command item.
    pub fn command(text: impl Into<String>) -> Self {
        Self::default().with_text(text)
    }

    /// A separator.
    pub fn separator() -> Self {
        Self {
            kind: ItemKind::Separator,
            ..Self::default()
        }
    }

    /// A checkbox item.
    pub fn checkbox(text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Checkbox,
            ..Self::default()
        }
        .with_text(text)
    }

    /// A radio item in `group`.
    pub fn radio(text: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Radio,
            group: Some(group.into()),
            ..Self::default()
        }
        .with_text(text)
    }

    /// Set the row kind.
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the label text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.props.text = text.into();
        self
    }

    /// Set the shortcut hint.
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.props.shortcut = Some(shortcut.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.props.icon = Some(icon);
        self
    }

    /// Set the radio group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attach a submenu.
    pub fn with_submenu(mut self, menu: MenuId) -> Self {
        self.submenu = Some(menu);
        self
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.props.flags.set(ItemFlags::DISABLED, disabled);
        self
    }

    /// Set the checked flag.
    pub fn checked(mut self, checked: bool) -> Self {
        self.props.flags.set(ItemFlags::CHECKED, checked);
        self
    }

    /// Set the default-item flag.
    pub fn default_item(mut self, default_item: bool) -> Self {
        self.props.flags.set(ItemFlags::DEFAULT, default_item);
        self
    }

    /// Run `handler` when the item is clicked while enabled.
    pub fn on_click(mut self, handler: impl FnMut(ItemId, &ItemProps) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Run `hook` right before the item is rendered.
    pub fn on_show(mut self, hook: impl FnMut(&mut ItemProps) + 'static) -> Self {
        self.on_show = Some(Box::new(hook));
        self
    }
}

/// One entry for [`MenuSystem::populate_from`](crate::MenuSystem::populate_from).
#[derive(Debug)]
pub enum Entry {
    /// Build a new item from a descriptor.
    Descriptor(ItemOptions),
    /// Attach an item created with [`MenuSystem::create_item`](crate::MenuSystem::create_item).
    Item(ItemId),
    /// Append a separator.
    Separator,
}

impl From<ItemOptions> for Entry {
    fn from(options: ItemOptions) -> Self {
        Self::Descriptor(options)
    }
}

impl From<ItemId> for Entry {
    fn from(item: ItemId) -> Self {
        Self::Item(item)
    }
}

/// One row of a menu.
pub struct MenuItem {
    pub(crate) kind: ItemKind,
    pub(crate) props: ItemProps,
    pub(crate) group: Option<String>,
    pub(crate) submenu: Option<MenuId>,
    pub(crate) parent_menu: Option<MenuId>,
    pub(crate) active: bool,
    /// Pending hover timer deadline.
    pub(crate) hover_deadline: Option<u64>,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_show: Option<ShowHook>,
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("group", &self.group)
            .field("submenu", &self.submenu)
            .field("parent_menu", &self.parent_menu)
            .field("active", &self.active)
            .field("hover_deadline", &self.hover_deadline)
            .finish_non_exhaustive()
    }
}

impl MenuItem {
    pub(crate) fn from_options(options: ItemOptions) -> Self {
        Self {
            kind: options.kind,
            props: options.props,
            group: options.group,
            submenu: None,
            parent_menu: None,
            active: false,
            hover_deadline: None,
            on_click: options.on_click,
            on_show: options.on_show,
        }
    }

    /// Row kind.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Displayed properties.
    pub fn props(&self) -> &ItemProps {
        &self.props
    }

    /// Label text.
    pub fn text(&self) -> &str {
        &self.props.text
    }

    /// Shortcut hint.
    pub fn shortcut(&self) -> Option<&str> {
        self.props.shortcut.as_deref()
    }

    /// Icon.
    pub fn icon(&self) -> Option<&Icon> {
        self.props.icon.as_ref()
    }

    /// Whether the item ignores clicks and never expands.
    pub fn is_disabled(&self) -> bool {
        self.props.is_disabled()
    }

    /// Whether the item is checked.
    pub fn is_checked(&self) -> bool {
        self.props.is_checked()
    }

    /// Whether the item is the default choice.
    pub fn is_default(&self) -> bool {
        self.props.is_default()
    }

    /// Radio group.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Submenu opened by this item.
    pub fn submenu(&self) -> Option<MenuId> {
        self.submenu
    }

    /// Menu this item belongs to.
    pub fn parent_menu(&self) -> Option<MenuId> {
        self.parent_menu
    }

    /// Whether the item's submenu is expanded.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a hover timer is pending for this item.
    pub fn has_pending_hover(&self) -> bool {
        self.hover_deadline.is_some()
    }

    /// Whether this item reserves the icon column.
    pub(crate) fn wants_icon_column(&self) -> bool {
        self.props.icon.is_some() || self.kind.shows_check()
    }

    /// Whether `other` shares this item's radio group.
    pub(crate) fn same_radio_group(&self, other: &Self) -> bool {
        self.kind == ItemKind::Radio && other.kind == ItemKind::Radio && self.group == other.group
    }

    pub(crate) fn run_show_hook(&mut self) {
        if let Some(hook) = self.on_show.as_mut() {
            hook(&mut self.props);
        }
    }
}
