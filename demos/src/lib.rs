// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the `understory_menu` demos.

use tracing::Level;
use understory_menu::{HeadlessSurface, ItemKind, MenuId, MenuSystem, Surface};

/// Install a compact `fmt` subscriber that prints the menu system's debug logs to stderr.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print a shown menu as the headless surface laid it out.
pub fn print_menu(menus: &MenuSystem, surface: &HeadlessSurface, menu: MenuId) {
    let Some(m) = menus.menu(menu) else {
        println!("{menu:?}: unknown");
        return;
    };
    if !m.is_shown() {
        println!("{menu:?}: hidden");
        return;
    }
    let size = surface.menu_size(menu);
    let origin = surface.position(menu).unwrap_or_default();
    println!(
        "{menu:?} at ({:.0}, {:.0}) size {:.0}x{:.0}",
        origin.x, origin.y, size.width, size.height
    );
    for &id in m.items() {
        let Some(item) = menus.item(id) else {
            continue;
        };
        if item.kind() == ItemKind::Separator {
            println!("  ----------------");
            continue;
        }
        let check = match (item.kind(), item.is_checked()) {
            (ItemKind::Checkbox, true) => "[x]",
            (ItemKind::Checkbox, false) => "[ ]",
            (ItemKind::Radio, true) => "(*)",
            (ItemKind::Radio, false) => "( )",
            _ => "   ",
        };
        let arrow = if item.submenu().is_some() { " >" } else { "" };
        let marker = if item.is_active() { "*" } else { " " };
        let shortcut = item.shortcut().unwrap_or("");
        let state = if item.is_disabled() { " (disabled)" } else { "" };
        println!(
            " {marker}{check} {:<16}{shortcut:>8}{arrow}{state}",
            item.text()
        );
    }
}
