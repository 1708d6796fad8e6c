// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A File/Edit/View menu bar driven through scripted input.
//!
//! Shows bar toggling, hover switching, delayed submenu expansion, radio groups and command
//! bubbling against the headless surface.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menubar`

use understory_menu::{HeadlessSurface, Icon, ItemOptions, Key, MenuSystem, PointerTarget};
use understory_menu_demos::{init_tracing, print_menu};

fn main() {
    init_tracing();

    let mut surface = HeadlessSurface::default();
    let mut menus = MenuSystem::new();

    let recent = menus.create_menu();
    menus
        .append(recent, "notes.txt", ItemOptions::default())
        .unwrap();
    let todo = menus
        .append(recent, "todo.md", ItemOptions::default())
        .unwrap();

    let file = menus.create_menu();
    menus
        .append(
            file,
            "New",
            ItemOptions::default()
                .with_shortcut("Ctrl+N")
                .with_icon(Icon::code_point(0x1F5CB))
                .on_click(|id, props| println!("clicked {id:?}: {}", props.text)),
        )
        .unwrap();
    let open_recent = menus
        .append(file, "Open Recent", ItemOptions::default().with_submenu(recent))
        .unwrap();
    menus.append_separator(file).unwrap();
    menus
        .append(file, "Quit", ItemOptions::default().with_shortcut("Ctrl+Q"))
        .unwrap();

    let edit = menus.create_menu();
    menus
        .append(edit, "Undo", ItemOptions::default().disabled(true))
        .unwrap();
    menus
        .append(edit, "Word Wrap", ItemOptions::checkbox("").checked(true))
        .unwrap();

    let view = menus.create_menu();
    menus
        .append(view, "Small", ItemOptions::radio("", "zoom"))
        .unwrap();
    let normal = menus
        .append(view, "Normal", ItemOptions::radio("", "zoom").checked(true))
        .unwrap();
    let large = menus
        .append(view, "Large", ItemOptions::radio("", "zoom"))
        .unwrap();

    let bar = menus.create_menu_bar();
    menus.bar_append(bar, "File", file).unwrap();
    menus.bar_append(bar, "Edit", edit).unwrap();
    menus.bar_append(bar, "View", view).unwrap();
    menus.render_bar(bar, &mut surface).unwrap();

    println!("== click File");
    menus.click_bar_entry(bar, 0, &mut surface).unwrap();
    print_menu(&menus, &surface, file);

    println!("== hover Open Recent, wait for the hover delay");
    menus.pointer_over_item(open_recent, 1_000).unwrap();
    if let Some(deadline) = menus.next_deadline() {
        menus.advance(deadline, &mut surface);
    }
    print_menu(&menus, &surface, recent);

    println!("== Escape closes one level");
    menus.key_down(Key::Escape, &mut surface);
    print_menu(&menus, &surface, recent);

    println!("== slide over to View");
    menus.pointer_over_bar_entry(bar, 2, &mut surface).unwrap();
    print_menu(&menus, &surface, view);

    println!("== pick Large");
    menus.click_item(large, &mut surface).unwrap();
    println!(
        "normal checked: {}, large checked: {}",
        menus.item(normal).unwrap().is_checked(),
        menus.item(large).unwrap().is_checked()
    );

    println!("== reopen File, open a recent file");
    menus.click_bar_entry(bar, 0, &mut surface).unwrap();
    menus.set_item_active(open_recent, true, &mut surface).unwrap();
    menus.click_item(todo, &mut surface).unwrap();

    println!("== click File again and release elsewhere");
    menus.click_bar_entry(bar, 0, &mut surface).unwrap();
    menus.pointer_up(PointerTarget::Elsewhere, &mut surface);
    print_menu(&menus, &surface, file);

    for event in menus.take_events() {
        println!("event: {event:?}");
    }
}
