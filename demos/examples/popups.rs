// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menus and dropdowns near the viewport edges.
//!
//! A context menu opened near the bottom-right corner flips up and to the left. A dropdown
//! aligned to the end of its button toggles on repeated clicks and closes on an outside press.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example popups`

use kurbo::{Point, Rect};
use understory_menu::{Align, HeadlessSurface, ItemFlags, ItemOptions, MenuSystem, PointerTarget};
use understory_menu_demos::{init_tracing, print_menu};

fn main() {
    init_tracing();

    let mut surface = HeadlessSurface::with_viewport(Rect::new(0.0, 0.0, 640.0, 480.0));
    let mut menus = MenuSystem::new();

    let context = menus.create_menu();
    menus
        .populate_from(
            context,
            [
                ItemOptions::command("Cut").with_shortcut("Ctrl+X"),
                ItemOptions::command("Copy").with_shortcut("Ctrl+C"),
                ItemOptions::command("Paste")
                    .with_shortcut("Ctrl+V")
                    .on_show(|props| props.flags.insert(ItemFlags::DISABLED)),
            ],
        )
        .unwrap();
    let canvas = menus.bind_context_menu(context).unwrap();

    for at in [Point::new(20.0, 20.0), Point::new(630.0, 470.0)] {
        println!("== context menu at ({}, {})", at.x, at.y);
        let disposition = menus
            .context_menu_requested(canvas, at, &mut surface)
            .unwrap();
        println!("prevent native menu: {}", disposition.default_prevented);
        print_menu(&menus, &surface, context);
    }
    menus.pointer_down(PointerTarget::Elsewhere, &mut surface);
    print_menu(&menus, &surface, context);

    let account = menus.create_menu();
    menus
        .populate_from(
            account,
            [
                ItemOptions::command("Profile"),
                ItemOptions::command("Settings"),
                ItemOptions::command("Sign out"),
            ],
        )
        .unwrap();
    let button = menus.bind_dropdown(account, Align::End).unwrap();
    let anchor = Rect::new(560.0, 8.0, 632.0, 32.0);

    println!("== dropdown click");
    menus.trigger_clicked(button, anchor, &mut surface).unwrap();
    print_menu(&menus, &surface, account);

    println!("== press on the button again toggles it closed");
    menus.pointer_down(PointerTarget::Trigger(button), &mut surface);
    menus.trigger_clicked(button, anchor, &mut surface).unwrap();
    print_menu(&menus, &surface, account);

    println!("== reopen and press elsewhere");
    menus.trigger_clicked(button, anchor, &mut surface).unwrap();
    menus.pointer_down(PointerTarget::Elsewhere, &mut surface);
    print_menu(&menus, &surface, account);

    for event in menus.take_events() {
        println!("event: {event:?}");
    }
}
