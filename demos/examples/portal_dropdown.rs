// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown rendered through a portal, closed by clicks outside it.
//!
//! The menu lives under `body`, not under the trigger, but is drawn over the
//! trigger with a higher `z-index`. Tree containment alone would treat clicks
//! on the menu as outside the trigger's panel; overlap plus stacking order
//! treats them as inside.
//!
//! Also shows a long-press on the trigger and a misconfigured binding.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example portal_dropdown`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Rect;
use understory_directives::binding::{action_callback, event_callback};
use understory_directives::{
    ClickOutside, ComponentInstance, DirectiveBinding, Literal, LongClick, Mounted,
};
use understory_dom::{Document, ElementData, EventKind, NodeId};
use understory_outside::classify;

fn main() {
    env_logger::init();

    let mut doc = Document::new();
    let t = doc.tree_mut();
    let body = t.insert(
        None,
        ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0)),
    );
    let app = t.insert(
        Some(body),
        ElementData::new("div").with_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0)),
    );
    let panel = t.insert(
        Some(app),
        ElementData::new("div").with_bounds(Rect::new(20.0, 20.0, 320.0, 80.0)),
    );
    let trigger = t.insert(
        Some(panel),
        ElementData::new("button").with_bounds(Rect::new(30.0, 30.0, 130.0, 60.0)),
    );
    let menu = t.insert(
        Some(body),
        ElementData::new("ul")
            .with_bounds(Rect::new(30.0, 60.0, 230.0, 180.0))
            .with_style("z-index", "10"),
    );
    let item = t.insert(
        Some(menu),
        ElementData::new("a").with_bounds(Rect::new(30.0, 60.0, 230.0, 90.0)),
    );
    let footer = t.insert(
        Some(app),
        ElementData::new("footer").with_bounds(Rect::new(0.0, 700.0, 1024.0, 768.0)),
    );

    let closes = Rc::new(Cell::new(0_u32));
    let c = Rc::clone(&closes);
    let binding = DirectiveBinding::from_callback(event_callback(move |_| c.set(c.get() + 1)))
        .with_instance(ComponentInstance::named("Dropdown"));
    let dropdown = Mounted::mount(&mut doc, panel, ClickOutside::default(), binding);

    let scenes: [(&str, Option<NodeId>); 5] = [
        ("trigger", Some(trigger)),
        ("menu item (portaled)", Some(item)),
        ("footer", Some(footer)),
        ("body", Some(body)),
        ("no target", None),
    ];
    for (label, target) in scenes {
        let verdict = classify(doc.tree(), panel, target);
        let before = closes.get();
        doc.click(target);
        println!(
            "click {label:<22} -> {verdict:?}{}",
            if closes.get() > before { "  (closed)" } else { "" }
        );
    }
    println!("outside clicks: {}", closes.get());

    // Long press on the trigger.
    let presses = Rc::new(Cell::new(0_u32));
    let p = Rc::clone(&presses);
    let long = DirectiveBinding::from_callback(action_callback(move || p.set(p.get() + 1)))
        .with_arg("400");
    let hold = Mounted::mount(&mut doc, trigger, LongClick::default(), long);
    doc.fire(EventKind::MouseDown, Some(trigger));
    doc.advance_by(399);
    println!("held 399ms: {} long presses", presses.get());
    doc.advance_by(1);
    println!("held 400ms: {} long presses", presses.get());
    doc.click(Some(trigger));

    // A value that is not a function: one warning, nothing registered.
    let listeners = doc.listeners().len();
    let broken = DirectiveBinding::from_literal(Literal::Text("close".into()))
        .with_expression("'close'")
        .with_instance(ComponentInstance::named("Dropdown"));
    let inert = Mounted::mount(&mut doc, menu, ClickOutside::default(), broken);
    println!(
        "misconfigured binding added {} listeners",
        doc.listeners().len() - listeners
    );

    inert.unmount(&mut doc);
    hold.unmount(&mut doc);
    dropdown.unmount(&mut doc);
    log::info!("remaining listeners: {}", doc.listeners().len());
}
