//! Site-wide chrome and the home page card explorer.

use cp_core::bootstrap::{current_page_name, header_scrolled};
use cp_core::generator::DEFAULT_CARD_IMAGES;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom::{self, ExplorerElements};
use crate::events::{listen, on_click};

pub fn setup_explorer() -> Result<(), JsValue> {
    let els = ExplorerElements::bind()?;

    {
        let (toggle, content) = (els.toggle.clone(), els.content.clone());
        on_click!(els.toggle, move |_: web_sys::MouseEvent| {
            dom::flip_class(&toggle, "active");
            dom::flip_class(&content, "open");
        });
    }

    for image in DEFAULT_CARD_IMAGES {
        let img: HtmlImageElement = dom::create_element("img")?.dyn_into()?;
        img.set_src(image);
        img.set_alt("Generated Card");
        img.set_attribute("loading", "lazy")?;
        els.grid.append_child(&img)?;
    }
    Ok(())
}

/// Header scroll state, active nav link and fade-up reveals.
pub fn setup_chrome(scroll_threshold: f64) -> Result<(), JsValue> {
    if let Some(header) = dom::query("header") {
        listen(&dom::window(), "scroll", move |_| {
            let y = dom::window().scroll_y().unwrap_or(0.0);
            dom::toggle_class(&header, "scrolled", header_scrolled(y, scroll_threshold));
        });
    }

    let pathname = dom::window().location().pathname().unwrap_or_default();
    let page = current_page_name(&pathname);
    for link in dom::query_all("nav a") {
        if link.get_attribute("href").as_deref() == Some(page) {
            dom::add_class(&link, "active");
        }
    }

    setup_fade_up()
}

fn setup_fade_up() -> Result<(), JsValue> {
    let targets = dom::query_all(".fade-up");
    if targets.is_empty() {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    dom::add_class(&entry.target(), "visible");
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for el in &targets {
        observer.observe(el);
    }
    debug!(count = targets.len(), "observing fade-up elements");
    Ok(())
}
