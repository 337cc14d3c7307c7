//! DOM helpers and per-page element bindings.
//!
//! Each page binds the elements it needs once at startup. A missing
//! element is reported as a `JsValue` error and the page is skipped.

use cp_core::bootstrap::PageProbe;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

// ── Helpers ──

pub fn window() -> web_sys::Window {
    web_sys::window().expect_throw("no window")
}

pub fn document() -> Document {
    window().document().expect_throw("no document")
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(nl) => collect(&nl),
        Err(_) => Vec::new(),
    }
}

pub fn query_within(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok()?
}

fn collect(nl: &web_sys::NodeList) -> Vec<Element> {
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn flip_class(el: &Element, cls: &str) {
    let _ = el.class_list().toggle(cls);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

/// Absolute form of `path`, as `img.src` reports it.
pub fn resolve_url(path: &str) -> String {
    document()
        .base_uri()
        .ok()
        .flatten()
        .and_then(|base| web_sys::Url::new_with_base(path, &base).ok())
        .map(|url| url.href())
        .unwrap_or_else(|| path.to_owned())
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// `display: block` or `display: none`.
pub fn set_shown(el: &Element, visible: bool) {
    set_style(el, "display", if visible { "block" } else { "none" });
}

/// Minimal text escaping for values interpolated into markup.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Answers page-marker queries against the live document.
pub struct DomProbe;

impl PageProbe for DomProbe {
    fn has(&self, selector: &str) -> bool {
        query(selector).is_some()
    }
}

// ── Element bindings ──

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_query {
    ($selector:expr) => {
        query($selector).ok_or_else(|| JsValue::from_str(&format!("missing {}", $selector)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

#[derive(Clone)]
pub struct GalleryElements {
    pub grid: Element,
    pub loading: Element,
    pub empty: Element,
    pub load_more_container: Element,
    pub load_more_btn: Option<Element>,
    pub stats: Element,
    pub total_count: Element,
    pub sort_popular: Option<Element>,
    pub sort_recent: Option<Element>,
}

impl GalleryElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            grid: get_el!("gallery-grid"),
            loading: get_el!("gallery-loading"),
            empty: get_el!("gallery-empty"),
            load_more_container: get_query!(".load-more-container"),
            load_more_btn: by_id("load-more-btn"),
            stats: get_el!("gallery-stats"),
            total_count: get_el!("total-cards-count"),
            sort_popular: by_id("sort-popular"),
            sort_recent: by_id("sort-recent"),
        })
    }
}

#[derive(Clone)]
pub struct GenerateElements {
    pub button: HtmlButtonElement,
    pub result: Element,
    pub loading: Element,
    pub share_btn: Option<HtmlButtonElement>,
    pub share_confirmation: Option<Element>,
}

impl GenerateElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            button: get_button!("generate-btn"),
            result: get_el!("generated-card"),
            loading: get_el!("loading"),
            share_btn: by_id_typed::<HtmlButtonElement>("share-btn"),
            share_confirmation: by_id("share-confirmation"),
        })
    }
}

#[derive(Clone)]
pub struct ExplorerElements {
    pub toggle: Element,
    pub content: Element,
    pub grid: Element,
}

impl ExplorerElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            toggle: get_el!("explorer-toggle"),
            content: get_el!("explorer-content"),
            grid: get_query!(".explorer-grid"),
        })
    }
}
