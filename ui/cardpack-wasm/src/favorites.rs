//! Favorites page.

use std::cell::RefCell;
use std::rc::Rc;

use cp_core::favorites::FavoriteEntry;
use cp_core::render::render_favorite;
use wasm_bindgen::prelude::*;

use crate::card::{CardContext, CardSlot};
use crate::storage;

pub const CONTAINER_ID: &str = "favorites-container";
pub const EMPTY_MESSAGE: &str = "No favorites yet. Click on the heart icon to favorite a card!";

thread_local! {
    static SLOT: RefCell<Option<Rc<CardSlot>>> = RefCell::new(None);
}

pub fn start(ctx: &CardContext) -> Result<(), JsValue> {
    let container = crate::dom::by_id(CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("missing element #favorites-container"))?;
    let slot = Rc::new(CardSlot::new(container));
    SLOT.with(|s| *s.borrow_mut() = Some(slot.clone()));

    let entries = storage::favorites(&ctx.favorites_key).load();
    render_entries(&slot, &entries, ctx)
}

pub fn render_entries(
    slot: &CardSlot,
    entries: &[FavoriteEntry],
    ctx: &CardContext,
) -> Result<(), JsValue> {
    slot.clear();
    if entries.is_empty() {
        slot.container().set_inner_html(&format!("<p>{EMPTY_MESSAGE}</p>"));
        return Ok(());
    }
    for entry in entries {
        slot.mount(&render_favorite(entry), ctx)?;
    }
    Ok(())
}

/// Re-render the list after a toggle, when this page is showing it.
pub fn refresh(entries: &[FavoriteEntry], ctx: &CardContext) -> Result<(), JsValue> {
    let Some(slot) = SLOT.with(|s| s.borrow().clone()) else {
        return Ok(());
    };
    render_entries(&slot, entries, ctx)
}
