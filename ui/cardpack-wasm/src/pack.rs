//! Daily pack page.

use std::cell::RefCell;
use std::rc::Rc;

use cp_core::generator::{CardGenerator, DEFAULT_CARD_IMAGES};
use cp_core::render::{RenderOptions, render_card};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::card::{CardContext, CardSlot};
use crate::events::on_click;
use crate::{dom, storage};

/// Replace the slot's cards with a fresh pack. Images already in the
/// favorites list start with a filled heart.
pub fn render_pack(
    slot: &CardSlot,
    generator: &RefCell<CardGenerator>,
    size: usize,
    ctx: &CardContext,
) -> Result<(), JsValue> {
    slot.clear();
    let pack = generator.borrow_mut().generate_pack(DEFAULT_CARD_IMAGES, size);
    let favorites = storage::favorites(&ctx.favorites_key);
    debug!(cards = pack.len(), "opened pack");
    for card in &pack {
        let favorited = favorites.is_favorite(&dom::resolve_url(&card.image));
        slot.mount(&render_card(card, RenderOptions::pack(favorited)), ctx)?;
    }
    Ok(())
}

pub fn start(pack_size: usize, ctx: &CardContext) -> Result<(), JsValue> {
    let container = dom::query(".card-container")
        .ok_or_else(|| JsValue::from_str("missing .card-container"))?;
    let slot = CardSlot::new(container);
    let generator = Rc::new(RefCell::new(CardGenerator::from_entropy()));
    render_pack(&slot, &generator, pack_size, ctx)?;

    if let Some(button) = dom::by_id("open-another") {
        let ctx = ctx.clone();
        on_click!(button, move |_: web_sys::MouseEvent| {
            if let Err(err) = render_pack(&slot, &generator, pack_size, &ctx) {
                error!("failed to open pack: {err:?}");
                return;
            }
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            slot.container().scroll_into_view_with_scroll_into_view_options(&opts);
        });
    }
    Ok(())
}
