//! DOM card renderer.
//!
//! Builds the element for a [`CardMarkup`] and wires tilt, hover, flip and
//! favorite listeners onto it. Every card gets the same interaction set;
//! the [`CardMotion`](cp_core::render::CardMotion) model decides what each
//! gesture does. Listeners belong to the [`CardSlot`] the card was mounted
//! in and go away with its next clear.

use std::cell::RefCell;
use std::rc::Rc;

use cp_core::ClientConfig;
use cp_core::config::{HoverConfig, TiltConfig};
use cp_core::favorites::FavoriteEntry;
use cp_core::render::{CardClick, CardMarkup, FavoriteIcon, Rect, Style};
use gloo_events::EventListener;
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlImageElement, MouseEvent};

use crate::dom::{self, escape};
use crate::{favorites, storage};

/// Presentation settings shared by every rendered card.
#[derive(Clone)]
pub struct CardContext {
    pub tilt: TiltConfig,
    pub hover: HoverConfig,
    pub favorites_key: String,
}

impl CardContext {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            tilt: config.tilt.clone(),
            hover: config.hover.clone(),
            favorites_key: config.favorites_key.clone(),
        }
    }
}

fn inner_html(markup: &CardMarkup) -> String {
    let mut html = format!(
        r#"<div class="card-inner">
  <div class="card-front">
    <img src="{back}" alt="Card Back">
  </div>
  <div class="card-back">
    <img src="{art}" alt="{alt}">
    <div class="rarity-label">{label}</div>
  </div>
</div>"#,
        back = escape(markup.back_image),
        art = escape(&markup.art_image),
        alt = escape(markup.art_alt),
        label = escape(&markup.rarity_label),
    );
    if let Some(icon) = &markup.favorite_icon {
        let class = if icon.favorited {
            "favorite-icon favorited"
        } else {
            "favorite-icon"
        };
        html.push_str(&format!(
            r#"<div class="{class}" title="{}">&#10084;</div>"#,
            icon.title
        ));
    }
    html
}

fn apply(el: &Element, style: &Style) {
    dom::set_style(el, "transition", &style.transition);
    dom::set_style(el, "transform", &style.transform);
}

fn bounds(el: &Element) -> Rect {
    let rect = el.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn set_icon_state(icon: &Element, favorited: bool) {
    dom::toggle_class(icon, "favorited", favorited);
    let _ = icon.set_attribute("title", FavoriteIcon::new(favorited).title);
}

/// Handles that live exactly as long as the contents they were created for.
pub struct Handles<H> {
    items: RefCell<Vec<H>>,
}

impl<H> Default for Handles<H> {
    fn default() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
        }
    }
}

impl<H> Handles<H> {
    pub fn extend(&self, items: impl IntoIterator<Item = H>) {
        self.items.borrow_mut().extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Drop every handle. The borrow ends before any handle is dropped.
    pub fn release(&self) {
        let old = std::mem::take(&mut *self.items.borrow_mut());
        drop(old);
    }
}

/// A container of mounted cards and the listeners wired onto them.
///
/// [`CardSlot::clear`] empties the container and removes those listeners.
pub struct CardSlot {
    container: Element,
    listeners: Handles<EventListener>,
}

impl CardSlot {
    pub fn new(container: Element) -> Self {
        Self {
            container,
            listeners: Handles::default(),
        }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn clear(&self) {
        self.listeners.release();
        self.container.set_inner_html("");
    }

    /// Create the card element, append it and attach its listeners.
    pub fn mount(&self, markup: &CardMarkup, ctx: &CardContext) -> Result<Element, JsValue> {
        let (card, listeners) = build(&self.container, markup, ctx)?;
        self.listeners.extend(listeners);
        Ok(card)
    }
}

fn build(
    container: &Element,
    markup: &CardMarkup,
    ctx: &CardContext,
) -> Result<(Element, Vec<EventListener>), JsValue> {
    let card = dom::create_element("div")?;
    card.set_class_name(&markup.class_list().join(" "));
    card.set_attribute("data-rarity", &markup.data_rarity)?;
    card.set_inner_html(&inner_html(markup));
    container.append_child(&card)?;

    let inner = dom::query_within(&card, ".card-inner")
        .ok_or_else(|| JsValue::from_str("card without .card-inner"))?;
    let motion = Rc::new(RefCell::new(markup.motion(ctx.tilt.clone(), ctx.hover.clone())));
    let mut listeners = Vec::with_capacity(5);

    {
        let (card2, motion) = (card.clone(), motion.clone());
        listeners.push(EventListener::new(&card, "mouseenter", move |_| {
            apply(&card2, &motion.borrow().pointer_enter());
        }));
    }
    {
        let (card2, inner, motion) = (card.clone(), inner.clone(), motion.clone());
        listeners.push(EventListener::new(&card, "mouseleave", move |_| {
            let (inner_style, card_style) = motion.borrow().pointer_leave();
            apply(&inner, &inner_style);
            apply(&card2, &card_style);
        }));
    }
    {
        let (card2, inner, motion) = (card.clone(), inner.clone(), motion.clone());
        listeners.push(EventListener::new(&card, "mousemove", move |e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                let style = motion.borrow().pointer_move(
                    f64::from(e.client_x()),
                    f64::from(e.client_y()),
                    bounds(&card2),
                );
                apply(&inner, &style);
            }
        }));
    }

    if markup.flippable {
        let (card2, motion) = (card.clone(), motion.clone());
        listeners.push(EventListener::new(&card, "click", move |e| {
            if on_favorite_icon(e) {
                return;
            }
            let click = motion.borrow_mut().click(false);
            if let CardClick::Flip(style) = click {
                dom::flip_class(&card2, "flip");
                apply(&inner, &style);
            }
        }));
    }

    if let Some(icon) = dom::query_within(&card, ".favorite-icon") {
        let (card2, icon2, ctx) = (card.clone(), icon.clone(), ctx.clone());
        listeners.push(EventListener::new(&icon, "click", move |e| {
            e.stop_propagation();
            let click = motion.borrow_mut().click(true);
            if !matches!(click, CardClick::Favorite { .. }) {
                return;
            }
            let Some(entry) = favorite_entry(&card2) else {
                return;
            };
            // The store decides; the icon shows what was persisted.
            let favorited = toggle_favorite(entry, &ctx);
            motion.borrow_mut().set_favorited(favorited);
            set_icon_state(&icon2, favorited);
        }));
    }

    Ok((card, listeners))
}

fn on_favorite_icon(e: &Event) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.class_list().contains("favorite-icon"))
}

fn favorite_entry(card: &Element) -> Option<FavoriteEntry> {
    let art = dom::query_within(card, ".card-back img")?
        .dyn_into::<HtmlImageElement>()
        .ok()?;
    let rarity = card.get_attribute("data-rarity")?;
    Some(FavoriteEntry::new(art.src(), rarity))
}

fn toggle_favorite(entry: FavoriteEntry, ctx: &CardContext) -> bool {
    let toggle = storage::favorites(&ctx.favorites_key).toggle(entry);
    debug!(favorited = toggle.favorited, count = toggle.entries.len(), "favorites updated");

    if let Err(err) = favorites::refresh(&toggle.entries, ctx) {
        error!("failed to re-render favorites: {err:?}");
    }
    toggle.favorited
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_api_types::Rarity;
    use cp_core::generator::Card;
    use cp_core::render::{RenderOptions, render_card};
    use std::cell::Cell;

    fn card() -> Card {
        Card {
            image: "assets/images/generated_cards/generated_image_7.png".into(),
            rarity: Rarity::Rare,
        }
    }

    #[test]
    fn pack_markup_has_both_faces_and_icon() {
        let html = inner_html(&render_card(&card(), RenderOptions::pack(false)));
        assert!(html.contains(r#"<img src="assets/images/card-back.png" alt="Card Back">"#));
        assert!(html.contains(r#"alt="Generated Card""#));
        assert!(html.contains(r#"<div class="rarity-label">Rare</div>"#));
        assert!(html.contains(
            r#"<div class="favorite-icon" title="Favorite this card">&#10084;</div>"#
        ));
    }

    #[test]
    fn saved_pack_card_renders_filled_heart() {
        let html = inner_html(&render_card(&card(), RenderOptions::pack(true)));
        assert!(html.contains(r#"<div class="favorite-icon favorited" title="Unfavorite">"#));
    }

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn release_drops_every_handle_once() {
        let dropped = Rc::new(Cell::new(0));
        let handles = Handles::default();
        for _ in 0..10 {
            handles.extend((0..5).map(|_| Counted(dropped.clone())));
        }
        assert_eq!(handles.len(), 50);

        handles.release();
        assert!(handles.is_empty());
        assert_eq!(dropped.get(), 50);

        // Re-rendering only keeps the newest contents alive.
        handles.extend((0..5).map(|_| Counted(dropped.clone())));
        handles.release();
        handles.release();
        assert_eq!(dropped.get(), 55);
    }

    #[test]
    fn generated_markup_has_no_icon() {
        let html = inner_html(&render_card(&card(), RenderOptions::generated()));
        assert!(html.contains(r#"alt="AI Generated Card""#));
        assert!(!html.contains("favorite-icon"));
    }

    #[test]
    fn favorite_markup_starts_favorited() {
        let entry = FavoriteEntry::new("http://site/a.png", "epic");
        let html = inner_html(&cp_core::render::render_favorite(&entry));
        assert!(html.contains(r#"class="favorite-icon favorited" title="Unfavorite""#));
        assert!(html.contains(r#"alt="Favorited Card""#));
    }
}
