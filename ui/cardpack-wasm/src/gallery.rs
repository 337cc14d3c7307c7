//! Gallery page: the DOM side of [`GallerySession`].

use std::rc::Rc;
use std::time::Duration;

use cp_api_types::{CardId, GalleryCard, SortKey, VoteKind};
use cp_core::ClientConfig;
use cp_core::gallery::{GalleryCommand, GallerySession, GalleryView};
use gloo_timers::future::TimeoutFuture;
use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement};

use crate::api::FetchApi;
use crate::dom::{self, GalleryElements, escape};
use crate::events;

pub struct DomGalleryView {
    els: GalleryElements,
}

impl DomGalleryView {
    pub fn new(els: GalleryElements) -> Self {
        Self { els }
    }

    fn find(&self, class: &str, id: &CardId) -> Option<Element> {
        match self.els.grid.query_selector_all(&format!(".{class}")) {
            Ok(nodes) => (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|n| n.dyn_into::<Element>().ok())
                .find(|el| el.get_attribute("data-card-id").as_deref() == Some(id.0.as_str())),
            Err(_) => None,
        }
    }

    fn vote_button(&self, id: &CardId, kind: VoteKind) -> Option<Element> {
        self.find(&format!("{}-btn", kind.as_str()), id)
    }
}

fn card_html(card: &GalleryCard) -> String {
    let id = escape(&card.id.0);
    format!(
        r#"<div class="card-image-wrapper">
  <img src="{image}" alt="Generated Card" loading="lazy">
</div>
<div class="card-upvote-section">
  <button class="upvote-btn" data-card-id="{id}" aria-label="Upvote card">
    <span class="heart-icon">&#10084;</span>
  </button>
  <span class="upvote-count" data-card-id="{id}">{upvotes}</span>
  <button class="downvote-btn" data-card-id="{id}" aria-label="Downvote card">
    <span class="down-icon">&#9660;</span>
  </button>
</div>"#,
        image = escape(&card.image),
        upvotes = card.upvotes,
    )
}

fn error_html(message: &str) -> String {
    format!(
        r#"<div class="gallery-error" style="grid-column: 1 / -1; text-align: center; padding: 40px; color: #ff6b6b;">
  <h3>Failed to load gallery</h3>
  <p>{}</p>
  <button class="btn retry-btn">Try Again</button>
</div>"#,
        escape(message)
    )
}

impl GalleryView for DomGalleryView {
    fn set_loading(&self, visible: bool) {
        dom::set_shown(&self.els.loading, visible);
    }

    fn clear_cards(&self) {
        self.els.grid.set_inner_html("");
    }

    fn show_total(&self, total: u64) {
        self.els.total_count.set_text_content(Some(&total.to_string()));
        dom::set_shown(&self.els.stats, true);
    }

    fn set_empty(&self, visible: bool) {
        dom::set_shown(&self.els.empty, visible);
    }

    fn append_card(&self, card: &GalleryCard) {
        let Ok(el) = dom::create_element("div") else {
            return;
        };
        el.set_class_name("gallery-card");
        let _ = el.set_attribute("data-card-id", &card.id.0);
        el.set_inner_html(&card_html(card));
        if let Err(err) = self.els.grid.append_child(&el) {
            error!(card = %card.id, "failed to append gallery card: {err:?}");
        }
    }

    fn set_load_more(&self, visible: bool) {
        dom::set_shown(&self.els.load_more_container, visible);
    }

    fn show_load_error(&self, message: &str) {
        self.els.grid.set_inner_html(&error_html(message));
    }

    fn set_active_sort(&self, sort: SortKey) {
        if let Some(el) = &self.els.sort_popular {
            dom::toggle_class(el, "active", sort == SortKey::Popular);
        }
        if let Some(el) = &self.els.sort_recent {
            dom::toggle_class(el, "active", sort == SortKey::Recent);
        }
    }

    fn set_vote_pending(&self, id: &CardId, kind: VoteKind, pending: bool) {
        let Some(button) = self.vote_button(id, kind) else {
            return;
        };
        let class = match kind {
            VoteKind::Upvote => "upvoting",
            VoteKind::Downvote => "downvoting",
        };
        dom::toggle_class(&button, class, pending);
        if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(pending);
        }
    }

    fn set_vote_count(&self, id: &CardId, count: u64) {
        if let Some(el) = self.find("upvote-count", id) {
            el.set_text_content(Some(&count.to_string()));
        }
    }

    fn mark_voted(&self, id: &CardId, kind: VoteKind) {
        if let Some(button) = self.vote_button(id, kind) {
            let class = match kind {
                VoteKind::Upvote => "upvoted",
                VoteKind::Downvote => "downvoted",
            };
            dom::add_class(&button, class);
        }
    }

    fn pulse_vote_count(&self, id: &CardId, duration: Duration) {
        let Some(el) = self.find("upvote-count", id) else {
            return;
        };
        dom::add_class(&el, "pulse");
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(millis).await;
            dom::remove_class(&el, "pulse");
        });
    }
}

pub fn start(config: &ClientConfig) -> Result<(), JsValue> {
    let els = GalleryElements::bind()?;
    let api = FetchApi::new(&config.api_base_url);
    let session = Rc::new(GallerySession::new(api, DomGalleryView::new(els.clone()), config));
    events::bind_gallery(&els, &session);
    events::spawn_gallery(&session, GalleryCommand::Load);
    Ok(())
}
