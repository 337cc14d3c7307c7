//! Generate page: the DOM side of [`GenerateSession`].

use std::rc::Rc;

use cp_core::ClientConfig;
use cp_core::generate::{GenerateCommand, GenerateSession, GenerateView};
use cp_core::render::CardMarkup;
use tracing::error;
use wasm_bindgen::prelude::*;

use crate::api::FetchApi;
use crate::card::{CardContext, CardSlot};
use crate::dom::{self, GenerateElements, escape};
use crate::events;

pub const SHARED_MESSAGE: &str = "Card shared to the gallery!";

pub struct DomGenerateView {
    els: GenerateElements,
    result: CardSlot,
    ctx: CardContext,
}

impl DomGenerateView {
    pub fn new(els: GenerateElements, ctx: CardContext) -> Self {
        let result = CardSlot::new(els.result.clone());
        Self { els, result, ctx }
    }
}

fn error_html(message: &str, base_url: &str) -> String {
    format!(
        r#"<div class="generate-error" style="padding: var(--space-12); text-align: center; color: #ff6b6b;">
  <h3>Failed to generate card</h3>
  <p>{}</p>
  <p style="font-size: 0.9em; margin-top: 10px;">
    Make sure the backend server is running at {}
  </p>
</div>"#,
        escape(message),
        escape(base_url)
    )
}

impl GenerateView for DomGenerateView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        self.els.button.set_disabled(!enabled);
        self.els.button.set_text_content(Some(label));
    }

    fn set_loading(&self, visible: bool) {
        dom::set_shown(&self.els.loading, visible);
        dom::toggle_class(&self.els.loading, "visible", visible);
    }

    fn clear_result(&self) {
        self.result.clear();
        if let Some(confirmation) = &self.els.share_confirmation {
            dom::set_shown(confirmation, false);
        }
    }

    fn set_share_visible(&self, visible: bool) {
        if let Some(share) = &self.els.share_btn {
            dom::set_shown(share, visible);
        }
    }

    fn set_share_enabled(&self, enabled: bool) {
        if let Some(share) = &self.els.share_btn {
            share.set_disabled(!enabled);
        }
    }

    fn show_card(&self, markup: &CardMarkup) {
        if let Err(err) = self.result.mount(markup, &self.ctx) {
            error!("failed to render generated card: {err:?}");
        }
    }

    fn show_error(&self, message: &str, base_url: &str) {
        self.result.clear();
        self.els.result.set_inner_html(&error_html(message, base_url));
    }

    fn show_share_confirmation(&self) {
        match &self.els.share_confirmation {
            Some(confirmation) => {
                confirmation.set_text_content(Some(SHARED_MESSAGE));
                dom::set_shown(confirmation, true);
            }
            None => {
                if let Ok(note) = dom::create_element("p") {
                    note.set_class_name("share-confirmation");
                    note.set_text_content(Some(SHARED_MESSAGE));
                    let _ = self.els.result.append_child(&note);
                }
            }
        }
    }

    fn alert(&self, message: &str) {
        let _ = dom::window().alert_with_message(message);
    }
}

/// Bind the page and run the first generation.
pub fn start(config: &ClientConfig, ctx: &CardContext) -> Result<(), JsValue> {
    let els = GenerateElements::bind()?;
    if let Some(share) = &els.share_btn {
        dom::set_shown(share, false);
    }
    let api = FetchApi::new(&config.api_base_url);
    let view = DomGenerateView::new(els.clone(), ctx.clone());
    let session = Rc::new(GenerateSession::new(api, view));
    events::bind_generate(&els, &session);
    events::spawn_generate(&session, GenerateCommand::Generate);
    Ok(())
}
