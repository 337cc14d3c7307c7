//! Generate session: fetch one AI-generated card and share it.

use cp_api_types::{Rarity, ShareRequest};
use std::cell::RefCell;
use tracing::{error, info};

use crate::api::CardApi;
use crate::error::ClientError;
use crate::generator::Card;
use crate::latch::Latch;
use crate::render::{CardMarkup, RenderOptions, render_card};

pub const GENERATE_LABEL: &str = "Generate New Card";
pub const GENERATING_LABEL: &str = "Generating...";

pub trait GenerateView {
    fn set_trigger(&self, enabled: bool, label: &str);
    fn set_loading(&self, visible: bool);
    fn clear_result(&self);
    fn set_share_visible(&self, visible: bool);
    fn set_share_enabled(&self, enabled: bool);
    fn show_card(&self, card: &CardMarkup);
    /// Inline failure with a hint to check the backend at `base_url`.
    fn show_error(&self, message: &str, base_url: &str);
    fn show_share_confirmation(&self);
    /// Blocking user-facing alert.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Skipped,
    Generated(Card),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Skipped,
    NoPayload,
    Shared,
    Failed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateCommand {
    Generate,
    Share,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateSessionOutcome {
    Generate(GenerateOutcome),
    Share(ShareOutcome),
}

pub struct GenerateSession<A, V> {
    api: A,
    view: V,
    payload: RefCell<Option<String>>,
    generating: Latch,
    sharing: Latch,
}

impl<A: CardApi, V: GenerateView> GenerateSession<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            payload: RefCell::new(None),
            generating: Latch::new(),
            sharing: Latch::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Image of the last successful generation, if any.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    pub async fn dispatch(&self, command: GenerateCommand) -> GenerateSessionOutcome {
        match command {
            GenerateCommand::Generate => {
                GenerateSessionOutcome::Generate(self.generate_card().await)
            }
            GenerateCommand::Share => GenerateSessionOutcome::Share(self.share_to_gallery().await),
        }
    }

    pub async fn generate_card(&self) -> GenerateOutcome {
        let Some(_guard) = self.generating.try_acquire() else {
            return GenerateOutcome::Skipped;
        };

        self.view.set_trigger(false, GENERATING_LABEL);
        self.view.set_loading(true);
        self.view.clear_result();
        self.view.set_share_visible(false);
        self.payload.replace(None);

        let outcome = match self.fetch_card().await {
            Ok(card) => {
                self.view.show_card(&render_card(&card, RenderOptions::generated()));
                self.view.set_share_enabled(true);
                self.view.set_share_visible(true);
                self.payload.replace(Some(card.image.clone()));
                GenerateOutcome::Generated(card)
            }
            Err(err) => {
                error!("error generating card: {err}");
                self.view.show_error(&err.to_string(), self.api.base_url());
                GenerateOutcome::Failed(err)
            }
        };

        self.view.set_trigger(true, GENERATE_LABEL);
        self.view.set_loading(false);
        outcome
    }

    async fn fetch_card(&self) -> Result<Card, ClientError> {
        let resp = self.api.generate().await?;
        if resp.is_failed() {
            let message = resp.error.unwrap_or_else(|| "Generation failed".to_owned());
            return Err(ClientError::Application(message));
        }

        let image = resp
            .image
            .filter(|image| !image.is_empty())
            .ok_or_else(|| ClientError::Application("response has no image".to_owned()))?;
        let rarity = resp
            .rarity
            .ok_or_else(|| ClientError::Application("response has no rarity".to_owned()))?
            .parse::<Rarity>()
            .map_err(|err| ClientError::Application(err.to_string()))?;

        Ok(Card { image, rarity })
    }

    pub async fn share_to_gallery(&self) -> ShareOutcome {
        let Some(_guard) = self.sharing.try_acquire() else {
            return ShareOutcome::Skipped;
        };
        let Some(payload) = self.payload() else {
            error!("no generated card to share");
            return ShareOutcome::NoPayload;
        };

        self.view.set_share_enabled(false);
        let req = ShareRequest {
            image_data: strip_data_uri(&payload).to_owned(),
        };

        match self.api.share(&req).await {
            Ok(body) => {
                info!(response = %body, "card shared to gallery");
                self.view.set_share_visible(false);
                self.view.show_share_confirmation();
                ShareOutcome::Shared
            }
            Err(err) => {
                error!("error sharing card: {err}");
                self.view.alert(&format!("Failed to share card: {err}"));
                self.view.set_share_enabled(true);
                ShareOutcome::Failed(err)
            }
        }
    }
}

/// `data:image/png;base64,AAAA` → `AAAA`. Anything else is returned as is.
pub fn strip_data_uri(image: &str) -> &str {
    if image.starts_with("data:") {
        if let Some((_, data)) = image.split_once(',') {
            return data;
        }
    }
    image
}
