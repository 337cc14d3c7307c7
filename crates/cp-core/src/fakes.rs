//! Scripted API and recording views for session tests.

use async_trait::async_trait;
use cp_api_types::{
    CardId, GalleryCard, GalleryPage, GalleryQuery, GenerateResponse, Rarity, ShareRequest, SortKey,
    VoteKind, VoteResponse,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::api::CardApi;
use crate::error::ClientError;
use crate::gallery::GalleryView;
use crate::generate::GenerateView;

type Scripted<T> = RefCell<VecDeque<Result<T, ClientError>>>;

/// Responses are served in push order. A gate, once set, holds the next
/// call of that kind until notified.
#[derive(Default)]
pub struct FakeApi {
    gallery: Scripted<GalleryPage>,
    votes: Scripted<VoteResponse>,
    shares: Scripted<serde_json::Value>,
    generates: Scripted<GenerateResponse>,
    gallery_gate: RefCell<Option<Rc<Notify>>>,
    vote_gate: RefCell<Option<Rc<Notify>>>,
    generate_gate: RefCell<Option<Rc<Notify>>>,
    gallery_calls: RefCell<Vec<GalleryQuery>>,
    vote_calls: RefCell<Vec<(CardId, VoteKind)>>,
    share_calls: RefCell<Vec<ShareRequest>>,
    generate_calls: RefCell<usize>,
}

impl FakeApi {
    pub fn push_gallery(&self, r: Result<GalleryPage, ClientError>) {
        self.gallery.borrow_mut().push_back(r);
    }

    pub fn push_vote(&self, r: Result<VoteResponse, ClientError>) {
        self.votes.borrow_mut().push_back(r);
    }

    pub fn push_share(&self, r: Result<serde_json::Value, ClientError>) {
        self.shares.borrow_mut().push_back(r);
    }

    pub fn push_generate(&self, r: Result<GenerateResponse, ClientError>) {
        self.generates.borrow_mut().push_back(r);
    }

    pub fn gate_gallery(&self) -> Rc<Notify> {
        Self::gate(&self.gallery_gate)
    }

    pub fn gate_votes(&self) -> Rc<Notify> {
        Self::gate(&self.vote_gate)
    }

    pub fn gate_generate(&self) -> Rc<Notify> {
        Self::gate(&self.generate_gate)
    }

    fn gate(slot: &RefCell<Option<Rc<Notify>>>) -> Rc<Notify> {
        let notify = Rc::new(Notify::new());
        *slot.borrow_mut() = Some(notify.clone());
        notify
    }

    pub fn gallery_queries(&self) -> Vec<GalleryQuery> {
        self.gallery_calls.borrow().clone()
    }

    pub fn votes(&self) -> Vec<(CardId, VoteKind)> {
        self.vote_calls.borrow().clone()
    }

    pub fn shares(&self) -> Vec<ShareRequest> {
        self.share_calls.borrow().clone()
    }

    pub fn generate_count(&self) -> usize {
        *self.generate_calls.borrow()
    }

    async fn serve<T>(
        queue: &Scripted<T>,
        gate: &RefCell<Option<Rc<Notify>>>,
    ) -> Result<T, ClientError> {
        let next = queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted response".into())));
        let gate = gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        next
    }
}

#[async_trait(?Send)]
impl CardApi for FakeApi {
    async fn fetch_gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ClientError> {
        self.gallery_calls.borrow_mut().push(query.clone());
        Self::serve(&self.gallery, &self.gallery_gate).await
    }

    async fn vote(&self, id: &CardId, kind: VoteKind) -> Result<VoteResponse, ClientError> {
        self.vote_calls.borrow_mut().push((id.clone(), kind));
        Self::serve(&self.votes, &self.vote_gate).await
    }

    async fn share(&self, req: &ShareRequest) -> Result<serde_json::Value, ClientError> {
        self.share_calls.borrow_mut().push(req.clone());
        Self::serve(&self.shares, &RefCell::new(None)).await
    }

    async fn generate(&self) -> Result<GenerateResponse, ClientError> {
        *self.generate_calls.borrow_mut() += 1;
        Self::serve(&self.generates, &self.generate_gate).await
    }

    fn base_url(&self) -> &str {
        "http://localhost:8000"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    Loading(bool),
    Cleared,
    Total(u64),
    Empty(bool),
    Appended(CardId),
    LoadMore(bool),
    LoadError(String),
    ActiveSort(SortKey),
    VotePending(CardId, VoteKind, bool),
    Count(CardId, u64),
    Voted(CardId, VoteKind),
    Pulse(CardId, Duration),
}

#[derive(Default)]
pub struct RecordingGalleryView {
    events: RefCell<Vec<GalleryEvent>>,
}

impl RecordingGalleryView {
    pub fn events(&self) -> Vec<GalleryEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<GalleryEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn push(&self, event: GalleryEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GalleryView for RecordingGalleryView {
    fn set_loading(&self, visible: bool) {
        self.push(GalleryEvent::Loading(visible));
    }

    fn clear_cards(&self) {
        self.push(GalleryEvent::Cleared);
    }

    fn show_total(&self, total: u64) {
        self.push(GalleryEvent::Total(total));
    }

    fn set_empty(&self, visible: bool) {
        self.push(GalleryEvent::Empty(visible));
    }

    fn append_card(&self, card: &GalleryCard) {
        self.push(GalleryEvent::Appended(card.id.clone()));
    }

    fn set_load_more(&self, visible: bool) {
        self.push(GalleryEvent::LoadMore(visible));
    }

    fn show_load_error(&self, message: &str) {
        self.push(GalleryEvent::LoadError(message.to_owned()));
    }

    fn set_active_sort(&self, sort: SortKey) {
        self.push(GalleryEvent::ActiveSort(sort));
    }

    fn set_vote_pending(&self, id: &CardId, kind: VoteKind, pending: bool) {
        self.push(GalleryEvent::VotePending(id.clone(), kind, pending));
    }

    fn set_vote_count(&self, id: &CardId, count: u64) {
        self.push(GalleryEvent::Count(id.clone(), count));
    }

    fn mark_voted(&self, id: &CardId, kind: VoteKind) {
        self.push(GalleryEvent::Voted(id.clone(), kind));
    }

    fn pulse_vote_count(&self, id: &CardId, duration: Duration) {
        self.push(GalleryEvent::Pulse(id.clone(), duration));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    Trigger { enabled: bool, label: String },
    Loading(bool),
    ClearResult,
    Share(bool),
    ShareEnabled(bool),
    Card { image: String, rarity: Rarity },
    Error { message: String, base_url: String },
    Confirmation,
    Alert(String),
}

#[derive(Default)]
pub struct RecordingGenerateView {
    events: RefCell<Vec<GenerateEvent>>,
}

impl RecordingGenerateView {
    pub fn events(&self) -> Vec<GenerateEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<GenerateEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn push(&self, event: GenerateEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GenerateView for RecordingGenerateView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        self.push(GenerateEvent::Trigger {
            enabled,
            label: label.to_owned(),
        });
    }

    fn set_loading(&self, visible: bool) {
        self.push(GenerateEvent::Loading(visible));
    }

    fn clear_result(&self) {
        self.push(GenerateEvent::ClearResult);
    }

    fn set_share_visible(&self, visible: bool) {
        self.push(GenerateEvent::Share(visible));
    }

    fn set_share_enabled(&self, enabled: bool) {
        self.push(GenerateEvent::ShareEnabled(enabled));
    }

    fn show_card(&self, card: &crate::render::CardMarkup) {
        self.push(GenerateEvent::Card {
            image: card.art_image.clone(),
            rarity: card.rarity_label.parse().unwrap_or(Rarity::Common),
        });
    }

    fn show_error(&self, message: &str, base_url: &str) {
        self.push(GenerateEvent::Error {
            message: message.to_owned(),
            base_url: base_url.to_owned(),
        });
    }

    fn show_share_confirmation(&self) {
        self.push(GenerateEvent::Confirmation);
    }

    fn alert(&self, message: &str) {
        self.push(GenerateEvent::Alert(message.to_owned()));
    }
}
