//! Gallery session: paginated listing, sort order and voting.

use cp_api_types::{CardId, GalleryCard, GalleryQuery, SortKey, VoteKind};
use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, error};

use crate::api::CardApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::latch::{KeyedLatch, Latch};

/// What the gallery page can show. Implemented by the DOM layer and by
/// recording fakes in tests.
pub trait GalleryView {
    fn set_loading(&self, visible: bool);
    fn clear_cards(&self);
    fn show_total(&self, total: u64);
    fn set_empty(&self, visible: bool);
    fn append_card(&self, card: &GalleryCard);
    fn set_load_more(&self, visible: bool);
    /// Replace the grid with an error and a "Try Again" control.
    fn show_load_error(&self, message: &str);
    fn set_active_sort(&self, sort: SortKey);
    fn set_vote_pending(&self, id: &CardId, kind: VoteKind, pending: bool);
    fn set_vote_count(&self, id: &CardId, count: u64);
    fn mark_voted(&self, id: &CardId, kind: VoteKind);
    /// Transient highlight on the count, removed after `duration`.
    fn pulse_vote_count(&self, id: &CardId, duration: Duration);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCursor {
    pub sort: SortKey,
    pub page: u32,
    pub has_more: bool,
}

impl Default for GalleryCursor {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            page: 1,
            has_more: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Another load was in flight, or there was nothing more to load.
    Skipped,
    Empty,
    Loaded { cards: usize, has_more: bool },
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Skipped,
    Counted(u64),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryCommand {
    Load,
    Retry,
    ChangeSort(SortKey),
    LoadMore,
    Upvote(CardId),
    Downvote(CardId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryOutcome {
    Load(LoadOutcome),
    Vote(VoteOutcome),
}

pub struct GallerySession<A, V> {
    api: A,
    view: V,
    page_limit: u32,
    pulse: Duration,
    cursor: RefCell<GalleryCursor>,
    loading: Latch,
    voting: KeyedLatch<(CardId, VoteKind)>,
}

impl<A: CardApi, V: GalleryView> GallerySession<A, V> {
    pub fn new(api: A, view: V, config: &ClientConfig) -> Self {
        Self {
            api,
            view,
            page_limit: config.gallery_page_limit,
            pulse: Duration::from_millis(u64::from(config.vote_pulse_ms)),
            cursor: RefCell::new(GalleryCursor::default()),
            loading: Latch::new(),
            voting: KeyedLatch::new(),
        }
    }

    pub fn cursor(&self) -> GalleryCursor {
        self.cursor.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_held()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn dispatch(&self, command: GalleryCommand) -> GalleryOutcome {
        match command {
            GalleryCommand::Load | GalleryCommand::Retry => {
                GalleryOutcome::Load(self.load_gallery(false).await)
            }
            GalleryCommand::ChangeSort(sort) => {
                GalleryOutcome::Load(self.change_sort_order(sort).await)
            }
            GalleryCommand::LoadMore => GalleryOutcome::Load(self.load_more().await),
            GalleryCommand::Upvote(id) => GalleryOutcome::Vote(self.upvote_card(&id).await),
            GalleryCommand::Downvote(id) => GalleryOutcome::Vote(self.downvote_card(&id).await),
        }
    }

    pub async fn load_gallery(&self, append: bool) -> LoadOutcome {
        let Some(_guard) = self.loading.try_acquire() else {
            return LoadOutcome::Skipped;
        };

        self.view.set_loading(true);
        if !append {
            self.view.clear_cards();
            self.cursor.borrow_mut().page = 1;
        }

        let query = {
            let cursor = self.cursor.borrow();
            GalleryQuery {
                sort_by: cursor.sort,
                page: cursor.page,
                limit: self.page_limit,
            }
        };
        debug!(sort = %query.sort_by, page = query.page, "loading gallery");

        let result = self.api.fetch_gallery(&query).await;
        self.view.set_loading(false);

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                error!(page = query.page, "error loading gallery: {err}");
                if append {
                    let mut cursor = self.cursor.borrow_mut();
                    cursor.page = cursor.page.saturating_sub(1).max(1);
                } else {
                    self.view.show_load_error(&err.to_string());
                }
                return LoadOutcome::Failed(err);
            }
        };

        if page.total > 0 {
            self.view.show_total(page.total);
        }

        if page.cards.is_empty() && query.page == 1 {
            self.cursor.borrow_mut().has_more = false;
            self.view.set_empty(true);
            self.view.set_load_more(false);
            return LoadOutcome::Empty;
        }
        self.view.set_empty(false);

        for card in &page.cards {
            self.view.append_card(card);
        }

        self.cursor.borrow_mut().has_more = page.has_more;
        self.view.set_load_more(page.has_more);

        LoadOutcome::Loaded {
            cards: page.cards.len(),
            has_more: page.has_more,
        }
    }

    /// Refused while a load is in flight, so the active sort always names
    /// the results on screen.
    pub async fn change_sort_order(&self, sort: SortKey) -> LoadOutcome {
        if self.loading.is_held() {
            debug!(%sort, "sort change ignored while loading");
            return LoadOutcome::Skipped;
        }
        {
            let mut cursor = self.cursor.borrow_mut();
            if cursor.sort == sort {
                return LoadOutcome::Skipped;
            }
            cursor.sort = sort;
            cursor.page = 1;
        }
        self.view.set_active_sort(sort);
        self.load_gallery(false).await
    }

    pub async fn load_more(&self) -> LoadOutcome {
        if self.loading.is_held() {
            return LoadOutcome::Skipped;
        }
        {
            let mut cursor = self.cursor.borrow_mut();
            if !cursor.has_more {
                return LoadOutcome::Skipped;
            }
            cursor.page += 1;
        }
        self.load_gallery(true).await
    }

    pub async fn upvote_card(&self, id: &CardId) -> VoteOutcome {
        self.vote(id, VoteKind::Upvote).await
    }

    pub async fn downvote_card(&self, id: &CardId) -> VoteOutcome {
        self.vote(id, VoteKind::Downvote).await
    }

    async fn vote(&self, id: &CardId, kind: VoteKind) -> VoteOutcome {
        let Some(_guard) = self.voting.try_acquire((id.clone(), kind)) else {
            return VoteOutcome::Skipped;
        };

        self.view.set_vote_pending(id, kind, true);
        let result = self.api.vote(id, kind).await;
        let outcome = match result {
            Ok(resp) => {
                self.view.set_vote_count(id, resp.new_upvote_count);
                self.view.mark_voted(id, kind);
                self.view.pulse_vote_count(id, self.pulse);
                VoteOutcome::Counted(resp.new_upvote_count)
            }
            Err(err) => {
                error!(card = %id, "error sending {}: {err}", kind.as_str());
                VoteOutcome::Failed(err)
            }
        };
        self.view.set_vote_pending(id, kind, false);
        outcome
    }
}
