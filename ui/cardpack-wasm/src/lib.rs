//! Cardpack WASM front-end.
//!
//! One module per page plus the shared DOM, API, storage and logging
//! pieces. Pages are detected from their markup, so the same bundle
//! serves every HTML file of the site.

pub mod api;
pub mod card;
pub mod dom;
pub mod events;
pub mod favorites;
pub mod gallery;
pub mod generate;
pub mod home;
pub mod logging;
pub mod pack;
pub mod storage;

use cp_core::ClientConfig;
use cp_core::bootstrap::{PageKind, detect_pages};
use tracing::{Level, error, info};
use wasm_bindgen::prelude::*;

use crate::card::CardContext;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(Level::INFO);

    init().await
}

async fn init() -> Result<(), JsValue> {
    let config = api::load_config();
    let ctx = CardContext::new(&config);
    let pages = detect_pages(&dom::DomProbe);
    info!(api = %config.api_base_url, ?pages, "cardpack starting");

    for page in pages {
        if let Err(err) = start_page(page, &config, &ctx) {
            error!(?page, "page skipped: {err:?}");
        }
    }

    home::setup_chrome(config.header_scroll_threshold)
}

fn start_page(page: PageKind, config: &ClientConfig, ctx: &CardContext) -> Result<(), JsValue> {
    match page {
        PageKind::Home => home::setup_explorer(),
        PageKind::Game => pack::start(config.pack_size, ctx),
        PageKind::Favorites => favorites::start(ctx),
        PageKind::Gallery => gallery::start(config),
        PageKind::Generate => generate::start(config, ctx),
    }
}
