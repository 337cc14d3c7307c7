//! Event binding.
//!
//! Sessions live behind `Rc`; each gesture becomes one command on the
//! session, dispatched with `wasm_bindgen_futures::spawn_local`.

use std::rc::Rc;

use cp_api_types::{CardId, SortKey};
use cp_core::CardApi;
use cp_core::gallery::{GalleryCommand, GallerySession, GalleryView};
use cp_core::generate::{GenerateCommand, GenerateSession, GenerateView};
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget};

use crate::dom::{GalleryElements, GenerateElements};

/// Attach a sync click handler for the life of the page. Only for
/// elements bound once at startup; per-card listeners go through
/// [`CardSlot`](crate::card::CardSlot).
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        use ::wasm_bindgen::JsCast as _;
        let cb = ::wasm_bindgen::closure::Closure::wrap(
            Box::new($cb) as Box<dyn FnMut(::web_sys::MouseEvent)>
        );
        let _ = $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }};
}

/// Attach a click handler that runs `$handler(session)` on the local executor.
macro_rules! on_click_async {
    ($el:expr, $session:expr, $handler:expr) => {{
        let session = $session.clone();
        on_click!($el, move |_: web_sys::MouseEvent| {
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                ($handler)(session).await;
            });
        });
    }};
}

pub(crate) use on_click;

/// Attach a handler for any event name.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

pub fn spawn_gallery<A, V>(session: &Rc<GallerySession<A, V>>, command: GalleryCommand)
where
    A: CardApi + 'static,
    V: GalleryView + 'static,
{
    let session = session.clone();
    wasm_bindgen_futures::spawn_local(async move {
        session.dispatch(command).await;
    });
}

pub fn spawn_generate<A, V>(session: &Rc<GenerateSession<A, V>>, command: GenerateCommand)
where
    A: CardApi + 'static,
    V: GenerateView + 'static,
{
    let session = session.clone();
    wasm_bindgen_futures::spawn_local(async move {
        session.dispatch(command).await;
    });
}

/// Sort buttons, load more, and one delegated listener on the grid for
/// vote and retry buttons (cards are created after binding).
pub fn bind_gallery<A, V>(els: &GalleryElements, session: &Rc<GallerySession<A, V>>)
where
    A: CardApi + 'static,
    V: GalleryView + 'static,
{
    for (button, sort) in [
        (&els.sort_popular, SortKey::Popular),
        (&els.sort_recent, SortKey::Recent),
    ] {
        if let Some(button) = button {
            on_click_async!(button, session, move |s: Rc<GallerySession<A, V>>| async move {
                s.dispatch(GalleryCommand::ChangeSort(sort)).await;
            });
        }
    }

    if let Some(button) = &els.load_more_btn {
        on_click_async!(button, session, |s: Rc<GallerySession<A, V>>| async move {
            s.dispatch(GalleryCommand::LoadMore).await;
        });
    }

    let session = session.clone();
    on_click!(els.grid, move |e: web_sys::MouseEvent| {
        if let Some(command) = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|target| grid_command(&target))
        {
            spawn_gallery(&session, command);
        }
    });
}

fn grid_command(target: &Element) -> Option<GalleryCommand> {
    if target.closest(".retry-btn").ok().flatten().is_some() {
        return Some(GalleryCommand::Retry);
    }
    for (selector, upvote) in [(".upvote-btn", true), (".downvote-btn", false)] {
        if let Some(button) = target.closest(selector).ok().flatten() {
            let id = CardId(button.get_attribute("data-card-id")?);
            return Some(if upvote {
                GalleryCommand::Upvote(id)
            } else {
                GalleryCommand::Downvote(id)
            });
        }
    }
    None
}

pub fn bind_generate<A, V>(els: &GenerateElements, session: &Rc<GenerateSession<A, V>>)
where
    A: CardApi + 'static,
    V: GenerateView + 'static,
{
    on_click_async!(els.button, session, |s: Rc<GenerateSession<A, V>>| async move {
        s.dispatch(GenerateCommand::Generate).await;
    });
    if let Some(share) = &els.share_btn {
        on_click_async!(share, session, |s: Rc<GenerateSession<A, V>>| async move {
            s.dispatch(GenerateCommand::Share).await;
        });
    }
}
