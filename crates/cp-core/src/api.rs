use async_trait::async_trait;
use cp_api_types::{
    CardId, GalleryPage, GalleryQuery, GenerateResponse, ShareRequest, VoteKind, VoteResponse,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::rc::Rc;

use crate::error::ClientError;

/// HTTP/JSON contract of the external card service.
///
/// `?Send` because the browser implementation holds JS values across
/// awaits; everything runs on one event loop.
#[async_trait(?Send)]
pub trait CardApi {
    /// `GET /api/gallery`
    async fn fetch_gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ClientError>;

    /// `POST /api/gallery/{id}/upvote` or `/downvote`
    async fn vote(&self, id: &CardId, kind: VoteKind) -> Result<VoteResponse, ClientError>;

    /// `POST /api/gallery/share`. The response body is only logged.
    async fn share(&self, req: &ShareRequest) -> Result<serde_json::Value, ClientError>;

    /// `GET /api/card/generate`
    async fn generate(&self) -> Result<GenerateResponse, ClientError>;

    /// Base URL shown in user-facing hints.
    fn base_url(&self) -> &str;
}

/// Lets the gallery and generate sessions of one page share a client.
#[async_trait(?Send)]
impl<T: CardApi + ?Sized> CardApi for Rc<T> {
    async fn fetch_gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ClientError> {
        (**self).fetch_gallery(query).await
    }

    async fn vote(&self, id: &CardId, kind: VoteKind) -> Result<VoteResponse, ClientError> {
        (**self).vote(id, kind).await
    }

    async fn share(&self, req: &ShareRequest) -> Result<serde_json::Value, ClientError> {
        (**self).share(req).await
    }

    async fn generate(&self) -> Result<GenerateResponse, ClientError> {
        (**self).generate().await
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}

/// Unreserved path characters (RFC 3986) stay as they are.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// The id is opaque, so it is encoded as a single path segment.
pub fn vote_path(id: &CardId, kind: VoteKind) -> String {
    format!(
        "/api/gallery/{}/{}",
        utf8_percent_encode(&id.0, SEGMENT),
        kind.as_str()
    )
}

pub const SHARE_PATH: &str = "/api/gallery/share";
pub const GENERATE_PATH: &str = "/api/card/generate";
