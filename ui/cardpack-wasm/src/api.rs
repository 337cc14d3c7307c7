//! Card service client over `fetch`.
//!
//! `load_config()` resolves the page configuration and the API base URL.

use async_trait::async_trait;
use cp_api_types::{
    CardId, GalleryPage, GalleryQuery, GenerateResponse, ShareRequest, VoteKind, VoteResponse,
};
use cp_core::api::{GENERATE_PATH, SHARE_PATH, vote_path};
use cp_core::config::normalize_base_url;
use cp_core::{CardApi, ClientConfig, ClientError};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "cardpack-config";

/// Page configuration.
///
/// Priority: `<script id="cardpack-config">` JSON → `data-api-url` on
/// `<body>` → same host on port 8000.
pub fn load_config() -> ClientConfig {
    if let Some(raw) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
        match ClientConfig::from_json(&raw) {
            Ok(config) => return config,
            Err(err) => warn!("ignoring invalid #{CONFIG_ELEMENT_ID}: {err}"),
        }
    }
    ClientConfig::default().with_base_url(&detect_base_url())
}

fn detect_base_url() -> String {
    if let Some(url) = dom::document()
        .body()
        .and_then(|body| body.get_attribute("data-api-url"))
        .filter(|url| !url.trim().is_empty())
    {
        return normalize_base_url(&url);
    }

    let loc = dom::window().location();
    let host = loc.hostname().unwrap_or_default();
    if host.is_empty() {
        return normalize_base_url("");
    }
    let protocol = loc.protocol().unwrap_or_else(|_| "http:".into());
    format!("{protocol}//{host}:8000")
}

pub struct FetchApi {
    base_url: String,
}

impl FetchApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        self.read(op, response).await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        op: &str,
        response: gloo_net::http::Response,
    ) -> Result<T, ClientError> {
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            warn!("{op} HTTP {}: {body}", response.status());
            return Err(ClientError::Http {
                status: response.status(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Decode(format!("{op}: {err}")))
    }
}

#[async_trait(?Send)]
impl CardApi for FetchApi {
    async fn fetch_gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ClientError> {
        let url = self.url(&query.to_path());
        debug!("GET {url}");
        self.send("gallery", Request::get(&url)).await
    }

    async fn vote(&self, id: &CardId, kind: VoteKind) -> Result<VoteResponse, ClientError> {
        let url = self.url(&vote_path(id, kind));
        debug!("POST {url}");
        self.send(kind.as_str(), Request::post(&url)).await
    }

    async fn share(&self, req: &ShareRequest) -> Result<serde_json::Value, ClientError> {
        let url = self.url(SHARE_PATH);
        debug!("POST {url}");
        let request = Request::post(&url)
            .json(req)
            .map_err(|err| ClientError::Network(err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        self.read("share", response).await
    }

    async fn generate(&self) -> Result<GenerateResponse, ClientError> {
        let url = self.url(GENERATE_PATH);
        debug!("GET {url}");
        self.send("generate", Request::get(&url)).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
