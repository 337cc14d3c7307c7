use async_trait::async_trait;
use cp_api_types::{
    CardId, GalleryPage, GalleryQuery, GenerateResponse, ShareRequest, VoteKind, VoteResponse,
};
use cp_core::api::{GENERATE_PATH, SHARE_PATH, vote_path};
use cp_core::config::{DEFAULT_API_BASE_URL, normalize_base_url};
use cp_core::{CardApi, ClientError};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const API_URL_ENV: &str = "CARDPACK_API_URL";

/// Native HTTP client for the card service.
///
/// Reads `CARDPACK_API_URL` from environment at construction time
/// (default: `http://localhost:8000`).
pub struct HttpCardApi {
    base_url: String,
    http: reqwest::Client,
}

impl Default for HttpCardApi {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpCardApi {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(&base_url),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|err| {
            warn!("{op} transport: {err}");
            ClientError::Network(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{op} HTTP {status}: {body}");
            return Err(ClientError::Http {
                status: status.as_u16(),
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
impl CardApi for HttpCardApi {
    async fn fetch_gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ClientError> {
        let url = self.url(&query.to_path());
        debug!("GET {url}");
        self.send("gallery", self.http.get(&url)).await
    }

    async fn vote(&self, id: &CardId, kind: VoteKind) -> Result<VoteResponse, ClientError> {
        let url = self.url(&vote_path(id, kind));
        debug!("POST {url}");
        self.send(kind.as_str(), self.http.post(&url)).await
    }

    async fn share(&self, req: &ShareRequest) -> Result<serde_json::Value, ClientError> {
        let url = self.url(SHARE_PATH);
        debug!("POST {url}");
        self.send("share", self.http.post(&url).json(req)).await
    }

    async fn generate(&self) -> Result<GenerateResponse, ClientError> {
        let url = self.url(GENERATE_PATH);
        debug!("GET {url}");
        self.send("generate", self.http.get(&url)).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_is_normalized() {
        let api = HttpCardApi::new(Some("http://cards.local:9000/".into()));
        assert_eq!(api.base_url(), "http://cards.local:9000");
        assert_eq!(api.url("/api/card/generate"), "http://cards.local:9000/api/card/generate");
    }
}
