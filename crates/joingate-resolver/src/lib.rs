//! Resolution API adapter.
//!
//! One `GET <endpoint>?url=<candidate>` per request, JSON answer with an
//! optional `downloadUrl`.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use joingate_core::{
    errors::Error,
    ports::{LinkResolver, Resolution},
    Result,
};

#[derive(Debug, Default, Deserialize)]
struct ResolveResponse {
    #[serde(rename = "downloadUrl")]
    download_url: Option<String>,
}

impl ResolveResponse {
    fn into_resolution(self) -> Resolution {
        match self.download_url {
            Some(url) if !url.is_empty() => Resolution::Found(url),
            _ => Resolution::NotFound,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpLinkResolver {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpLinkResolver {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid resolver endpoint {endpoint:?}: {e}")))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    /// Endpoint with the candidate appended as the percent-encoded `url` query parameter.
    pub fn request_url(&self, candidate: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", candidate);
        url
    }
}

#[async_trait]
impl LinkResolver for HttpLinkResolver {
    async fn resolve(&self, candidate: &str) -> Result<Resolution> {
        let resp = self
            .http
            .get(self.request_url(candidate))
            .send()
            .await
            .map_err(|e| Error::Resolution(format!("request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Resolution(format!(
                "resolver returned {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: ResolveResponse = resp
            .json()
            .await
            .map_err(|e| Error::Resolution(format!("invalid response body: {e}")))?;

        let resolution = body.into_resolution();
        tracing::debug!(found = matches!(resolution, Resolution::Found(_)), "resolver answered");
        Ok(resolution)
    }
}
