// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{BondSource, SourceKind};
use crate::models::{Bond, BondDocument};
use crate::utils::http_client;

/// `{ "success": true, "count": 5, "source": "mongodb", "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    source: Option<String>,
    data: Option<T>,
}

fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let env: Envelope<T> = serde_json::from_str(body).context("Malformed API response")?;
    if !env.success {
        bail!(
            "API reported failure: {}",
            env.message.as_deref().unwrap_or("no message")
        );
    }
    if let Some(src) = env.source.as_deref() {
        debug!(upstream = src, "api response");
    }
    env.data.context("API response has no 'data'")
}

/// Parse a `GET /api/bonds` response body.
pub fn parse_list_response(body: &str) -> Result<Vec<Bond>> {
    let docs: Vec<BondDocument> = unwrap_envelope(body)?;
    docs.into_iter()
        .map(|doc| Bond::try_from(doc).map_err(anyhow::Error::from))
        .collect()
}

/// Parse a `GET /api/bonds/:id` response body.
pub fn parse_item_response(body: &str) -> Result<Bond> {
    let doc: BondDocument = unwrap_envelope(body)?;
    Ok(Bond::try_from(doc)?)
}

/// Bonds served by the REST backend.
pub struct HttpSource {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base =
            Url::parse(base_url).with_context(|| format!("Invalid API URL '{}'", base_url))?;
        if base.cannot_be_a_base() {
            bail!("API URL '{}' cannot be used as a base", base_url);
        }
        Ok(Self {
            base,
            client: http_client()?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL '{}' cannot be used as a base", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl BondSource for HttpSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    fn fetch_all(&self) -> Result<Vec<Bond>> {
        let url = self.endpoint(&["api", "bonds"])?;
        debug!(%url, "fetching bonds");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {}", url))?
            .error_for_status()?;
        parse_list_response(&resp.text()?)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Bond>> {
        let url = self.endpoint(&["api", "bonds", id.trim()])?;
        debug!(%url, "fetching bond");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {}", url))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status().inspect_err(|err| {
            warn!(%err, "bond lookup failed");
        })?;
        parse_item_response(&resp.text()?).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_is_unwrapped() {
        let body = r#"{"success":true,"count":1,"source":"json","data":[
            {"id":"2","name":"Metro Rail Development Bond","issuer":"DMRC","returnRate":8.2,
             "riskLevel":"Low","price":25000,"maturityYears":7,
             "description":"Metro expansion","sector":"Urban Transit"}]}"#;
        let bonds = parse_list_response(body).unwrap();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].issuer, "DMRC");
        assert_eq!(bonds[0].return_rate.to_string(), "8.2");
    }

    #[test]
    fn failure_envelope_is_an_error() {
        let body = r#"{"success":false,"message":"Error fetching bonds","error":"boom"}"#;
        let err = parse_list_response(body).unwrap_err();
        assert!(err.to_string().contains("Error fetching bonds"));
    }

    #[test]
    fn endpoint_encodes_ids() {
        let src = HttpSource::new("http://localhost:3210/").unwrap();
        let url = src.endpoint(&["api", "bonds", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3210/api/bonds/a%20b%2Fc");
    }
}
