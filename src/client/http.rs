/// reqwest-backed implementation of `StringApi`
///
/// A single `reqwest::Client` is kept for the life of the process so
/// connections to STRING are pooled. Requests are issued one at a time and
/// every completed request is followed by a fixed pause.

use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

use super::*;
use crate::config::BridgeConfig;

/// Longest slice of an error body copied into error messages
const MAX_ERROR_BODY: usize = 500;

/// Which configured host a request goes to
#[derive(Debug, Clone, Copy)]
enum Host {
    Base,
    Versioned,
}

/// HTTP client for the STRING API
pub struct StringClient {
    config: BridgeConfig,
    client: reqwest::Client,
}

impl StringClient {
    /// Create a client with the given configuration
    pub fn new(config: BridgeConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn endpoint_url(&self, host: Host, format: OutputFormat, endpoint: &str) -> String {
        let root = match host {
            Host::Base => &self.config.base_url,
            Host::Versioned => &self.config.version_url,
        };
        format!("{}/{}/{}", root.trim_end_matches('/'), format.as_str(), endpoint)
    }

    fn with_identity(&self, mut params: QueryParams) -> QueryParams {
        params.insert_if_absent("caller_identity", &self.config.caller_identity);
        params
    }

    /// Send a GET, pause, then map non-2xx statuses to `ClientError::Http`
    async fn execute(&self, request: reqwest::RequestBuilder, label: &str) -> ClientResult<reqwest::Response> {
        debug!("GET {}", label);
        let response = request.send().await?;

        if !self.config.request_delay.is_zero() {
            tokio::time::sleep(self.config.request_delay).await;
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Could not read error body for {}: {}", label, e);
                String::new()
            }
        };
        let reason = status.canonical_reason().unwrap_or("Request failed");
        let body: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
        let message = if body.is_empty() {
            format!("{} for url {}", reason, label)
        } else {
            format!("{} for url {}: {}", reason, label, body)
        };

        warn!("STRING returned {}: {}", status.as_u16(), message);
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn get(
        &self,
        host: Host,
        format: OutputFormat,
        endpoint: &str,
        params: QueryParams,
    ) -> ClientResult<reqwest::Response> {
        let url = self.endpoint_url(host, format, endpoint);
        let params = self.with_identity(params);
        let request = self.client.get(&url).query(params.pairs());
        self.execute(request, &url).await
    }

    async fn get_json(&self, host: Host, endpoint: &str, params: QueryParams) -> ClientResult<Value> {
        let response = self.get(host, OutputFormat::Json, endpoint, params).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch any endpoint in any text encoding and return the body undecoded
    pub async fn fetch_raw(
        &self,
        endpoint: &str,
        format: OutputFormat,
        params: QueryParams,
    ) -> ClientResult<String> {
        let response = self.get(Host::Versioned, format, endpoint, params).await?;
        Ok(response.text().await?)
    }

    fn image_url(&self, format: OutputFormat, endpoint: &str, params: QueryParams) -> ClientResult<String> {
        let base = self.endpoint_url(Host::Versioned, format, endpoint);
        let params = self.with_identity(params);
        let url = Url::parse_with_params(&base, params.pairs())?;
        Ok(url.into())
    }
}

/// File extension for a downloaded image
pub fn image_suffix(url: &Url) -> &'static str {
    let path = url.path();
    let svg_segment = url
        .path_segments()
        .map(|mut segments| segments.any(|s| s == OutputFormat::Svg.as_str()))
        .unwrap_or(false);

    if path.ends_with(".svg") || svg_segment {
        ".svg"
    } else {
        ".png"
    }
}

#[async_trait]
impl StringApi for StringClient {
    async fn map_identifiers(&self, request: &MapIdentifiersRequest) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "get_string_ids", request.to_query()).await?;
        Ok(into_rows(data))
    }

    async fn network_interactions(&self, request: &NetworkRequest) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "network", request.to_query()).await?;
        Ok(into_rows(data))
    }

    async fn functional_enrichment(&self, request: &EnrichmentRequest) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "enrichment", request.to_query()).await?;
        Ok(into_rows(data))
    }

    async fn version_info(&self) -> ClientResult<Vec<Value>> {
        let data = self.get_json(Host::Base, "version", QueryParams::new()).await?;
        Ok(into_version_rows(data))
    }

    async fn interaction_partners(
        &self,
        request: &InteractionPartnersRequest,
    ) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self
            .get_json(Host::Versioned, "interaction_partners", request.to_query())
            .await?;
        Ok(into_rows(data))
    }

    async fn homology(&self, request: &HomologyRequest) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "homology", request.to_query()).await?;
        Ok(into_rows(data))
    }

    async fn homology_best(&self, request: &HomologyBestRequest) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "homology_best", request.to_query()).await?;
        Ok(into_rows(data))
    }

    async fn functional_annotation(
        &self,
        request: &FunctionalAnnotationRequest,
    ) -> ClientResult<Vec<Value>> {
        ensure_identifiers(&request.identifiers)?;
        let data = self
            .get_json(Host::Versioned, "functional_annotation", request.to_query())
            .await?;
        Ok(into_rows(data))
    }

    async fn ppi_enrichment(&self, request: &PpiEnrichmentRequest) -> ClientResult<Value> {
        ensure_identifiers(&request.identifiers)?;
        let data = self.get_json(Host::Versioned, "ppi_enrichment", request.to_query()).await?;
        Ok(into_single_record(data))
    }

    fn network_image_url(&self, request: &NetworkImageRequest) -> ClientResult<String> {
        ensure_identifiers(&request.identifiers)?;
        self.image_url(request.format.into(), "network", request.to_query())
    }

    fn enrichment_figure_url(&self, request: &EnrichmentFigureRequest) -> ClientResult<String> {
        ensure_identifiers(&request.identifiers)?;
        self.image_url(request.format.into(), "enrichmentfigure", request.to_query())
    }

    async fn download_image(&self, url: &str) -> ClientResult<PathBuf> {
        let parsed = Url::parse(url)?;
        let suffix = image_suffix(&parsed);

        let response = self.execute(self.client.get(parsed.clone()), parsed.path()).await?;
        let bytes = response.bytes().await?;

        let mut file = tempfile::Builder::new()
            .prefix("string_")
            .suffix(suffix)
            .tempfile()?;
        file.write_all(&bytes)?;
        let (_, path) = file.keep().map_err(|e| e.error)?;

        debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
