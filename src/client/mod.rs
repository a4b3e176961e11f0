/// Client layer for the STRING REST API
///
/// This module turns typed tool requests into HTTP GET calls against STRING
/// and decodes the answers. The `StringApi` trait is the seam the MCP server
/// talks to, so the protocol layer can be exercised without the network.

pub mod format;
pub mod http;
pub mod query;
pub mod requests;

pub use format::*;
pub use http::StringClient;
pub use query::*;
pub use requests::*;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to STRING
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations offered by the STRING API
///
/// One method per supported endpoint. Identifier-based operations fail with
/// `ClientError::Validation` on an empty identifier list without touching
/// the network.
#[async_trait]
pub trait StringApi: Send + Sync {
    /// Map names/accessions to STRING identifiers (`get_string_ids`)
    async fn map_identifiers(&self, request: &MapIdentifiersRequest) -> ClientResult<Vec<Value>>;

    /// Interaction edges among the query proteins (`network`)
    async fn network_interactions(&self, request: &NetworkRequest) -> ClientResult<Vec<Value>>;

    /// Functional enrichment of the query set (`enrichment`)
    async fn functional_enrichment(&self, request: &EnrichmentRequest) -> ClientResult<Vec<Value>>;

    /// Current STRING release (`version`)
    async fn version_info(&self) -> ClientResult<Vec<Value>>;

    /// Interaction partners of each query protein (`interaction_partners`)
    async fn interaction_partners(
        &self,
        request: &InteractionPartnersRequest,
    ) -> ClientResult<Vec<Value>>;

    /// Within-species similarity scores (`homology`)
    async fn homology(&self, request: &HomologyRequest) -> ClientResult<Vec<Value>>;

    /// Best hits in other species (`homology_best`)
    async fn homology_best(&self, request: &HomologyBestRequest) -> ClientResult<Vec<Value>>;

    /// Annotation terms per protein (`functional_annotation`)
    async fn functional_annotation(
        &self,
        request: &FunctionalAnnotationRequest,
    ) -> ClientResult<Vec<Value>>;

    /// Interaction enrichment statistics (`ppi_enrichment`)
    async fn ppi_enrichment(&self, request: &PpiEnrichmentRequest) -> ClientResult<Value>;

    /// URL of the network picture; performs no request
    fn network_image_url(&self, request: &NetworkImageRequest) -> ClientResult<String>;

    /// URL of the enrichment bar chart; performs no request
    fn enrichment_figure_url(&self, request: &EnrichmentFigureRequest) -> ClientResult<String>;

    /// Fetch an image URL into a kept temporary file and return its path
    async fn download_image(&self, url: &str) -> ClientResult<PathBuf>;
}

/// Plural endpoints: anything other than an array counts as no results
pub fn into_rows(data: Value) -> Vec<Value> {
    match data {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

/// Version endpoint: a bare object becomes a single row
pub fn into_version_rows(data: Value) -> Vec<Value> {
    match data {
        Value::Array(rows) => rows,
        Value::Object(_) => vec![data],
        _ => Vec::new(),
    }
}

/// PPI enrichment endpoint: unwrap the single result record
pub fn into_single_record(data: Value) -> Value {
    match data {
        Value::Array(mut rows) if rows.len() == 1 => rows.remove(0),
        other => other,
    }
}
