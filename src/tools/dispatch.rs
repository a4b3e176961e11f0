/// Tool invocation: argument parsing and routing to the STRING client

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use super::Tool;
use crate::client::*;

/// Why a tool call did not produce data
#[derive(Error, Debug)]
pub enum CallError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl CallError {
    /// Faults that are neither bad input nor an upstream HTTP failure
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CallError::Client(ClientError::Decode(_))
                | CallError::Client(ClientError::Url(_))
                | CallError::Client(ClientError::Io(_))
        )
    }

    /// Short message handed back to the MCP client
    pub fn user_message(&self) -> String {
        match self {
            CallError::Client(ClientError::Validation(message)) => message.clone(),
            CallError::Client(e @ ClientError::Http { .. })
            | CallError::Client(e @ ClientError::Transport(_)) => {
                format!("HTTP request failed: {}", e)
            }
            e if e.is_internal() => format!("Internal error: {}", e),
            e => e.to_string(),
        }
    }
}

/// Data produced by a successful tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Structured data, rendered as indented JSON
    Json(Value),
    /// Plain text such as an image URL
    Text(String),
}

impl ToolOutput {
    pub fn render(&self) -> Result<String, serde_json::Error> {
        match self {
            ToolOutput::Json(value) => serde_json::to_string_pretty(value),
            ToolOutput::Text(text) => Ok(text.clone()),
        }
    }
}

fn rows(rows: Vec<Value>) -> ToolOutput {
    ToolOutput::Json(Value::Array(rows))
}

/// Reject calls whose `identifiers` argument is missing, empty or not a list
fn check_identifiers(arguments: &Value) -> Result<(), CallError> {
    match arguments.get("identifiers") {
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        _ => Err(CallError::Validation(EMPTY_IDENTIFIERS.to_string())),
    }
}

fn parse_args<T: DeserializeOwned>(tool: Tool, arguments: &Value) -> Result<T, CallError> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other.clone(),
    };

    if tool.requires_identifiers() {
        check_identifiers(&arguments)?;
    }

    serde_json::from_value(arguments).map_err(CallError::InvalidArguments)
}

async fn image_output<A: StringApi + ?Sized>(
    api: &A,
    url: String,
    download: bool,
) -> Result<ToolOutput, CallError> {
    if !download {
        return Ok(ToolOutput::Text(url));
    }

    let path = api.download_image(&url).await?;
    Ok(ToolOutput::Json(json!({
        "url": url,
        "file": path.display().to_string(),
    })))
}

/// Run one tool against the STRING API
pub async fn call_tool<A: StringApi + ?Sized>(
    api: &A,
    tool: Tool,
    arguments: &Value,
) -> Result<ToolOutput, CallError> {
    tracing::debug!("Calling tool {}", tool.name());

    let output = match tool {
        Tool::MapIdentifiers => {
            let request: MapIdentifiersRequest = parse_args(tool, arguments)?;
            rows(api.map_identifiers(&request).await?)
        }
        Tool::GetNetworkInteractions => {
            let request: NetworkRequest = parse_args(tool, arguments)?;
            rows(api.network_interactions(&request).await?)
        }
        Tool::GetFunctionalEnrichment => {
            let request: EnrichmentRequest = parse_args(tool, arguments)?;
            rows(api.functional_enrichment(&request).await?)
        }
        Tool::GetVersionInfo => rows(api.version_info().await?),
        Tool::GetInteractionPartners => {
            let request: InteractionPartnersRequest = parse_args(tool, arguments)?;
            rows(api.interaction_partners(&request).await?)
        }
        Tool::GetHomology => {
            let request: HomologyRequest = parse_args(tool, arguments)?;
            rows(api.homology(&request).await?)
        }
        Tool::GetHomologyBest => {
            let request: HomologyBestRequest = parse_args(tool, arguments)?;
            rows(api.homology_best(&request).await?)
        }
        Tool::GetFunctionalAnnotation => {
            let request: FunctionalAnnotationRequest = parse_args(tool, arguments)?;
            rows(api.functional_annotation(&request).await?)
        }
        Tool::GetPpiEnrichment => {
            let request: PpiEnrichmentRequest = parse_args(tool, arguments)?;
            ToolOutput::Json(api.ppi_enrichment(&request).await?)
        }
        Tool::GetNetworkImage => {
            let request: NetworkImageRequest = parse_args(tool, arguments)?;
            let url = api.network_image_url(&request)?;
            image_output(api, url, request.download).await?
        }
        Tool::GetEnrichmentFigure => {
            let request: EnrichmentFigureRequest = parse_args(tool, arguments)?;
            let url = api.enrichment_figure_url(&request)?;
            image_output(api, url, request.download).await?
        }
    };

    Ok(output)
}
