/// MCP tools exposed by the STRING bridge
///
/// Every tool is a variant of `Tool`. The descriptor list returned by
/// `tools/list` is derived from that enum and checked once at startup by
/// `ToolRegistry::new`, so a tool cannot exist without a descriptor.

pub mod dispatch;

pub use dispatch::*;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::client::*;

/// Errors found while validating the tool table
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    #[error("Tool '{0}' does not resolve back to its own descriptor")]
    Unresolvable(String),

    #[error("Schema for tool '{0}' is not an object schema")]
    InvalidSchema(String),
}

/// One variant per STRING endpoint the bridge exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    MapIdentifiers,
    GetNetworkInteractions,
    GetFunctionalEnrichment,
    GetVersionInfo,
    GetInteractionPartners,
    GetHomology,
    GetHomologyBest,
    GetFunctionalAnnotation,
    GetPpiEnrichment,
    GetNetworkImage,
    GetEnrichmentFigure,
}

impl Tool {
    pub const ALL: [Tool; 11] = [
        Tool::MapIdentifiers,
        Tool::GetNetworkInteractions,
        Tool::GetFunctionalEnrichment,
        Tool::GetVersionInfo,
        Tool::GetInteractionPartners,
        Tool::GetHomology,
        Tool::GetHomologyBest,
        Tool::GetFunctionalAnnotation,
        Tool::GetPpiEnrichment,
        Tool::GetNetworkImage,
        Tool::GetEnrichmentFigure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::MapIdentifiers => "map_identifiers",
            Tool::GetNetworkInteractions => "get_network_interactions",
            Tool::GetFunctionalEnrichment => "get_functional_enrichment",
            Tool::GetVersionInfo => "get_version_info",
            Tool::GetInteractionPartners => "get_interaction_partners",
            Tool::GetHomology => "get_homology",
            Tool::GetHomologyBest => "get_homology_best",
            Tool::GetFunctionalAnnotation => "get_functional_annotation",
            Tool::GetPpiEnrichment => "get_ppi_enrichment",
            Tool::GetNetworkImage => "get_network_image",
            Tool::GetEnrichmentFigure => "get_enrichment_figure",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::MapIdentifiers => "Map protein identifiers to STRING IDs.",
            Tool::GetNetworkInteractions => "Retrieve STRING interaction edges.",
            Tool::GetFunctionalEnrichment => "Perform GO / pathway enrichment on a protein set.",
            Tool::GetVersionInfo => "Return the current STRING database version.",
            Tool::GetInteractionPartners => {
                "List all STRING interaction partners of the given proteins."
            }
            Tool::GetHomology => "Retrieve similarity scores between proteins of the same species.",
            Tool::GetHomologyBest => "Find the best homologs of the given proteins in other species.",
            Tool::GetFunctionalAnnotation => {
                "Retrieve GO, pathway, domain and publication annotations for each protein."
            }
            Tool::GetPpiEnrichment => {
                "Test whether the proteins have more interactions than expected by chance."
            }
            Tool::GetNetworkImage => "Build the URL of a STRING network image.",
            Tool::GetEnrichmentFigure => "Build the URL of a STRING enrichment figure.",
        }
    }

    /// Whether the tool needs a non-empty `identifiers` argument
    pub fn requires_identifiers(self) -> bool {
        !matches!(self, Tool::GetVersionInfo)
    }

    /// JSON schema of the tool's arguments
    pub fn input_schema(self) -> Value {
        match self {
            Tool::MapIdentifiers => schema_for::<MapIdentifiersRequest>(),
            Tool::GetNetworkInteractions => schema_for::<NetworkRequest>(),
            Tool::GetFunctionalEnrichment => schema_for::<EnrichmentRequest>(),
            Tool::GetVersionInfo => schema_for::<VersionInfoRequest>(),
            Tool::GetInteractionPartners => schema_for::<InteractionPartnersRequest>(),
            Tool::GetHomology => schema_for::<HomologyRequest>(),
            Tool::GetHomologyBest => schema_for::<HomologyBestRequest>(),
            Tool::GetFunctionalAnnotation => schema_for::<FunctionalAnnotationRequest>(),
            Tool::GetPpiEnrichment => schema_for::<PpiEnrichmentRequest>(),
            Tool::GetNetworkImage => schema_for::<NetworkImageRequest>(),
            Tool::GetEnrichmentFigure => schema_for::<EnrichmentFigureRequest>(),
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        let schema = self.input_schema();
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: schema.clone(),
            input_schema: schema,
        }
    }
}

/// Generate an inline object schema for an argument struct
fn schema_for<T: JsonSchema>() -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.option_nullable = false;
        s.option_add_null_type = false;
        s.meta_schema = None;
    });
    let root = settings.into_generator().into_root_schema_for::<T>();

    let mut schema = serde_json::to_value(root).unwrap_or_else(|_| json!({"type": "object"}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("title");
        object
            .entry("properties")
            .or_insert_with(|| json!({}));
    }
    schema
}

/// MCP tool descriptor
///
/// `parameters` is the current field name; `inputSchema` is kept for older
/// clients. Both always hold the same schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Static name → tool table, validated at construction
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    by_name: HashMap<&'static str, Tool>,
    descriptors: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Build the table for every known tool
    pub fn new() -> Result<Self, ToolError> {
        Self::from_tools(&Tool::ALL)
    }

    /// Build the table for a subset of tools
    pub fn from_tools(tools: &[Tool]) -> Result<Self, ToolError> {
        let mut by_name = HashMap::new();
        let mut descriptors = Vec::with_capacity(tools.len());

        for &tool in tools {
            if by_name.insert(tool.name(), tool).is_some() {
                return Err(ToolError::DuplicateName(tool.name().to_string()));
            }

            let descriptor = tool.descriptor();
            if Tool::ALL.iter().find(|t| t.name() == descriptor.name) != Some(&tool) {
                return Err(ToolError::Unresolvable(descriptor.name));
            }
            if descriptor.parameters.get("type") != Some(&json!("object")) {
                return Err(ToolError::InvalidSchema(descriptor.name));
            }
            descriptors.push(descriptor);
        }

        tracing::debug!("Registered {} tools", descriptors.len());
        Ok(Self { by_name, descriptors })
    }

    pub fn resolve(&self, name: &str) -> Option<Tool> {
        self.by_name.get(name).copied()
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
