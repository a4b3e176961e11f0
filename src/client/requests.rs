/// Typed requests for each STRING endpoint
///
/// These structs double as the argument contracts of the MCP tools: they are
/// deserialized straight from `tools/call` arguments and their JSON schemas
/// are published by `tools/list`.

use schemars::JsonSchema;
use serde::Deserialize;

use super::format::{ImageFormat, NetworkFlavor, NetworkType};
use super::query::QueryParams;
use super::ClientError;

/// Message used whenever an identifier list is missing or empty
pub const EMPTY_IDENTIFIERS: &str = "identifiers parameter is required and cannot be empty";

/// Reject empty identifier lists before any HTTP call is made
pub fn ensure_identifiers(identifiers: &[String]) -> Result<(), ClientError> {
    if identifiers.is_empty() {
        return Err(ClientError::Validation(EMPTY_IDENTIFIERS.to_string()));
    }
    Ok(())
}

/// Map protein names or accessions to STRING identifiers
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MapIdentifiersRequest {
    /// Protein names, gene symbols or accessions
    pub identifiers: Vec<String>,
    /// NCBI taxon id (e.g. 9606 for human)
    #[serde(default)]
    pub species: Option<u32>,
    /// Include the query term in each result row
    #[serde(default)]
    pub echo_query: bool,
    /// Maximum number of matches per identifier
    #[serde(default)]
    pub limit: Option<u32>,
}

impl MapIdentifiersRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_flag("echo_query", self.echo_query)
            .push_opt("species", self.species)
            .push_opt("limit", self.limit);
        params
    }
}

/// Retrieve interaction edges among a protein set
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NetworkRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Minimum combined score (0-1000)
    #[serde(default)]
    pub required_score: Option<u32>,
    /// Number of additional interactors to add to the network
    #[serde(default)]
    pub add_nodes: u32,
    /// Functional or physical network
    #[serde(default)]
    pub network_type: NetworkType,
}

impl NetworkRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push("network_type", self.network_type.as_str())
            .push("show_query_node_labels", 0)
            .push_opt("species", self.species)
            .push_opt("required_score", self.required_score);
        if self.add_nodes > 0 {
            params.push("add_nodes", self.add_nodes);
        }
        params
    }
}

/// GO / pathway enrichment of a protein set
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EnrichmentRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Custom background proteome (STRING identifiers)
    #[serde(default)]
    pub background_identifiers: Vec<String>,
}

impl EnrichmentRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_list("background_string_identifiers", &self.background_identifiers);
        params
    }
}

/// All STRING partners of each query protein
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InteractionPartnersRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Maximum number of partners per protein
    #[serde(default)]
    pub limit: Option<u32>,
    /// Minimum combined score (0-1000)
    #[serde(default)]
    pub required_score: Option<u32>,
    /// Functional or physical network
    #[serde(default)]
    pub network_type: Option<NetworkType>,
}

impl InteractionPartnersRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_opt("limit", self.limit)
            .push_opt("required_score", self.required_score)
            .push_opt("network_type", self.network_type.map(NetworkType::as_str));
        params
    }
}

/// Similarity scores among proteins of one species
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct HomologyRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
}

impl HomologyRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species);
        params
    }
}

/// Best homology hits of the query proteins in other species
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct HomologyBestRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id of the query proteins
    #[serde(default)]
    pub species: Option<u32>,
    /// Taxon ids to search for homologs (all STRING species if omitted)
    #[serde(default)]
    pub species_b: Vec<u32>,
}

impl HomologyBestRequest {
    pub fn to_query(&self) -> QueryParams {
        let species_b: Vec<String> = self.species_b.iter().map(u32::to_string).collect();
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_list("species_b", &species_b);
        params
    }
}

/// Annotation terms of each query protein
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FunctionalAnnotationRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Include PubMed publications
    #[serde(default)]
    pub allow_pubmed: bool,
    /// Return only PubMed publications
    #[serde(default)]
    pub only_pubmed: bool,
}

impl FunctionalAnnotationRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_flag("allow_pubmed", self.allow_pubmed)
            .push_flag("only_pubmed", self.only_pubmed);
        params
    }
}

/// Test whether the network has more interactions than expected
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PpiEnrichmentRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Minimum combined score (0-1000)
    #[serde(default)]
    pub required_score: Option<u32>,
    /// Custom background proteome (STRING identifiers)
    #[serde(default)]
    pub background_identifiers: Vec<String>,
}

impl PpiEnrichmentRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_opt("required_score", self.required_score)
            .push_list("background_string_identifiers", &self.background_identifiers);
        params
    }
}

/// Picture of the interaction network
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NetworkImageRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Image encoding
    #[serde(default)]
    pub format: ImageFormat,
    /// Number of colored interactors to add
    #[serde(default)]
    pub add_color_nodes: Option<u32>,
    /// Number of white interactors to add
    #[serde(default)]
    pub add_white_nodes: Option<u32>,
    /// Minimum combined score (0-1000)
    #[serde(default)]
    pub required_score: Option<u32>,
    /// Functional or physical network
    #[serde(default)]
    pub network_type: Option<NetworkType>,
    /// Edge styling
    #[serde(default)]
    pub network_flavor: Option<NetworkFlavor>,
    /// Drop proteins without any interaction
    #[serde(default)]
    pub hide_disconnected_nodes: bool,
    /// Label nodes with the query names
    #[serde(default)]
    pub show_query_node_labels: bool,
    /// Download the image into a temporary file
    #[serde(default)]
    pub download: bool,
}

impl NetworkImageRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_opt("add_color_nodes", self.add_color_nodes)
            .push_opt("add_white_nodes", self.add_white_nodes)
            .push_opt("required_score", self.required_score)
            .push_opt("network_type", self.network_type.map(NetworkType::as_str))
            .push_opt("network_flavor", self.network_flavor.map(NetworkFlavor::as_str))
            .push_flag("hide_disconnected_nodes", self.hide_disconnected_nodes)
            .push_flag("show_query_node_labels", self.show_query_node_labels);
        params
    }
}

/// Bar chart of the top enriched terms
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct EnrichmentFigureRequest {
    /// Protein identifiers
    pub identifiers: Vec<String>,
    /// NCBI taxon id
    #[serde(default)]
    pub species: Option<u32>,
    /// Image encoding
    #[serde(default)]
    pub format: ImageFormat,
    /// Term category (Process, Function, Component, KEGG, ...)
    #[serde(default)]
    pub category: Option<String>,
    /// Group similar terms together
    #[serde(default)]
    pub group_by_similarity: Option<f64>,
    /// Color palette name
    #[serde(default)]
    pub color_palette: Option<String>,
    /// Number of terms shown
    #[serde(default)]
    pub number_of_term_shown: Option<u32>,
    /// Value plotted on the x axis (signal, strength, FDR, gene_count)
    #[serde(default)]
    pub x_axis: Option<String>,
    /// Download the image into a temporary file
    #[serde(default)]
    pub download: bool,
}

impl EnrichmentFigureRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_list("identifiers", &self.identifiers)
            .push_opt("species", self.species)
            .push_opt("category", self.category.as_deref())
            .push_opt("group_by_similarity", self.group_by_similarity)
            .push_opt("color_palette", self.color_palette.as_deref())
            .push_opt("number_of_term_shown", self.number_of_term_shown)
            .push_opt("x_axis", self.x_axis.as_deref());
        params
    }
}

/// The version endpoint takes no arguments
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct VersionInfoRequest {}
