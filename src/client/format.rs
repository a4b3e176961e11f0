/// Response encodings and enumerated request options
///
/// STRING encodes the response format as the first path segment after the
/// API root (e.g. `/api/json/network`). Each supported encoding is a variant
/// here so URL building stays exhaustive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every response encoding the STRING API can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Tsv,
    TsvNoHeader,
    Xml,
    PsiMi,
    PsiMiTab,
    Image,
    HighresImage,
    Svg,
}

impl OutputFormat {
    /// Path segment used in the request URL
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Tsv => "tsv",
            OutputFormat::TsvNoHeader => "tsv-no-header",
            OutputFormat::Xml => "xml",
            OutputFormat::PsiMi => "psi-mi",
            OutputFormat::PsiMiTab => "psi-mi-tab",
            OutputFormat::Image => "image",
            OutputFormat::HighresImage => "highres_image",
            OutputFormat::Svg => "svg",
        }
    }

    /// Whether the endpoint returns picture bytes rather than text
    pub fn is_image(self) -> bool {
        matches!(
            self,
            OutputFormat::Image | OutputFormat::HighresImage | OutputFormat::Svg
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image encodings accepted from tool arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Image,
    HighresImage,
    Svg,
}

impl From<ImageFormat> for OutputFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Image => OutputFormat::Image,
            ImageFormat::HighresImage => OutputFormat::HighresImage,
            ImageFormat::Svg => OutputFormat::Svg,
        }
    }
}

/// Which evidence the network is built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Functional,
    Physical,
}

impl NetworkType {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Functional => "functional",
            NetworkType::Physical => "physical",
        }
    }
}

/// Edge styling used in network images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NetworkFlavor {
    Evidence,
    Confidence,
    Actions,
}

impl NetworkFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkFlavor::Evidence => "evidence",
            NetworkFlavor::Confidence => "confidence",
            NetworkFlavor::Actions => "actions",
        }
    }
}
