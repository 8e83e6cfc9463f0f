use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Rows rendered in the table view before cutting off. The full filtered
/// table is still exported on download.
pub const DISPLAY_ROW_CAP: usize = 1000;

/// The court's public website, linked from the home page.
pub const CAFC_WEBSITE: &str = "https://cafc.uscourts.gov";

/// Archive of the individual datasets at the Harvard Dataverse.
pub const DATAVERSE_URL: &str = "https://dataverse.harvard.edu/dataverse/CAFC_Dataset_Project";

// ---------------------------------------------------------------------------
// Dataset catalog
// ---------------------------------------------------------------------------

/// Declared dtype for a known column, overriding inference. `categorical`
/// also forces multiselect filtering regardless of cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeHint {
    Text,
    Integer,
    Float,
    Categorical,
}

/// One remote dataset: where it lives, how it is delimited, and what the
/// saved copy should be called.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSource {
    /// Short label shown on the dataset tab.
    pub name: String,
    /// Page heading shown above the table.
    pub title: String,
    /// Introductory text for the dataset.
    pub blurb: String,
    pub url: String,
    #[serde(default)]
    pub codebook_url: Option<String>,
    /// Field separator in the remote file.
    pub delimiter: char,
    /// Fixed filename offered by the download dialog.
    pub download_filename: String,
    /// Known-column dtype declarations; unlisted columns are inferred.
    #[serde(default)]
    pub type_hints: BTreeMap<String, TypeHint>,
}

/// The built-in catalog: the documents and dockets datasets, embedded at
/// compile time.
pub fn builtin_datasets() -> Result<Vec<DatasetSource>> {
    serde_json::from_str(include_str!("../assets/datasets.json"))
        .context("parsing embedded dataset catalog")
}
