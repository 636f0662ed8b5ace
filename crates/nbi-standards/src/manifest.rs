#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "nbi-reference";
pub const MANIFEST_FILE: &str = "manifest.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Editions the reference data was exported for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pins {
    pub edition: String,
    pub exported: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub role: String,
    #[serde(default)]
    pub notes: Option<String>,
}
