//! Verified loading of a reference directory.
//!
//! The directory holds a `manifest.toml` listing every data file with its
//! role and sha256 digest. Every listed file is verified before any of them
//! is parsed; an unlisted file in the directory is rejected as well.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;
use crate::manifest::{MANIFEST_FILE, MANIFEST_SCHEMA, Manifest, ManifestFile, Pins};
use crate::source::{CountyEntry, InMemoryReferenceSource, StateEntry};

const ROLE_CODE_LISTS: &str = "code_lists";
const ROLE_STATES: &str = "states";
const ROLE_COUNTIES: &str = "counties";
const REQUIRED_ROLES: &[&str] = &[ROLE_CODE_LISTS, ROLE_STATES, ROLE_COUNTIES];

#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    pub reference_dir: PathBuf,
    pub pins: Pins,
    pub file_count: usize,
    pub code_list_count: usize,
    pub code_count: usize,
    pub state_count: usize,
    pub county_count: usize,
}

/// Verify the manifest of `reference_dir` and load its data files.
pub fn verify_and_load(
    reference_dir: &Path,
) -> Result<(InMemoryReferenceSource, VerifySummary)> {
    let manifest = load_manifest(&reference_dir.join(MANIFEST_FILE))?;
    validate_manifest(&manifest, reference_dir)?;

    let mut files = manifest.files.clone();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    for file in &files {
        verify_file(reference_dir, file)?;
    }

    let mut data = InMemoryReferenceSource::new();
    let code_count = parse_code_lists(
        &resolve_role_path(reference_dir, &files, ROLE_CODE_LISTS)?,
        &mut data,
    )?;
    let state_count = parse_states(
        &resolve_role_path(reference_dir, &files, ROLE_STATES)?,
        &mut data,
    )?;
    let county_count = parse_counties(
        &resolve_role_path(reference_dir, &files, ROLE_COUNTIES)?,
        &mut data,
    )?;

    let summary = VerifySummary {
        reference_dir: reference_dir.to_path_buf(),
        pins: manifest.pins.clone(),
        file_count: files.len(),
        code_list_count: data.list_names().count(),
        code_count,
        state_count,
        county_count,
    };
    info!(
        dir = %reference_dir.display(),
        lists = summary.code_list_count,
        codes = code_count,
        states = state_count,
        counties = county_count,
        "reference data verified"
    );
    Ok((data, summary))
}

fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest, reference_dir: &Path) -> Result<()> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    let mut manifest_paths: BTreeSet<PathBuf> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        validate_sha(&file.sha256, &file.path)?;
        manifest_paths.insert(validate_path(&file.path)?);
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(StandardsError::MissingRole {
                role: (*role).to_string(),
            });
        }
    }

    let entries =
        std::fs::read_dir(reference_dir).map_err(|e| StandardsError::io(reference_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| StandardsError::io(reference_dir, e))?;
        let name = PathBuf::from(entry.file_name());
        if name == Path::new(MANIFEST_FILE) || entry.path().is_dir() {
            continue;
        }
        if !manifest_paths.contains(&name) {
            return Err(StandardsError::InvalidManifest {
                message: format!("unlisted file in reference dir: {}", name.display()),
            });
        }
    }
    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<()> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf> {
    let p = PathBuf::from(path);
    if p.is_absolute() || path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative with '/' separators".to_string(),
        });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must not leave the reference directory".to_string(),
        });
    }
    Ok(p)
}

fn verify_file(reference_dir: &Path, file: &ManifestFile) -> Result<()> {
    let full_path = reference_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    debug!(path = %file.path, "sha256 verified");
    Ok(())
}

fn resolve_role_path(reference_dir: &Path, files: &[ManifestFile], role: &str) -> Result<PathBuf> {
    let file = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| StandardsError::MissingRole {
            role: role.to_string(),
        })?;
    Ok(reference_dir.join(&file.path))
}

/// Rows of a CSV file with a header lookup that ignores case and BOM.
struct Table {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| StandardsError::csv(path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| StandardsError::csv(path, e))?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim().to_ascii_lowercase())
            .collect();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StandardsError::csv(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StandardsError::csv(&self.path, format!("missing column {name}")))
    }
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn parse_code_lists(path: &Path, data: &mut InMemoryReferenceSource) -> Result<usize> {
    let table = Table::read(path)?;
    let list = table.column("list")?;
    let code = table.column("code")?;
    let description = table.column("description")?;
    let mut count = 0;
    for row in &table.rows {
        if cell(row, list).is_empty() || cell(row, code).is_empty() {
            continue;
        }
        data.add_code(cell(row, list), cell(row, code), cell(row, description));
        count += 1;
    }
    Ok(count)
}

fn parse_states(path: &Path, data: &mut InMemoryReferenceSource) -> Result<usize> {
    let table = Table::read(path)?;
    let code = table.column("code")?;
    let abbreviation = table.column("abbreviation")?;
    let name = table.column("name")?;
    let mut count = 0;
    for row in &table.rows {
        if cell(row, code).is_empty() {
            continue;
        }
        data.push_state(StateEntry {
            code: cell(row, code).to_string(),
            abbreviation: cell(row, abbreviation).to_string(),
            name: cell(row, name).to_string(),
        });
        count += 1;
    }
    Ok(count)
}

fn parse_counties(path: &Path, data: &mut InMemoryReferenceSource) -> Result<usize> {
    let table = Table::read(path)?;
    let state = table.column("state")?;
    let code = table.column("code")?;
    let name = table.column("name")?;
    let mut count = 0;
    for row in &table.rows {
        if cell(row, state).is_empty() || cell(row, code).is_empty() {
            continue;
        }
        data.push_county(CountyEntry {
            state: cell(row, state).to_string(),
            code: cell(row, code).to_string(),
            name: cell(row, name).to_string(),
        });
        count += 1;
    }
    Ok(count)
}
