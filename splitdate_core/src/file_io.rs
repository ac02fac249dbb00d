//! # File I/O Module
//!
//! Reads and writes form definitions and submitted answers as JSON:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure definition schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use splitdate_core::definition::FormDefinition;
//! use splitdate_core::file_io::{load_form_definition, save_form_definition};
//! use std::path::Path;
//!
//! let path = Path::new("intake.json");
//! save_form_definition(&FormDefinition::sample(), path).unwrap();
//! let definition = load_form_definition(path).unwrap();
//! assert_eq!(definition.fields.len(), 2);
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::definition::{FormDefinition, SCHEMA_VERSION};
use crate::errors::{DateError, DateResult};
use crate::form::Answers;

/// Save a form definition with atomic write semantics.
pub fn save_form_definition(definition: &FormDefinition, path: &Path) -> DateResult<()> {
    write_json_atomic(definition, path)
}

/// Load a form definition and check its schema version.
///
/// # Returns
///
/// * `Ok(FormDefinition)` - Successfully loaded
/// * `Err(DateError::VersionMismatch)` - File version is incompatible
/// * `Err(DateError::SerializationError)` - Invalid JSON
/// * `Err(DateError::FileError)` - I/O error
pub fn load_form_definition(path: &Path) -> DateResult<FormDefinition> {
    let definition: FormDefinition = read_json(path)?;
    validate_version(&definition.schema_version)?;
    Ok(definition)
}

/// Save submitted answers with atomic write semantics.
pub fn save_answers(answers: &Answers, path: &Path) -> DateResult<()> {
    write_json_atomic(answers, path)
}

/// Load previously submitted answers.
pub fn load_answers(path: &Path) -> DateResult<Answers> {
    read_json(path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// The save process:
/// 1. Serialize to pretty JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> DateResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DateError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        DateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        DateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        DateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DateResult<T> {
    let mut file = File::open(path)
        .map_err(|e| DateError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| DateError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| DateError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> DateResult<()> {
    let mismatch = || DateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}
