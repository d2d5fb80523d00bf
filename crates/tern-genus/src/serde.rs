use std::path::Path;

use tern_core::{ErrorInfo, TernError};

use crate::report::{GenusReport, HeckeReport};

/// Serialises a genus report into indented JSON.
pub fn genus_report_to_json(report: &GenusReport) -> Result<String, TernError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| TernError::Serde(ErrorInfo::new("genus-report-serialize", err.to_string())))
}

/// Deserialises a genus report from JSON text.
pub fn genus_report_from_json(json: &str) -> Result<GenusReport, TernError> {
    serde_json::from_str(json)
        .map_err(|err| TernError::Serde(ErrorInfo::new("genus-report-deserialize", err.to_string())))
}

/// Serialises a Hecke report into indented JSON.
pub fn hecke_report_to_json(report: &HeckeReport) -> Result<String, TernError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| TernError::Serde(ErrorInfo::new("hecke-report-serialize", err.to_string())))
}

/// Deserialises a Hecke report from JSON text.
pub fn hecke_report_from_json(json: &str) -> Result<HeckeReport, TernError> {
    serde_json::from_str(json)
        .map_err(|err| TernError::Serde(ErrorInfo::new("hecke-report-deserialize", err.to_string())))
}

/// Writes a JSON payload to disk.
pub fn write_json(path: &Path, json: &str) -> Result<(), TernError> {
    std::fs::write(path, json).map_err(|err| {
        TernError::Serde(
            ErrorInfo::new("json-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Reads a JSON payload from disk.
pub fn read_json(path: &Path) -> Result<String, TernError> {
    std::fs::read_to_string(path).map_err(|err| {
        TernError::Serde(
            ErrorInfo::new("json-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
