//! Loader for protein record batches in JSON.
//!
//! The upstream annotation parser emits a JSON array of records:
//!
//! ```json
//! [
//!   { "accession": "P1", "sequence": "ABCDEFG",
//!     "variants": [ { "start": 3, "end": 3, "mutated": "X", "info": "VAR_001" } ] }
//! ]
//! ```

use std::path::Path;

use crate::core::types::ProteinRecord;
use crate::parsing::ParseError;
use crate::utils::validation::MAX_PROTEINS;

/// Load protein records from a JSON file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` if it
/// is not a valid record array, or `ParseError::TooManyProteins`.
pub fn load_records(path: &Path) -> Result<Vec<ProteinRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_records_json(&content)
}

/// Parse protein records from JSON text
///
/// # Errors
///
/// See [`load_records`].
pub fn parse_records_json(json: &str) -> Result<Vec<ProteinRecord>, ParseError> {
    let records: Vec<ProteinRecord> = serde_json::from_str(json)?;
    if records.len() > MAX_PROTEINS {
        return Err(ParseError::TooManyProteins(records.len()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_json() {
        let json = r#"[
            {"accession": "P1", "sequence": "ABCDEFG",
             "variants": [{"start": 3, "end": 3, "mutated": "X", "info": "VAR_001"}]},
            {"accession": "P2", "sequence": "SRPIKPSPPY"}
        ]"#;
        let records = parse_records_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].variants[0].info, "VAR_001");
        assert!(records[1].variants.is_empty());
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(matches!(
            parse_records_json(r#"{"accession": "P1"}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_load_records_missing_file() {
        assert!(matches!(
            load_records(Path::new("/nonexistent/records.json")),
            Err(ParseError::Io(_))
        ));
    }
}
