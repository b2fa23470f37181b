//! Parser for protein FASTA files using noodles.
//!
//! Extracts accessions and residue sequences. The record name (the first
//! word of the header) is used verbatim as the accession; descriptions are
//! ignored. Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.faa` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.faa.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.faa.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::core::types::ProteinRecord;
use crate::parsing::ParseError;
use crate::utils::validation::check_protein_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".faa.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".faa.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "faa")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a protein FASTA file into records without variants.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyProteins` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<ProteinRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(GzDecoder::new(file));
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))
    } else {
        parse_fasta_reader(&mut fasta::io::Reader::new(BufReader::new(file)))
    }
}

/// Parse protein FASTA text
///
/// # Errors
///
/// See [`parse_fasta_file`].
pub fn parse_fasta_text(text: &str) -> Result<Vec<ProteinRecord>, ParseError> {
    parse_fasta_reader(&mut fasta::io::Reader::new(text.as_bytes()))
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<ProteinRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_protein_limit(records.len()).is_some() {
            return Err(ParseError::TooManyProteins(records.len()));
        }

        let accession = String::from_utf8_lossy(record.name()).to_string();
        let sequence = String::from_utf8_lossy(record.sequence().as_ref()).to_string();
        records.push(ProteinRecord::new(accession, sequence));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}
