//! Loaders for protein records.
//!
//! This module provides loaders for:
//!
//! - **FASTA files**: Plain protein sequences (record name used as accession)
//! - **JSON record batches**: Proteins with their declared variants
//!
//! Header text parsing (e.g. UniProt description fields and variant
//! annotations embedded in headers) happens upstream; these loaders only
//! consume its output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pep_mapper::parsing::{fasta::parse_fasta_file, records::load_records};
//! use std::path::Path;
//!
//! let plain = parse_fasta_file(Path::new("proteome.fasta")).unwrap();
//! let annotated = load_records(Path::new("variants.json")).unwrap();
//! ```

use thiserror::Error;

use crate::utils::validation::MAX_PROTEINS;

pub mod fasta;
pub mod records;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Too many proteins: {0} exceeds maximum allowed ({max})", max = MAX_PROTEINS)]
    TooManyProteins(usize),
}
