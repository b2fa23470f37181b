//! Two-phase builder for protein stores.
//!
//! `ProteinStoreBuilder` accumulates protein records from any number of
//! sources (JSON record batches, FASTA files, records built in code) and is
//! consumed by [`ProteinStoreBuilder::finalize`] or
//! [`ProteinStoreBuilder::finalize_with_variants`] to produce an immutable,
//! indexed store. Adding more sources later means re-running the build over
//! the full accumulated list; clone the builder before finalizing to keep it.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::store::{ConfigError, IndexConfig, ProteinStore, VariantProtein};
use crate::core::protein::Protein;
use crate::core::types::ProteinRecord;
use crate::core::variant::{VariantError, VariantInfo};
use crate::matching::variant_store::VariantStore;
use crate::parsing::{self, ParseError};
use crate::utils::validation::{
    check_protein_limit, first_invalid_residue, is_valid_accession, trim_stop,
};

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid variant: {0}")]
    Variant(#[from] VariantError),

    #[error("Duplicate accession: {0}")]
    DuplicateAccession(String),

    #[error("Invalid accession: '{0}'")]
    InvalidAccession(String),

    #[error("Invalid residue '{residue}' at position {position} of {accession}")]
    InvalidSequence {
        accession: String,
        position: usize,
        residue: char,
    },

    #[error("Too many proteins: {0}")]
    TooManyProteins(String),

    #[error("No proteins added")]
    Empty,
}

/// Input format for auto-detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain protein sequences
    Fasta,
    /// Protein records with variants
    Json,
}

impl InputFormat {
    /// Detect format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        if parsing::fasta::is_fasta_file(path) {
            return Some(Self::Fasta);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A protein that was not loaded, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedProtein {
    pub accession: String,
    pub reason: String,
}

/// Record of a processed input
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub source: String,
    pub proteins_found: usize,
    pub proteins_loaded: usize,
    pub variants_loaded: usize,
    pub rejected: Vec<RejectedProtein>,
}

/// Accumulates protein records, then builds an immutable store
#[derive(Debug, Clone, Default)]
pub struct ProteinStoreBuilder {
    config: IndexConfig,

    /// Proteins in load order
    proteins: Vec<VariantProtein>,

    accessions: HashSet<String>,

    /// Records of processed inputs
    inputs_processed: Vec<LoadReport>,
}

impl ProteinStoreBuilder {
    /// Create a builder with the default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom config
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Config` if the config is invalid.
    pub fn with_config(config: IndexConfig) -> Result<Self, BuilderError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Add a single protein record.
    ///
    /// The record is rejected as a whole if its accession, sequence or any of
    /// its variants is invalid; nothing is added in that case.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAccession`, `BuilderError::DuplicateAccession`,
    /// `BuilderError::InvalidSequence`, `BuilderError::TooManyProteins` or
    /// `BuilderError::Variant`.
    pub fn add_record(&mut self, record: ProteinRecord) -> Result<(), BuilderError> {
        if !is_valid_accession(&record.accession) {
            return Err(BuilderError::InvalidAccession(record.accession));
        }
        if self.accessions.contains(&record.accession) {
            return Err(BuilderError::DuplicateAccession(record.accession));
        }
        if let Some(msg) = check_protein_limit(self.proteins.len()) {
            return Err(BuilderError::TooManyProteins(msg));
        }

        let sequence = trim_stop(&record.sequence);
        if let Some((position, residue)) = first_invalid_residue(sequence) {
            return Err(BuilderError::InvalidSequence {
                accession: record.accession,
                position: position + 1,
                residue,
            });
        }

        let protein = Protein::new(record.accession.as_str(), sequence);
        let info = VariantInfo::from_records(&record.accession, &record.variants, protein.len())?;
        let variant_protein =
            VariantProtein::new(protein, info, self.config.max_variants_per_position)?;

        self.accessions.insert(record.accession);
        self.proteins.push(variant_protein);
        Ok(())
    }

    /// Add a batch of records. Invalid records are skipped, logged and listed
    /// in the returned report.
    pub fn add_records<I>(&mut self, source: &str, records: I) -> LoadReport
    where
        I: IntoIterator<Item = ProteinRecord>,
    {
        let mut report = LoadReport {
            source: source.to_string(),
            ..LoadReport::default()
        };

        for record in records {
            report.proteins_found += 1;
            let accession = record.accession.clone();
            let variants = record.variants.len();

            match self.add_record(record) {
                Ok(()) => {
                    report.proteins_loaded += 1;
                    report.variants_loaded += variants;
                }
                Err(e) => {
                    warn!("Skipping protein '{}' from {}: {}", accession, source, e);
                    report.rejected.push(RejectedProtein {
                        accession,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.inputs_processed.push(report.clone());
        report
    }

    /// Add an input file (auto-detect format)
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Parse` if the format cannot be detected or the
    /// file cannot be parsed. Individual invalid proteins do not fail the load.
    pub fn add_input(&mut self, path: &Path) -> Result<LoadReport, BuilderError> {
        match InputFormat::from_path(path) {
            Some(InputFormat::Fasta) => self.add_fasta(path),
            Some(InputFormat::Json) => self.add_json(path),
            None => Err(BuilderError::Parse(ParseError::InvalidFormat(format!(
                "Cannot detect format for: {}",
                path.display()
            )))),
        }
    }

    /// Add plain proteins from a FASTA file
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Parse` if the file cannot be read or parsed.
    pub fn add_fasta(&mut self, path: &Path) -> Result<LoadReport, BuilderError> {
        let records = parsing::fasta::parse_fasta_file(path)?;
        Ok(self.add_records(&path.display().to_string(), records))
    }

    /// Add protein records with variants from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Parse` if the file cannot be read or parsed.
    pub fn add_json(&mut self, path: &Path) -> Result<LoadReport, BuilderError> {
        let records = parsing::records::load_records(path)?;
        Ok(self.add_records(&path.display().to_string(), records))
    }

    /// Reports for every batch added so far
    #[must_use]
    pub fn inputs_processed(&self) -> &[LoadReport] {
        &self.inputs_processed
    }

    /// Number of proteins accumulated
    #[must_use]
    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Total number of variants across accumulated proteins
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.proteins.iter().map(|vp| vp.variant_info().len()).sum()
    }

    /// Build a plain store; variants are discarded.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Empty` if no proteins were added, or
    /// `BuilderError::Config` if the config is invalid.
    pub fn finalize(self) -> Result<ProteinStore, BuilderError> {
        let (store, _) = self.build_parts()?;
        Ok(store)
    }

    /// Build a variant-aware store.
    ///
    /// # Errors
    ///
    /// See [`ProteinStoreBuilder::finalize`].
    pub fn finalize_with_variants(self) -> Result<VariantStore, BuilderError> {
        let (store, variant_proteins) = self.build_parts()?;
        Ok(VariantStore::new(store, variant_proteins))
    }

    fn build_parts(self) -> Result<(ProteinStore, Vec<VariantProtein>), BuilderError> {
        self.config.validate()?;
        if self.proteins.is_empty() {
            return Err(BuilderError::Empty);
        }

        let variant_count = self.variant_count();
        let proteins: Vec<Protein> = self
            .proteins
            .iter()
            .map(|vp| vp.protein().clone())
            .collect();
        let store = ProteinStore::new(proteins, self.config.tag_length);

        info!(
            "Indexed {} proteins ({} tags, {} anchors, {} variants)",
            store.len(),
            store.tag_index().len(),
            store.tag_index().anchor_count(),
            variant_count
        );

        let variant_proteins = self
            .proteins
            .into_iter()
            .filter(VariantProtein::has_variants)
            .collect();
        Ok((store, variant_proteins))
    }
}
