//! Core data types for peptide-to-protein matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Protein`]: An accession with its wild-type residue sequence
//! - [`MatchSpan`]: A half-open span in wild-type coordinates
//! - [`SequenceVariant`], [`VariantInfo`]: Annotated edits on a protein
//! - [`ProteinRecord`], [`VariantRecord`]: Input records from the upstream parser
//!
//! ## Residue Equivalence
//!
//! Isoleucine and Leucine are mass-indistinguishable. Every comparison, hash
//! and cache key folds `I` to `L` (see [`residue`]).
//!
//! [`Protein`]: protein::Protein
//! [`MatchSpan`]: protein::MatchSpan
//! [`SequenceVariant`]: variant::SequenceVariant
//! [`VariantInfo`]: variant::VariantInfo
//! [`ProteinRecord`]: types::ProteinRecord
//! [`VariantRecord`]: types::VariantRecord

pub mod protein;
pub mod residue;
pub mod types;
pub mod variant;
