//! Protein storage and indexing.
//!
//! Proteins are accumulated in a [`ProteinStoreBuilder`] and finalized into
//! a read-only [`ProteinStore`] (plain lookup) or a
//! [`VariantStore`](crate::matching::VariantStore) (variant-aware lookup).
//! Both hold a [`TagIndex`]: every `tag_length` window of every protein,
//! hashed with I/L folding, mapped to the anchors where it occurs.
//!
//! ## Example
//!
//! ```rust
//! use pep_mapper::{IndexConfig, ProteinRecord, ProteinStoreBuilder};
//!
//! let config = IndexConfig::default().with_tag_length(5);
//! let mut builder = ProteinStoreBuilder::with_config(config).unwrap();
//! builder.add_record(ProteinRecord::new("P1", "MKYILVTGGVI")).unwrap();
//!
//! let store = builder.finalize().unwrap();
//! assert!(store.contains("YLLVT"));
//! assert_eq!(store.find_peptide("VTGGV")["P1"][0].start, 5);
//! ```
//!
//! ## Loading From Files
//!
//! ```rust,no_run
//! use pep_mapper::ProteinStoreBuilder;
//! use std::path::Path;
//!
//! let mut builder = ProteinStoreBuilder::new();
//! builder.add_input(Path::new("proteome.fasta")).unwrap();
//! let report = builder.add_input(Path::new("variants.json")).unwrap();
//! for rejected in &report.rejected {
//!     eprintln!("{}: {}", rejected.accession, rejected.reason);
//! }
//! let store = builder.finalize_with_variants().unwrap();
//! ```
//!
//! [`ProteinStoreBuilder`]: builder::ProteinStoreBuilder
//! [`ProteinStore`]: store::ProteinStore
//! [`TagIndex`]: index::TagIndex

pub mod builder;
pub mod index;
pub mod store;
