//! Peptide matching engines.
//!
//! This module provides the query side of the crate:
//!
//! - [`PeptideMatcher`]: Literal (I/L-equivalent) lookup through the tag index
//! - [`match_with_variant`]: Backtracking alignment through a protein's variants
//! - [`VariantStore`]: Variant-aware store answering peptide queries across all proteins
//! - [`QueryCache`]: Concurrent memo of peptide results used by [`VariantStore`]
//!
//! ## Matching Algorithm
//!
//! 1. **Tag lookup**: The first `tag_length` residues of the peptide are hashed
//!    and looked up in the tag index to get candidate anchors
//! 2. **Confirmation**: Each anchor is verified against the protein sequence
//! 3. **Variant alignment**: For proteins with variants, the peptide is threaded
//!    through the wild type, detouring through variants where it diverges
//!
//! ## Example
//!
//! ```rust
//! use pep_mapper::{ProteinRecord, ProteinStoreBuilder, VariantRecord};
//!
//! let mut builder = ProteinStoreBuilder::new();
//! builder
//!     .add_record(
//!         ProteinRecord::new("P1", "ABCDEFG")
//!             .with_variant(VariantRecord::new(3, 3, "X", "VAR_1")),
//!     )
//!     .unwrap();
//! let store = builder.finalize_with_variants().unwrap();
//!
//! let matches = store.find_peptide("ABXDE");
//! assert_eq!(matches["P1"][0].variant_ids(), vec!["VAR_1"]);
//! ```

pub mod cache;
pub mod engine;
pub mod variant_engine;
pub mod variant_store;

pub use cache::{PeptideMatches, QueryCache};
pub use engine::PeptideMatcher;
pub use variant_engine::{match_with_variant, VariantMatch};
pub use variant_store::VariantStore;
