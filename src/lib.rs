//! # pep-mapper
//!
//! Variant-aware peptide-to-protein sequence matching.
//!
//! Peptides identified by mass spectrometry are mapped back to the proteins
//! they came from. A peptide may occur verbatim in a protein's wild-type
//! sequence, or it may only be explained by annotated sequence variants
//! (substitutions, insertions, deletions, premature stops) spliced in at
//! known coordinates.
//!
//! ## Features
//!
//! - **Tag index**: Hashed k-mer index for fast candidate lookup
//! - **I/L equivalence**: Isoleucine and Leucine are treated as one residue
//! - **Variant alignment**: Backtracking search that threads a peptide through
//!   a protein's variants and reports the ones it needed
//! - **Query cache**: Concurrent memo of peptide results
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
//! // Wild-type match: no variants needed
//! let protein = store.variant_protein("P1").unwrap();
//! assert!(protein.match_peptide("BCDE").unwrap().is_wild_type());
//!
//! // Explained by the substitution C3X
//! let m = protein.match_peptide("ABXDE").unwrap();
//! assert_eq!(m.variant_ids(), vec!["VAR_1"]);
//!
//! // Not explained at all
//! assert!(protein.match_peptide("ABXDZ").is_none());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Protein storage, builder and tag index
//! - [`core`]: Proteins, variants and residue equivalence
//! - [`matching`]: Plain and variant-aware matchers, query cache
//! - [`parsing`]: FASTA and JSON record loaders
//! - [`utils`]: Validation helpers

pub mod catalog;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::builder::{BuilderError, LoadReport, ProteinStoreBuilder};
pub use catalog::index::{TagAnchor, TagIndex};
pub use catalog::store::{IndexConfig, ProteinStore, VariantProtein};
pub use core::protein::{MatchSpan, Protein};
pub use core::types::{ProteinRecord, VariantRecord};
pub use core::variant::{SequenceVariant, VariantError, VariantInfo, VariantType};
pub use matching::{match_with_variant, PeptideMatcher, QueryCache, VariantMatch, VariantStore};
