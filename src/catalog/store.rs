use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::index::TagIndex;
use crate::core::protein::Protein;
use crate::core::variant::{SequenceVariant, VariantError, VariantInfo};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid tag length {0}: must be between 1 and {max}", max = MAX_TAG_LENGTH)]
    InvalidTagLength(usize),

    #[error("Invalid variant limit: at least one variant per position is required")]
    InvalidVariantLimit,
}

/// Default number of residues per indexed tag
pub const DEFAULT_TAG_LENGTH: usize = 4;

/// Longest tag whose base-26 hash cannot wrap a `u64`
pub const MAX_TAG_LENGTH: usize = 13;

/// Configuration for building a protein store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Residues per indexed tag
    pub tag_length: usize,

    /// Cap on variants registered at one wild-type coordinate (unlimited if `None`)
    pub max_variants_per_position: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tag_length: DEFAULT_TAG_LENGTH,
            max_variants_per_position: None,
        }
    }
}

impl IndexConfig {
    #[must_use]
    pub fn with_tag_length(mut self, tag_length: usize) -> Self {
        self.tag_length = tag_length;
        self
    }

    #[must_use]
    pub fn with_max_variants_per_position(mut self, limit: usize) -> Self {
        self.max_variants_per_position = Some(limit);
        self
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` or `ConfigError::ParseError` if the file
    /// cannot be read or parsed, or a validation error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a usable index.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTagLength` or `ConfigError::InvalidVariantLimit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag_length == 0 || self.tag_length > MAX_TAG_LENGTH {
            return Err(ConfigError::InvalidTagLength(self.tag_length));
        }
        if self.max_variants_per_position == Some(0) {
            return Err(ConfigError::InvalidVariantLimit);
        }
        Ok(())
    }
}

/// A protein with its declared variants and a per-coordinate variant index
#[derive(Debug, Clone)]
pub struct VariantProtein {
    protein: Protein,
    info: VariantInfo,

    /// 0-based wild-type coordinate -> indices into `info.variants`, in declaration order
    positions: Vec<Vec<usize>>,
}

impl VariantProtein {
    /// Build the position index for `protein`.
    ///
    /// # Errors
    ///
    /// Returns `VariantError::TooManyAtPosition` if more than
    /// `max_per_position` variants start at the same coordinate.
    pub fn new(
        protein: Protein,
        info: VariantInfo,
        max_per_position: Option<usize>,
    ) -> Result<Self, VariantError> {
        let mut positions: Vec<Vec<usize>> = Vec::new();

        if !info.is_empty() {
            let last_start = info
                .variants()
                .iter()
                .map(SequenceVariant::wt_start)
                .max()
                .unwrap_or(0);
            positions.resize(protein.len().max(last_start + 1), Vec::new());

            for (idx, variant) in info.variants().iter().enumerate() {
                let slot = &mut positions[variant.wt_start()];
                if let Some(limit) = max_per_position {
                    if slot.len() >= limit {
                        return Err(VariantError::TooManyAtPosition {
                            accession: protein.accession().to_string(),
                            position: variant.start(),
                            limit,
                        });
                    }
                }
                slot.push(idx);
            }
        }

        Ok(Self {
            protein,
            info,
            positions,
        })
    }

    /// A protein with no variants
    #[must_use]
    pub fn wild_type(protein: Protein) -> Self {
        let info = VariantInfo::new(protein.accession());
        Self {
            protein,
            info,
            positions: Vec::new(),
        }
    }

    #[must_use]
    pub fn protein(&self) -> &Protein {
        &self.protein
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        self.protein.accession()
    }

    #[must_use]
    pub fn variant_info(&self) -> &VariantInfo {
        &self.info
    }

    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.info.is_empty()
    }

    /// Number of coordinates covered by the position index, including
    /// coordinates past the wild-type end that carry terminus insertions
    #[must_use]
    pub fn index_len(&self) -> usize {
        self.positions.len()
    }

    /// Variants starting at 0-based wild-type coordinate `pos`, in declaration order
    pub fn variants_at(&self, pos: usize) -> impl Iterator<Item = &SequenceVariant> + '_ {
        self.positions
            .get(pos)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.info.variants()[idx])
    }

    #[must_use]
    pub fn has_variants_at(&self, pos: usize) -> bool {
        self.positions.get(pos).is_some_and(|slot| !slot.is_empty())
    }
}

/// Read-only protein collection with its tag index
#[derive(Debug, Clone)]
pub struct ProteinStore {
    proteins: Vec<Protein>,

    /// Index: accession -> index in proteins vec
    accession_to_index: HashMap<String, usize>,

    index: TagIndex,
}

impl ProteinStore {
    /// Index `proteins` with tags of `tag_length` residues
    #[must_use]
    pub fn new(proteins: Vec<Protein>, tag_length: usize) -> Self {
        let accession_to_index = proteins
            .iter()
            .enumerate()
            .map(|(idx, protein)| (protein.accession().to_string(), idx))
            .collect();
        let index = TagIndex::build(&proteins, tag_length);

        Self {
            proteins,
            accession_to_index,
            index,
        }
    }

    /// Get a protein by accession
    #[must_use]
    pub fn get(&self, accession: &str) -> Option<&Protein> {
        self.accession_to_index
            .get(accession)
            .map(|&idx| &self.proteins[idx])
    }

    /// Get a protein by its position in the store
    #[must_use]
    pub fn protein(&self, idx: usize) -> Option<&Protein> {
        self.proteins.get(idx)
    }

    #[must_use]
    pub fn proteins(&self) -> &[Protein] {
        &self.proteins
    }

    #[must_use]
    pub fn tag_index(&self) -> &TagIndex {
        &self.index
    }

    #[must_use]
    pub fn tag_length(&self) -> usize {
        self.index.tag_length()
    }

    /// Wild-type residues of a protein around a span, see [`Protein::get_wt_sequence`].
    /// Unknown accessions yield `None`.
    #[must_use]
    pub fn get_wt_sequence(
        &self,
        accession: &str,
        start: usize,
        length: usize,
        flanking: usize,
    ) -> Option<String> {
        self.get(accession)
            .map(|protein| protein.get_wt_sequence(start, length, flanking))
    }

    /// Number of proteins in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(start: usize, end: usize, mutated: &str, info: &str) -> SequenceVariant {
        SequenceVariant::new("P1", start, end, mutated, info, 7).unwrap()
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config = IndexConfig::default();
        assert_eq!(config.tag_length, DEFAULT_TAG_LENGTH);
        assert!(config.validate().is_ok());
        assert!(IndexConfig::default().with_tag_length(0).validate().is_err());
        assert!(IndexConfig::default().with_tag_length(14).validate().is_err());
        assert!(IndexConfig::default()
            .with_max_variants_per_position(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config: IndexConfig = serde_json::from_str(r#"{"tag_length": 5}"#).unwrap();
        assert_eq!(config.tag_length, 5);
        assert_eq!(config.max_variants_per_position, None);
    }

    #[test]
    fn test_position_index_keeps_declaration_order() {
        let mut info = VariantInfo::new("P1");
        info.push(variant(5, 5, "W", "second_locus"));
        info.push(variant(3, 3, "X", "first"));
        info.push(variant(3, 3, "Y", "second"));
        let vp = VariantProtein::new(Protein::new("P1", "ABCDEFG"), info, None).unwrap();

        let at_2: Vec<&str> = vp.variants_at(2).map(SequenceVariant::info).collect();
        assert_eq!(at_2, vec!["first", "second"]);
        assert!(vp.has_variants_at(4));
        assert!(!vp.has_variants_at(0));
        assert_eq!(vp.variants_at(100).count(), 0);
    }

    #[test]
    fn test_position_index_limit() {
        let mut info = VariantInfo::new("P1");
        for residue in ["V", "W", "X"] {
            info.push(variant(3, 3, residue, residue));
        }
        let result = VariantProtein::new(Protein::new("P1", "ABCDEFG"), info.clone(), Some(2));
        assert!(matches!(
            result,
            Err(VariantError::TooManyAtPosition { position: 3, limit: 2, .. })
        ));
        assert!(VariantProtein::new(Protein::new("P1", "ABCDEFG"), info, None).is_ok());
    }

    #[test]
    fn test_position_index_covers_terminus() {
        let mut info = VariantInfo::new("P1");
        info.push(variant(8, 8, "K", "ext"));
        let vp = VariantProtein::new(Protein::new("P1", "ABCDEFG"), info, None).unwrap();
        assert_eq!(vp.index_len(), 8);
        assert!(vp.has_variants_at(7));
    }

    #[test]
    fn test_store_lookup() {
        let store = ProteinStore::new(
            vec![Protein::new("P1", "ABCDEFG"), Protein::new("P2", "HIJKLMN")],
            4,
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("P2").unwrap().sequence(), b"HIJKLMN");
        assert!(store.get("P3").is_none());
        assert_eq!(store.get_wt_sequence("P1", 2, 2, 1).as_deref(), Some("BCDE"));
        assert!(store.get_wt_sequence("P3", 0, 1, 0).is_none());
    }
}
