use serde::{Deserialize, Serialize};

/// A variant as declared by the upstream annotation parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// First replaced wild-type residue (1-based)
    pub start: usize,

    /// Last replaced wild-type residue (1-based, inclusive)
    pub end: usize,

    /// Replacement residues, possibly empty or ending in `*`
    #[serde(default)]
    pub mutated: String,

    /// Provenance identifier
    #[serde(default)]
    pub info: String,
}

impl VariantRecord {
    pub fn new(
        start: usize,
        end: usize,
        mutated: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            mutated: mutated.into(),
            info: info.into(),
        }
    }
}

/// One protein as produced by the upstream FASTA/annotation parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub accession: String,

    pub sequence: String,

    /// Variants in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantRecord>,
}

impl ProteinRecord {
    pub fn new(accession: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            sequence: sequence.into(),
            variants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: VariantRecord) -> Self {
        self.variants.push(variant);
        self
    }

    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}
