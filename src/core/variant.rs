//! Sequence variants annotated on a protein.
//!
//! A [`SequenceVariant`] replaces the wild-type residues `start..=end`
//! (1-based, inclusive) with a mutated subsequence. Its [`VariantType`] is
//! derived from the coordinates and the replacement, never chosen by the
//! caller.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::residue;
use crate::core::types::VariantRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Invalid range for variant '{info}' on {accession}: end {end} < start {start}")]
    InvalidRange {
        accession: String,
        info: String,
        start: usize,
        end: usize,
    },

    #[error("Invalid position for variant '{info}' on {accession}: coordinates are 1-based")]
    InvalidPosition { accession: String, info: String },

    #[error(
        "Variant '{info}' on {accession} starts at {start}, past the protein end ({protein_length})"
    )]
    OutOfBounds {
        accession: String,
        info: String,
        start: usize,
        protein_length: usize,
    },

    #[error("Too many variants at position {position} of {accession}: limit is {limit}")]
    TooManyAtPosition {
        accession: String,
        position: usize,
        limit: usize,
    },
}

/// Kind of edit a variant applies to the wild-type sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    /// One residue replaced by one residue
    AaSubstitution,
    /// A range replaced by a replacement of the same length
    Substitution,
    /// A range replaced by a longer replacement, or a residue appended at the terminus
    Insertion,
    /// A range replaced by a shorter (possibly empty) replacement
    Deletion,
    /// Translation terminates after the replacement
    Stop,
    /// Replacement contains symbols that are not residues
    Unknown,
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AaSubstitution => write!(f, "AA_SUBSTITUTION"),
            Self::Substitution => write!(f, "SUBSTITUTION"),
            Self::Insertion => write!(f, "INSERTION"),
            Self::Deletion => write!(f, "DELETION"),
            Self::Stop => write!(f, "STOP"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Outcome of matching a variant's replacement against a peptide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStep {
    /// The peptide ends within the replacement
    Complete,
    /// The replacement was consumed; alignment continues at these positions
    Resume {
        peptide_pos: usize,
        protein_pos: usize,
    },
}

/// A single typed edit at a wild-type coordinate range
///
/// Only constructed through [`SequenceVariant::new`], so the coordinates are
/// always valid and the type always matches the replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceVariant {
    accession: String,

    /// First replaced wild-type residue (1-based)
    start: usize,

    /// Last replaced wild-type residue (1-based, inclusive)
    end: usize,

    /// Replacement as declared, including any trailing `*`
    mutated: String,

    /// Opaque provenance identifier
    info: String,

    variant_type: VariantType,
}

impl SequenceVariant {
    /// Create a variant on a protein of `protein_length` residues.
    ///
    /// # Errors
    ///
    /// Returns `VariantError::InvalidPosition` if `start` is 0,
    /// `VariantError::InvalidRange` if `end < start`, or
    /// `VariantError::OutOfBounds` if `start` lies more than one residue past
    /// the protein end.
    pub fn new(
        accession: impl Into<String>,
        start: usize,
        end: usize,
        mutated: impl Into<String>,
        info: impl Into<String>,
        protein_length: usize,
    ) -> Result<Self, VariantError> {
        let accession = accession.into();
        let info = info.into();
        let mutated = mutated.into().to_ascii_uppercase();

        if start == 0 {
            return Err(VariantError::InvalidPosition { accession, info });
        }
        if end < start {
            return Err(VariantError::InvalidRange {
                accession,
                info,
                start,
                end,
            });
        }
        if start > protein_length + 1 {
            return Err(VariantError::OutOfBounds {
                accession,
                info,
                start,
                protein_length,
            });
        }

        let variant_type = derive_type(start, end, &mutated, protein_length);
        if variant_type == VariantType::Unknown {
            debug!(
                "Variant '{}' on {} has non-residue replacement '{}'; it will never match",
                info, accession, mutated
            );
        }
        Ok(Self {
            accession,
            start,
            end,
            mutated,
            info,
            variant_type,
        })
    }

    /// Build a variant from an input record.
    ///
    /// # Errors
    ///
    /// See [`SequenceVariant::new`].
    pub fn from_record(
        accession: &str,
        record: &VariantRecord,
        protein_length: usize,
    ) -> Result<Self, VariantError> {
        Self::new(
            accession,
            record.start,
            record.end,
            record.mutated.as_str(),
            record.info.as_str(),
            protein_length,
        )
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// First replaced wild-type residue (1-based)
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last replaced wild-type residue (1-based, inclusive)
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Replacement as declared, including any trailing `*`
    #[must_use]
    pub fn mutated(&self) -> &str {
        &self.mutated
    }

    /// Provenance identifier
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    #[must_use]
    pub fn variant_type(&self) -> VariantType {
        self.variant_type
    }

    /// Residues visible in the translated protein (trailing `*` removed)
    #[must_use]
    pub fn replacement(&self) -> &[u8] {
        visible_residues(&self.mutated)
    }

    /// Number of visible replacement residues
    #[must_use]
    pub fn length(&self) -> usize {
        self.replacement().len()
    }

    /// 0-based wild-type coordinate the variant is registered at
    #[must_use]
    pub fn wt_start(&self) -> usize {
        self.start - 1
    }

    /// 0-based exclusive end of the replaced wild-type range
    #[must_use]
    pub fn wt_end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.variant_type == VariantType::Stop
    }

    /// Test whether the replacement accounts for `peptide[peptide_pos..]`.
    ///
    /// Non-stop replacements must prefix-match the remaining peptide up to the
    /// shorter of the two; when the peptide continues past the replacement the
    /// alignment resumes at the end of the replaced wild-type range. A stop
    /// must contain the whole peptide when met at the alignment start, or the
    /// whole remainder as a prefix otherwise.
    #[must_use]
    pub fn try_match(&self, peptide: &[u8], peptide_pos: usize) -> Option<VariantStep> {
        let remaining = peptide.get(peptide_pos..)?;
        let replacement = self.replacement();

        match self.variant_type {
            VariantType::Unknown => None,
            VariantType::Stop => {
                let found = if peptide_pos == 0 {
                    residue::find_folded(replacement, remaining).is_some()
                } else {
                    remaining.len() <= replacement.len()
                        && residue::slices_equal(&replacement[..remaining.len()], remaining)
                };
                found.then_some(VariantStep::Complete)
            }
            _ => {
                let n = remaining.len().min(replacement.len());
                if !residue::slices_equal(&replacement[..n], &remaining[..n]) {
                    return None;
                }
                if remaining.len() <= replacement.len() {
                    Some(VariantStep::Complete)
                } else {
                    Some(VariantStep::Resume {
                        peptide_pos: peptide_pos + replacement.len(),
                        protein_pos: self.wt_end(),
                    })
                }
            }
        }
    }
}

impl std::fmt::Display for SequenceVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "({}|{}|{})", self.start, self.mutated, self.info)
        } else {
            write!(
                f,
                "({}|{}|{}|{})",
                self.start, self.end, self.mutated, self.info
            )
        }
    }
}

fn visible_residues(mutated: &str) -> &[u8] {
    mutated.trim_end_matches('*').as_bytes()
}

fn derive_type(start: usize, end: usize, mutated: &str, protein_length: usize) -> VariantType {
    let visible = visible_residues(mutated);

    // A residue appended past the declared end extends the protein (stop loss)
    if visible.len() == 1 && start > protein_length {
        return VariantType::Insertion;
    }
    if mutated.ends_with('*') {
        return VariantType::Stop;
    }
    if !visible.iter().all(u8::is_ascii_uppercase) {
        return VariantType::Unknown;
    }
    if visible.len() == 1 && start == end {
        return VariantType::AaSubstitution;
    }

    let wt_length = end - start + 1;
    match visible.len().cmp(&wt_length) {
        std::cmp::Ordering::Equal => VariantType::Substitution,
        std::cmp::Ordering::Greater => VariantType::Insertion,
        std::cmp::Ordering::Less => VariantType::Deletion,
    }
}

/// The ordered variants declared for one protein
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantInfo {
    accession: String,

    /// Variants in declaration order
    variants: Vec<SequenceVariant>,
}

impl VariantInfo {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            variants: Vec::new(),
        }
    }

    /// Build the variant list for a protein from its input records.
    ///
    /// # Errors
    ///
    /// Returns the first `VariantError` encountered; no partial list is
    /// produced.
    pub fn from_records(
        accession: &str,
        records: &[VariantRecord],
        protein_length: usize,
    ) -> Result<Self, VariantError> {
        let variants = records
            .iter()
            .map(|record| SequenceVariant::from_record(accession, record, protein_length))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            accession: accession.to_string(),
            variants,
        })
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// Variants in declaration order
    #[must_use]
    pub fn variants(&self) -> &[SequenceVariant] {
        &self.variants
    }

    pub fn push(&mut self, variant: SequenceVariant) {
        self.variants.push(variant);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(start: usize, end: usize, mutated: &str) -> SequenceVariant {
        SequenceVariant::new("P1", start, end, mutated, "VAR_1", 10).unwrap()
    }

    #[test]
    fn test_type_derivation() {
        assert_eq!(variant(3, 3, "X").variant_type, VariantType::AaSubstitution);
        assert_eq!(variant(3, 4, "XY").variant_type, VariantType::Substitution);
        assert_eq!(variant(3, 3, "XYZ").variant_type, VariantType::Insertion);
        assert_eq!(variant(3, 5, "X").variant_type, VariantType::Deletion);
        assert_eq!(variant(3, 5, "").variant_type, VariantType::Deletion);
        assert_eq!(variant(3, 3, "*").variant_type, VariantType::Stop);
        assert_eq!(variant(3, 4, "AB*").variant_type, VariantType::Stop);
        assert_eq!(variant(3, 3, "1").variant_type, VariantType::Unknown);
    }

    #[test]
    fn test_terminus_insertion_overrides_stop() {
        let v = variant(11, 11, "K*");
        assert_eq!(v.variant_type, VariantType::Insertion);
        assert_eq!(v.length(), 1);

        let v = variant(11, 11, "K");
        assert_eq!(v.variant_type, VariantType::Insertion);
    }

    #[test]
    fn test_length_excludes_stop() {
        assert_eq!(variant(3, 3, "*").length(), 0);
        assert_eq!(variant(3, 4, "AB*").length(), 2);
        assert_eq!(variant(3, 5, "").length(), 0);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = SequenceVariant::new("P1", 5, 4, "A", "VAR_X", 10).unwrap_err();
        assert!(matches!(err, VariantError::InvalidRange { start: 5, end: 4, .. }));
        assert!(err.to_string().contains("VAR_X"));
    }

    #[test]
    fn test_zero_and_out_of_bounds_rejected() {
        assert!(matches!(
            SequenceVariant::new("P1", 0, 1, "A", "V", 10),
            Err(VariantError::InvalidPosition { .. })
        ));
        assert!(matches!(
            SequenceVariant::new("P1", 12, 12, "A", "V", 10),
            Err(VariantError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_try_match_substitution() {
        let v = variant(3, 3, "X");
        assert_eq!(
            v.try_match(b"ABXDE", 2),
            Some(VariantStep::Resume {
                peptide_pos: 3,
                protein_pos: 3
            })
        );
        assert_eq!(v.try_match(b"ABX", 2), Some(VariantStep::Complete));
        assert_eq!(v.try_match(b"ABYDE", 2), None);
    }

    #[test]
    fn test_try_match_deletion_to_nothing() {
        let v = variant(3, 4, "");
        assert_eq!(
            v.try_match(b"ABEF", 2),
            Some(VariantStep::Resume {
                peptide_pos: 2,
                protein_pos: 4
            })
        );
    }

    #[test]
    fn test_try_match_stop() {
        let v = variant(5, 5, "QR*");
        // mid-peptide: remainder must be a prefix of the replacement
        assert_eq!(v.try_match(b"ABQR", 2), Some(VariantStep::Complete));
        assert_eq!(v.try_match(b"ABQ", 2), Some(VariantStep::Complete));
        assert_eq!(v.try_match(b"ABQRS", 2), None);
        // at the alignment start: peptide must be inside the replacement
        assert_eq!(v.try_match(b"R", 0), Some(VariantStep::Complete));
        assert_eq!(v.try_match(b"RS", 0), None);
    }

    #[test]
    fn test_try_match_il_equivalent() {
        let v = variant(3, 3, "I");
        assert_eq!(v.try_match(b"ABL", 2), Some(VariantStep::Complete));
    }

    #[test]
    fn test_variant_info_fails_whole_list() {
        let records = vec![
            VariantRecord::new(2, 2, "A", "OK"),
            VariantRecord::new(4, 3, "A", "BAD"),
        ];
        let result = VariantInfo::from_records("P1", &records, 10);
        assert!(matches!(result, Err(VariantError::InvalidRange { .. })));
    }

    #[test]
    fn test_accessors_reflect_validated_input() {
        let v = SequenceVariant::new("P1", 3, 4, "xy", "VAR_2", 10).unwrap();
        assert_eq!(v.accession(), "P1");
        assert_eq!((v.start(), v.end()), (3, 4));
        assert_eq!(v.mutated(), "XY");
        assert_eq!(v.info(), "VAR_2");
        assert_eq!(v.variant_type(), VariantType::Substitution);
        assert_eq!((v.wt_start(), v.wt_end()), (2, 4));

        let mut info = VariantInfo::new("P1");
        info.push(v.clone());
        assert_eq!(info.accession(), "P1");
        assert_eq!(info.variants(), &[v]);
    }

    #[test]
    fn test_display() {
        assert_eq!(variant(3, 3, "X").to_string(), "(3|X|VAR_1)");
        assert_eq!(variant(3, 5, "").to_string(), "(3|5||VAR_1)");
    }
}
