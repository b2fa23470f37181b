//! Variant-aware peptide alignment.
//!
//! A peptide is threaded through a protein's wild-type sequence starting at
//! some offset. Wherever a variant starts, the walk may take a detour through
//! the variant's replacement and rejoin the wild type after the replaced
//! range. The search is depth-first and greedy: at each coordinate the wild
//! type is tried before the variants, variants are tried in declaration
//! order, and the first complete alignment wins. It is deterministic but not
//! guaranteed to use the fewest variants.

use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::store::VariantProtein;
use crate::core::protein::MatchSpan;
use crate::core::residue;
use crate::core::variant::{SequenceVariant, VariantStep};

/// A successful variant-aware match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariantMatch {
    /// Aligned span in 0-based wild-type coordinates
    pub span: MatchSpan,

    /// Variants used, ordered by position; empty for a wild-type match
    pub variants: Vec<SequenceVariant>,
}

impl VariantMatch {
    #[must_use]
    pub fn wild_type(span: MatchSpan) -> Self {
        Self {
            span,
            variants: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_wild_type(&self) -> bool {
        self.variants.is_empty()
    }

    /// Provenance identifiers of the variants used
    #[must_use]
    pub fn variant_ids(&self) -> Vec<&str> {
        self.variants.iter().map(SequenceVariant::info).collect()
    }
}

/// Match a peptide against a protein and its variants.
///
/// Returns `None` if no alignment exists, or a [`VariantMatch`] whose variant
/// list is empty when the wild-type sequence alone contains the peptide.
#[must_use]
pub fn match_with_variant(protein: &VariantProtein, peptide: &str) -> Option<VariantMatch> {
    let peptide = peptide.to_ascii_uppercase();
    let peptide = peptide.as_bytes();
    if peptide.is_empty() {
        return None;
    }

    let seq = protein.protein().sequence();
    if let Some(start) = residue::find_folded(seq, peptide) {
        return Some(VariantMatch::wild_type(MatchSpan::new(
            start,
            start + peptide.len(),
        )));
    }
    if !protein.has_variants() {
        return None;
    }

    let mut aligner = Aligner {
        protein,
        peptide,
        failed: HashSet::new(),
    };
    let last_start = seq.len().max(protein.index_len());
    (0..last_start)
        .filter(|&i| {
            protein.has_variants_at(i)
                || seq
                    .get(i)
                    .is_some_and(|&r| residue::residues_equal(r, peptide[0]))
        })
        .find_map(|start| {
            aligner.align(start, 0).map(|(end, variants)| VariantMatch {
                span: MatchSpan::new(start, end.min(seq.len()).max(start)),
                variants: variants.into_iter().cloned().collect(),
            })
        })
}

impl VariantProtein {
    /// See [`match_with_variant`]
    #[must_use]
    pub fn match_peptide(&self, peptide: &str) -> Option<VariantMatch> {
        match_with_variant(self, peptide)
    }
}

struct Aligner<'a> {
    protein: &'a VariantProtein,
    peptide: &'a [u8],

    /// `(protein_pos, peptide_pos)` states already known not to align
    failed: HashSet<(usize, usize)>,
}

impl<'a> Aligner<'a> {
    /// Align `peptide[peptide_pos..]` starting at wild-type `protein_pos`.
    /// Returns the wild-type end coordinate and the variants used.
    fn align(
        &mut self,
        protein_pos: usize,
        peptide_pos: usize,
    ) -> Option<(usize, Vec<&'a SequenceVariant>)> {
        if self.failed.contains(&(protein_pos, peptide_pos)) {
            return None;
        }
        let found = self.walk(protein_pos, peptide_pos);
        if found.is_none() {
            self.failed.insert((protein_pos, peptide_pos));
        }
        found
    }

    /// Advance in lock step until the peptide ends, a residue disagrees or a
    /// coordinate with variants is reached
    fn walk(
        &mut self,
        mut protein_pos: usize,
        mut peptide_pos: usize,
    ) -> Option<(usize, Vec<&'a SequenceVariant>)> {
        let protein = self.protein;
        let peptide = self.peptide;
        let seq = protein.protein().sequence();

        loop {
            if peptide_pos == peptide.len() {
                return Some((protein_pos, Vec::new()));
            }
            if protein.has_variants_at(protein_pos) {
                return self.branch(protein_pos, peptide_pos);
            }
            match seq.get(protein_pos) {
                Some(&r) if residue::residues_equal(r, peptide[peptide_pos]) => {
                    protein_pos += 1;
                    peptide_pos += 1;
                }
                _ => return None,
            }
        }
    }

    /// Resolve a coordinate that carries variants: wild type first, then each
    /// variant in declaration order
    fn branch(
        &mut self,
        protein_pos: usize,
        peptide_pos: usize,
    ) -> Option<(usize, Vec<&'a SequenceVariant>)> {
        let protein = self.protein;
        let peptide = self.peptide;

        let wild_type_agrees = protein
            .protein()
            .sequence()
            .get(protein_pos)
            .is_some_and(|&r| residue::residues_equal(r, peptide[peptide_pos]));
        if wild_type_agrees {
            if let Some(found) = self.align(protein_pos + 1, peptide_pos + 1) {
                return Some(found);
            }
        }

        for variant in protein.variants_at(protein_pos) {
            match variant.try_match(peptide, peptide_pos) {
                Some(VariantStep::Complete) => {
                    return Some((variant.wt_end(), vec![variant]));
                }
                // An alignment must open on a peptide residue, not on a
                // variant that consumes none
                Some(VariantStep::Resume { peptide_pos: 0, .. }) => {}
                Some(VariantStep::Resume {
                    peptide_pos: next_peptide,
                    protein_pos: next_protein,
                }) => {
                    if let Some((end, mut rest)) = self.align(next_protein, next_peptide) {
                        rest.insert(0, variant);
                        return Some((end, rest));
                    }
                }
                None => {}
            }
        }

        None
    }
}
