use std::collections::BTreeMap;

use crate::catalog::index::TagAnchor;
use crate::catalog::store::ProteinStore;
use crate::core::protein::MatchSpan;
use crate::core::residue;

/// Peptides shorter than this never match in [`PeptideMatcher::contains`]
pub const MIN_CONTAINS_LENGTH: usize = 4;

/// Literal (I/L-equivalent) peptide lookup over a protein store
pub struct PeptideMatcher<'a> {
    store: &'a ProteinStore,
}

impl<'a> PeptideMatcher<'a> {
    pub fn new(store: &'a ProteinStore) -> Self {
        Self { store }
    }

    /// Whether the peptide occurs in any protein
    #[must_use]
    pub fn contains(&self, peptide: &str) -> bool {
        let peptide = peptide.to_ascii_uppercase();
        let peptide = peptide.as_bytes();
        if peptide.len() < MIN_CONTAINS_LENGTH {
            return false;
        }

        self.store
            .tag_index()
            .candidates(peptide)
            .iter()
            .any(|anchor| self.confirm(anchor, peptide).is_some())
    }

    /// All occurrences of the peptide, grouped by accession.
    /// Spans within an accession are sorted by start.
    #[must_use]
    pub fn find_peptide(&self, peptide: &str) -> BTreeMap<String, Vec<MatchSpan>> {
        let peptide = peptide.to_ascii_uppercase();
        let mut result: BTreeMap<String, Vec<MatchSpan>> = BTreeMap::new();

        for anchor in self.store.tag_index().candidates(peptide.as_bytes()) {
            if let Some(span) = self.confirm(anchor, peptide.as_bytes()) {
                if let Some(protein) = self.store.protein(anchor.protein) {
                    result
                        .entry(protein.accession().to_string())
                        .or_default()
                        .push(span);
                }
            }
        }

        for spans in result.values_mut() {
            spans.sort_unstable();
        }
        result
    }

    /// Verify a candidate anchor against the protein sequence
    fn confirm(&self, anchor: &TagAnchor, peptide: &[u8]) -> Option<MatchSpan> {
        let seq = self.store.protein(anchor.protein)?.sequence();
        let end = anchor.offset.checked_add(peptide.len())?;
        let window = seq.get(anchor.offset..end)?;
        residue::slices_equal(window, peptide).then(|| MatchSpan::new(anchor.offset, end))
    }
}

impl ProteinStore {
    /// Literal matcher over this store
    #[must_use]
    pub fn matcher(&self) -> PeptideMatcher<'_> {
        PeptideMatcher::new(self)
    }

    /// See [`PeptideMatcher::contains`]
    #[must_use]
    pub fn contains(&self, peptide: &str) -> bool {
        self.matcher().contains(peptide)
    }

    /// See [`PeptideMatcher::find_peptide`]
    #[must_use]
    pub fn find_peptide(&self, peptide: &str) -> BTreeMap<String, Vec<MatchSpan>> {
        self.matcher().find_peptide(peptide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protein::Protein;

    fn make_test_store() -> ProteinStore {
        ProteinStore::new(
            vec![
                Protein::new("P1", "MKYILVTGGVIAGL"),
                Protein::new("P2", "AAGVLAAGVL"),
            ],
            4,
        )
    }

    #[test]
    fn test_contains_literal() {
        let store = make_test_store();
        assert!(store.contains("YILVT"));
        assert!(store.contains("GGVIAGL"));
        assert!(!store.contains("YILVA"));
    }

    #[test]
    fn test_contains_il_equivalent() {
        let store = make_test_store();
        assert!(store.contains("YLIVT"));
        assert!(store.contains("yllvt"));
    }

    #[test]
    fn test_contains_rejects_short_peptides() {
        let store = make_test_store();
        assert!(!store.contains("MKY"));
        assert!(!store.contains(""));
    }

    #[test]
    fn test_contains_fails_past_sequence_end() {
        let store = make_test_store();
        assert!(!store.contains("IAGLK"));
    }

    #[test]
    fn test_find_peptide_multiple_occurrences() {
        let store = make_test_store();
        let result = store.find_peptide("AGVL");
        assert_eq!(result.len(), 1);
        assert_eq!(
            result["P2"],
            vec![MatchSpan::new(1, 5), MatchSpan::new(6, 10)]
        );
    }

    #[test]
    fn test_find_peptide_below_tag_length() {
        let store = make_test_store();
        assert!(store.find_peptide("AGV").is_empty());
    }

    #[test]
    fn test_find_peptide_across_proteins() {
        let store = ProteinStore::new(
            vec![Protein::new("P1", "XXGVLAXX"), Protein::new("P2", "GVIA")],
            3,
        );
        let result = store.find_peptide("GVLA");
        assert_eq!(result["P1"], vec![MatchSpan::new(2, 6)]);
        assert_eq!(result["P2"], vec![MatchSpan::new(0, 4)]);
    }
}
