use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::store::{ProteinStore, VariantProtein};
use crate::core::protein::Protein;
use crate::matching::cache::{PeptideMatches, QueryCache};
use crate::matching::variant_engine::{match_with_variant, VariantMatch};

/// Protein store that explains peptides through annotated variants
///
/// Literal hits come from the tag index; proteins carrying variants are
/// additionally aligned with [`match_with_variant`]. Results are memoized per
/// normalized peptide for the life of the store.
#[derive(Debug)]
pub struct VariantStore {
    store: ProteinStore,

    /// Proteins that carry at least one variant
    variant_proteins: Vec<VariantProtein>,

    /// Index: accession -> index in `variant_proteins`
    accession_to_variant: HashMap<String, usize>,

    cache: QueryCache,
}

impl VariantStore {
    /// Build from an indexed store and the variant-bearing proteins it contains
    #[must_use]
    pub fn new(store: ProteinStore, variant_proteins: Vec<VariantProtein>) -> Self {
        let variant_proteins: Vec<VariantProtein> = variant_proteins
            .into_iter()
            .filter(VariantProtein::has_variants)
            .collect();
        let accession_to_variant = variant_proteins
            .iter()
            .enumerate()
            .map(|(idx, vp)| (vp.accession().to_string(), idx))
            .collect();

        Self {
            store,
            variant_proteins,
            accession_to_variant,
            cache: QueryCache::new(),
        }
    }

    /// The underlying plain store
    #[must_use]
    pub fn store(&self) -> &ProteinStore {
        &self.store
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn get(&self, accession: &str) -> Option<&Protein> {
        self.store.get(accession)
    }

    /// Variant-bearing protein by accession
    #[must_use]
    pub fn variant_protein(&self, accession: &str) -> Option<&VariantProtein> {
        self.accession_to_variant
            .get(accession)
            .map(|&idx| &self.variant_proteins[idx])
    }

    #[must_use]
    pub fn variant_proteins(&self) -> &[VariantProtein] {
        &self.variant_proteins
    }

    /// Match a peptide against one protein, see [`match_with_variant`].
    /// Proteins without variants only match literally; unknown accessions
    /// never match.
    #[must_use]
    pub fn match_with_variant(&self, accession: &str, peptide: &str) -> Option<VariantMatch> {
        if let Some(vp) = self.variant_protein(accession) {
            return match_with_variant(vp, peptide);
        }
        let protein = self.store.get(accession)?;
        match_with_variant(&VariantProtein::wild_type(protein.clone()), peptide)
    }

    /// All proteins explaining the peptide, with the variants each one needs.
    ///
    /// Peptides shorter than the tag length yield an empty map.
    #[must_use]
    pub fn find_peptide(&self, peptide: &str) -> Arc<PeptideMatches> {
        self.cache
            .get_or_compute(peptide, || self.compute_matches(peptide))
    }

    /// [`find_peptide`](Self::find_peptide) for many peptides in parallel,
    /// results in input order
    #[must_use]
    pub fn find_peptides<S>(&self, peptides: &[S]) -> Vec<Arc<PeptideMatches>>
    where
        S: AsRef<str> + Sync,
    {
        peptides
            .par_iter()
            .map(|peptide| self.find_peptide(peptide.as_ref()))
            .collect()
    }

    fn compute_matches(&self, peptide: &str) -> PeptideMatches {
        let mut result = PeptideMatches::new();
        if peptide.len() < self.store.tag_length() {
            return result;
        }

        for (accession, spans) in self.store.find_peptide(peptide) {
            let matches = spans.into_iter().map(VariantMatch::wild_type).collect();
            result.insert(accession, matches);
        }

        for vp in &self.variant_proteins {
            if result.contains_key(vp.accession()) {
                continue;
            }
            if let Some(found) = match_with_variant(vp, peptide) {
                result.insert(vp.accession().to_string(), vec![found]);
            }
        }

        result
    }

    /// Number of proteins in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::{SequenceVariant, VariantInfo};

    fn make_test_store() -> VariantStore {
        let proteins = vec![
            Protein::new("P1", "ABCDEFGHKLMN"),
            Protein::new("P2", "QRSTABCDWY"),
        ];
        let mut info = VariantInfo::new("P1");
        info.push(SequenceVariant::new("P1", 3, 3, "X", "VAR_1", 12).unwrap());
        let vp = VariantProtein::new(proteins[0].clone(), info, None).unwrap();

        VariantStore::new(ProteinStore::new(proteins, 4), vec![vp])
    }

    #[test]
    fn test_find_peptide_wild_type_hits() {
        let store = make_test_store();
        let result = store.find_peptide("ABCD");
        assert_eq!(result.len(), 2);
        assert!(result["P1"][0].is_wild_type());
        assert!(result["P2"][0].is_wild_type());
    }

    #[test]
    fn test_find_peptide_variant_hit() {
        let store = make_test_store();
        let result = store.find_peptide("ABXDEF");
        assert_eq!(result.len(), 1);
        assert_eq!(result["P1"][0].variant_ids(), vec!["VAR_1"]);
    }

    #[test]
    fn test_find_peptide_short_is_empty() {
        let store = make_test_store();
        assert!(store.find_peptide("ABX").is_empty());
    }

    #[test]
    fn test_find_peptide_cached() {
        let store = make_test_store();
        let first = store.find_peptide("ABXDEF");
        let second = store.find_peptide("ABXDEF");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cache().hits(), 1);
    }

    #[test]
    fn test_match_with_variant_by_accession() {
        let store = make_test_store();
        assert!(store.match_with_variant("P1", "ABXDE").is_some());
        assert!(store.match_with_variant("P2", "ABXDE").is_none());
        assert!(store.match_with_variant("P2", "STAB").unwrap().is_wild_type());
        assert!(store.match_with_variant("P9", "ABCD").is_none());
    }

    #[test]
    fn test_find_peptides_preserves_order() {
        let store = make_test_store();
        let results = store.find_peptides(&["ABXDEF", "QRST", "ZZZZ"][..]);
        assert_eq!(results.len(), 3);
        assert!(results[0].contains_key("P1"));
        assert!(results[1].contains_key("P2"));
        assert!(results[2].is_empty());
    }
}
