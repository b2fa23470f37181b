use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::residue::normalize_peptide;
use crate::matching::variant_engine::VariantMatch;

/// Matches for one peptide, keyed by protein accession
pub type PeptideMatches = BTreeMap<String, Vec<VariantMatch>>;

/// Concurrent, permanent peptide -> matches cache
///
/// Keys are normalized (uppercase, `I` folded to `L`) so I/L variants of the
/// same peptide share an entry. There is no eviction.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<String, Arc<PeptideMatches>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a peptide, if any
    #[must_use]
    pub fn get(&self, peptide: &str) -> Option<Arc<PeptideMatches>> {
        self.entries
            .get(&normalize_peptide(peptide))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached result, computing and storing it on a miss.
    ///
    /// `compute` runs outside any lock, so two threads missing on the same
    /// peptide may both compute it. The first stored value wins and is
    /// returned to both.
    pub fn get_or_compute<F>(&self, peptide: &str, compute: F) -> Arc<PeptideMatches>
    where
        F: FnOnce() -> PeptideMatches,
    {
        let key = normalize_peptide(peptide);
        if let Some(entry) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Query cache hit for {}", key);
            return Arc::clone(entry.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Query cache miss for {}", key);
        let computed = Arc::new(compute());
        let stored = self.entries.entry(key).or_insert(computed);
        Arc::clone(stored.value())
    }

    /// Number of cached peptides
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}
