use std::collections::HashMap;

use crate::core::protein::Protein;
use crate::core::residue::tag_hash;

/// One occurrence of a tag: a protein (by position in the store) and a start offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagAnchor {
    /// Index of the protein in the store's protein list
    pub protein: usize,

    /// 0-based start offset of the tag in the protein
    pub offset: usize,
}

/// Hashed k-mer index over a protein collection
///
/// Maps the hash of every `tag_length` window to the anchors where it occurs.
/// The hash is lossy, so anchors are only candidates and must be verified
/// against the protein sequence.
#[derive(Debug, Clone)]
pub struct TagIndex {
    tag_length: usize,
    anchors: HashMap<u64, Vec<TagAnchor>>,
    anchor_count: usize,
}

impl TagIndex {
    /// Index every window of `tag_length` residues in `proteins`.
    /// Proteins shorter than the tag contribute no anchors.
    #[must_use]
    pub fn build(proteins: &[Protein], tag_length: usize) -> Self {
        let mut anchors: HashMap<u64, Vec<TagAnchor>> = HashMap::new();
        let mut anchor_count = 0;

        for (protein_idx, protein) in proteins.iter().enumerate() {
            let seq = protein.sequence();
            if tag_length == 0 || seq.len() < tag_length {
                continue;
            }
            for offset in 0..=seq.len() - tag_length {
                let hash = tag_hash(seq, offset, offset + tag_length);
                anchors.entry(hash).or_default().push(TagAnchor {
                    protein: protein_idx,
                    offset,
                });
                anchor_count += 1;
            }
        }

        Self {
            tag_length,
            anchors,
            anchor_count,
        }
    }

    #[must_use]
    pub fn tag_length(&self) -> usize {
        self.tag_length
    }

    /// Candidate anchors for a peptide, keyed by the hash of its first
    /// `tag_length` residues. Peptides shorter than the tag have none.
    #[must_use]
    pub fn candidates(&self, peptide: &[u8]) -> &[TagAnchor] {
        if peptide.len() < self.tag_length {
            return &[];
        }
        let hash = tag_hash(peptide, 0, self.tag_length);
        self.anchors.get(&hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct tag hashes
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Total number of anchors across all hashes
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchor_count
    }
}
