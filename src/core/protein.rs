use serde::{Deserialize, Serialize};

/// A protein sequence with its accession.
///
/// Residues are stored as uppercase ASCII bytes. The sequence is fixed once the
/// protein is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protein {
    accession: String,
    sequence: Vec<u8>,
}

impl Protein {
    pub fn new(accession: impl Into<String>, sequence: impl AsRef<[u8]>) -> Self {
        Self {
            accession: accession.into(),
            sequence: sequence
                .as_ref()
                .iter()
                .map(u8::to_ascii_uppercase)
                .collect(),
        }
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        &self.accession
    }

    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Wild-type residues covering `start..start+length` plus `flanking`
    /// residues on each side, clipped to the protein bounds.
    #[must_use]
    pub fn get_wt_sequence(&self, start: usize, length: usize, flanking: usize) -> String {
        let from = start.saturating_sub(flanking).min(self.sequence.len());
        let to = start
            .saturating_add(length)
            .saturating_add(flanking)
            .min(self.sequence.len());
        String::from_utf8_lossy(&self.sequence[from..to]).into_owned()
    }
}

/// Half-open `[start, end)` span of a match in 0-based wild-type coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protein_uppercases_sequence() {
        let protein = Protein::new("P1", "mkyIlv");
        assert_eq!(protein.sequence(), b"MKYILV");
        assert_eq!(protein.len(), 6);
    }

    #[test]
    fn test_get_wt_sequence_with_flanks() {
        let protein = Protein::new("P1", "ABCDEFGHIJ");
        assert_eq!(protein.get_wt_sequence(3, 2, 0), "DE");
        assert_eq!(protein.get_wt_sequence(3, 2, 2), "BCDEFG");
    }

    #[test]
    fn test_get_wt_sequence_clipped() {
        let protein = Protein::new("P1", "ABCDEFGHIJ");
        assert_eq!(protein.get_wt_sequence(1, 2, 5), "ABCDEFGH");
        assert_eq!(protein.get_wt_sequence(8, 5, 1), "HIJ");
        assert_eq!(protein.get_wt_sequence(20, 5, 1), "");
    }

    #[test]
    fn test_match_span_len() {
        assert_eq!(MatchSpan::new(2, 7).len(), 5);
        assert!(MatchSpan::new(3, 3).is_empty());
    }
}
