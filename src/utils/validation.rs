//! Centralized validation and helper functions.

/// Maximum number of proteins allowed in a single input (DOS protection)
pub const MAX_PROTEINS: usize = 10_000_000;

/// Check if adding another protein would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new protein.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_protein_limit(count: usize) -> Option<String> {
    if count >= MAX_PROTEINS {
        Some(format!(
            "Too many proteins: adding another would exceed maximum of {MAX_PROTEINS}"
        ))
    } else {
        None
    }
}

/// Validate an accession: non-empty, no whitespace.
///
/// # Examples
///
/// ```
/// use pep_mapper::utils::validation::is_valid_accession;
///
/// assert!(is_valid_accession("P12345"));
/// assert!(is_valid_accession("sp|P12345|ALBU_HUMAN"));
/// assert!(!is_valid_accession(""));
/// assert!(!is_valid_accession("P1 2"));
/// ```
#[must_use]
pub fn is_valid_accession(accession: &str) -> bool {
    !accession.is_empty() && !accession.chars().any(char::is_whitespace)
}

/// Strip trailing stop symbols from a residue sequence.
#[must_use]
pub fn trim_stop(sequence: &str) -> &str {
    sequence.trim_end_matches('*')
}

/// Position of the first symbol that is not a residue letter, if any.
///
/// Letters of either case are accepted; a trailing `*` should be removed with
/// [`trim_stop`] first.
#[must_use]
pub fn first_invalid_residue(sequence: &str) -> Option<(usize, char)> {
    sequence
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
}
