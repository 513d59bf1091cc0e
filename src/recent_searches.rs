use std::collections::VecDeque;
use serde::Serialize;

/// Number of search terms remembered
pub const CAPACITY: usize = 10;

/// Bounded list of past search terms, most recent first.
///
/// Terms are compared case-insensitively. Searching again for a known term moves it to the
/// front, keeping the latest spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecentSearches {
    terms: VecDeque<String>,
}

impl RecentSearches {
    /// Builds the list from stored terms, most recent first
    ///
    /// # Arguments
    ///
    /// * 'terms' - stored terms, most recent first
    pub fn from_terms<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let mut recent = RecentSearches::default();
        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.reverse();
        for t in terms {
            recent.push(&t);
        }

        recent
    }

    /// Records a search term
    ///
    /// Returns false if the term was blank and therefore ignored.
    ///
    /// # Arguments
    ///
    /// * 'term' - the term as entered by the user
    pub fn push(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        let key = term.to_lowercase();
        self.terms.retain(|t| t.to_lowercase() != key);
        self.terms.push_front(term.to_string());
        self.terms.truncate(CAPACITY);

        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut recent = RecentSearches::default();
        recent.push("Amman");
        recent.push("Paris");
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["Paris", "Amman"]);
    }

    #[test]
    fn test_case_insensitive_dedup_moves_to_front() {
        let mut recent = RecentSearches::default();
        recent.push("amman");
        recent.push("Paris");
        recent.push("AMMAN ");
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["AMMAN", "Paris"]);
    }

    #[test]
    fn test_bounded() {
        let mut recent = RecentSearches::default();
        for i in 0..15 {
            recent.push(&format!("city{}", i));
        }
        assert_eq!(recent.iter().count(), CAPACITY);
        assert_eq!(recent.iter().next(), Some("city14"));
        assert_eq!(recent.iter().last(), Some("city5"));
    }

    #[test]
    fn test_blank_ignored() {
        let mut recent = RecentSearches::default();
        assert!(!recent.push("   "));
        assert!(recent.is_empty());
    }

    #[test]
    fn test_from_terms_keeps_order() {
        let recent = RecentSearches::from_terms(vec!["Oslo".to_string(), "oslo".to_string(), "Rome".to_string()]);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["Oslo", "Rome"]);
    }

    #[test]
    fn test_clear() {
        let mut recent = RecentSearches::from_terms(vec!["Oslo".to_string()]);
        recent.clear();
        assert!(recent.is_empty());
        assert_eq!(serde_json::to_string(&recent).unwrap(), "[]");
    }
}
