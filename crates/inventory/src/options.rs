//! Option list manager for the dynamic `options` field.
//!
//! Rules:
//! - `add` rejects blank candidates (empty after trimming), strips commas,
//!   appends the entry as typed and then dedups the *whole* list keeping the
//!   first occurrence of every value.
//! - `remove` drops every entry equal to the given value.
//! - `edit_at` replaces one entry in place and does not dedup; a duplicate
//!   created this way survives until the next `add`.
//!
//! Comparisons are exact and case-sensitive.

use std::collections::HashSet;

/// Ordered list of option strings attached to an item draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<String>,
}

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a candidate. Returns `false` if it was rejected as blank.
    pub fn add(&mut self, candidate: &str) -> bool {
        if candidate.trim().is_empty() {
            return false;
        }
        let cleaned = strip_commas(candidate);
        if cleaned.trim().is_empty() {
            return false;
        }
        self.entries.push(cleaned);
        self.entries = dedup_ordered(std::mem::take(&mut self.entries));
        true
    }

    /// Remove all entries equal to `value`. Returns `true` if anything was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != value);
        self.entries.len() != before
    }

    /// Replace the entry at `index`. Out-of-range indices are ignored.
    pub fn edit_at(&mut self, index: usize, value: &str) -> bool {
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = strip_commas(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

impl From<Vec<String>> for OptionList {
    /// Seeds the list verbatim; stored data is not re-normalised on load.
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

/// Keep the first occurrence of every value, preserving order.
pub fn dedup_ordered<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            unique.push(item);
        }
    }
    unique
}

/// Remove every comma from an option value.
pub fn strip_commas(value: &str) -> String {
    value.replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[&str]) -> OptionList {
        OptionList::from(items.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn repeated_adds_keep_first_occurrence_order() {
        let mut options = OptionList::new();
        for candidate in ["A", "B", "A", "C", "B"] {
            assert!(options.add(candidate));
        }
        assert_eq!(options.as_slice(), ["A", "B", "C"]);
    }

    #[test]
    fn add_strips_commas() {
        let mut options = OptionList::new();
        options.add("a,b");
        assert_eq!(options.as_slice(), ["ab"]);
    }

    #[test]
    fn blank_candidates_are_rejected() {
        let mut options = list(&["A"]);
        assert!(!options.add(""));
        assert!(!options.add("   "));
        assert!(!options.add(",,"));
        assert_eq!(options.as_slice(), ["A"]);
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let mut options = OptionList::new();
        options.add(" Nuts ");
        options.add("Nuts");
        assert_eq!(options.as_slice(), [" Nuts ", "Nuts"]);
    }

    #[test]
    fn add_dedups_duplicates_that_were_seeded() {
        let mut options = list(&["A", "A", "B"]);
        options.add("C");
        assert_eq!(options.as_slice(), ["A", "B", "C"]);
    }

    #[test]
    fn remove_drops_matching_entries_only() {
        let mut options = list(&["A", "B", "C"]);
        assert!(options.remove("B"));
        assert_eq!(options.as_slice(), ["A", "C"]);
        assert!(!options.remove("Z"));
        assert_eq!(options.as_slice(), ["A", "C"]);
    }

    #[test]
    fn edit_does_not_dedup_until_next_add() {
        let mut options = list(&["A", "B"]);
        assert!(options.edit_at(1, "A"));
        assert_eq!(options.as_slice(), ["A", "A"]);
        options.add("C");
        assert_eq!(options.as_slice(), ["A", "C"]);
    }

    #[test]
    fn edit_out_of_range_is_ignored() {
        let mut options = list(&["A"]);
        assert!(!options.edit_at(3, "B"));
        assert_eq!(options.as_slice(), ["A"]);
    }

    #[test]
    fn dedup_ordered_is_stable() {
        let out = dedup_ordered(["x", "y", "x", "z", "y"].map(String::from));
        assert_eq!(out, ["x", "y", "z"]);
    }

    #[test]
    fn dedup_ordered_keeps_first_occurrences() {
        let cases: &[(&[&str], &[&str])] = &[
            (&[], &[]),
            (&["one"], &["one"]),
            (&["with space", "with space"], &["with space"]),
            (&[" a", "a", " a"], &[" a", "a"]),
            (&["d", "d", "d", "d", "d"], &["d"]),
            (&["c", "b", "a", "b", "c", "a"], &["c", "b", "a"]),
        ];
        for (input, expected) in cases {
            let out = dedup_ordered(input.iter().map(|s| s.to_string()));
            assert_eq!(out, *expected, "input {input:?}");
        }
    }
}
