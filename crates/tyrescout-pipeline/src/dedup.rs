//! First-seen-wins deduplication keyed on `external_id`.

use std::collections::HashSet;

use tyrescout_core::BusinessRecord;

/// Remembers which identifiers have been admitted.
///
/// The collect stage uses one instance per search area for term-level
/// dedup and [`dedup_records`] for the global pass; both go through
/// [`Deduplicator::admit`].
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `external_id` is offered. Surrounding
    /// whitespace is not part of the key.
    pub fn admit(&mut self, external_id: &str) -> bool {
        let key = external_id.trim();
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_owned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keeps the first record for each `external_id`, preserving input order.
#[must_use]
pub fn dedup_records<I>(records: I) -> Vec<BusinessRecord>
where
    I: IntoIterator<Item = BusinessRecord>,
{
    let mut dedup = Deduplicator::new();
    records
        .into_iter()
        .filter(|r| dedup.admit(&r.external_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, term: &str) -> BusinessRecord {
        let mut r = BusinessRecord::new(id, format!("Business {id}"));
        r.source_search_term = term.to_string();
        r
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedup_records(Vec::new()).is_empty());
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let out = dedup_records(vec![
            hit("B", "first"),
            hit("A", "first"),
            hit("B", "second"),
            hit("C", "second"),
            hit("A", "third"),
        ]);
        let ids: Vec<&str> = out.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, ["B", "A", "C"]);
        assert_eq!(out[0].source_search_term, "first");
        assert_eq!(out[1].source_search_term, "first");
    }

    #[test]
    fn output_size_equals_distinct_ids() {
        let input: Vec<_> = ["A", "B", "A", "C", "B", "D", "A"]
            .iter()
            .map(|id| hit(id, "t"))
            .collect();
        let distinct: HashSet<&str> = input.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(dedup_records(input.clone()).len(), distinct.len());
    }

    #[test]
    fn admit_is_a_set_membership_test() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.is_empty());
        assert!(dedup.admit("A"));
        assert!(!dedup.admit("A"));
        assert!(dedup.admit("B"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn ids_differing_only_by_whitespace_are_one_key() {
        let out = dedup_records(vec![hit("A", "first"), hit(" A ", "second")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_search_term, "first");
    }
}
