//! Suppression of repeated label sets within one scan.

use std::collections::HashMap;

use crate::schema::MetricFieldSpec;

/// Remembers which label tuples each metric field has already emitted.
///
/// Admitted tuples of a field are kept flattened, one after another. A
/// candidate is a repeat when it appears as a contiguous run anywhere in
/// that list, which also matches runs spanning two neighbouring tuples.
#[derive(Debug, Default)]
pub struct DedupTracker {
    admitted: HashMap<&'static str, Vec<String>>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `labels` if `field` has not emitted them yet.
    pub fn admit(&mut self, field: &MetricFieldSpec, labels: &[String]) -> bool {
        let history = self.admitted.entry(field.desc.name).or_default();
        if contains_run(history, labels) {
            return false;
        }
        history.extend_from_slice(labels);
        true
    }
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CLIENT_LIST, ROUTING_TABLE, StatusSchema};

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_repeat_rejected() {
        let schema = StatusSchema::default();
        let received = &schema.section(CLIENT_LIST).unwrap().fields[0];
        let mut tracker = DedupTracker::new();

        let alice = labels(&["s", "alice", "10.8.0.6"]);
        assert!(tracker.admit(received, &alice));
        assert!(!tracker.admit(received, &alice));
        assert!(tracker.admit(received, &labels(&["s", "bob", "10.8.0.10"])));
    }

    #[test]
    fn test_fields_tracked_separately() {
        let schema = StatusSchema::default();
        let clients = schema.section(CLIENT_LIST).unwrap();
        let route = &schema.section(ROUTING_TABLE).unwrap().fields[0];
        let mut tracker = DedupTracker::new();

        let alice = labels(&["s", "alice"]);
        assert!(tracker.admit(&clients.fields[0], &alice));
        assert!(tracker.admit(&clients.fields[1], &alice));
        assert!(tracker.admit(route, &alice));
    }

    #[test]
    fn test_run_across_tuple_boundary_is_rejected() {
        let schema = StatusSchema::default();
        let received = &schema.section(CLIENT_LIST).unwrap().fields[0];
        let mut tracker = DedupTracker::new();

        assert!(tracker.admit(received, &labels(&["s", "x"])));
        assert!(tracker.admit(received, &labels(&["s", "y"])));
        // History is [s, x, s, y]; [x, s] spans both tuples.
        assert!(!tracker.admit(received, &labels(&["x", "s"])));
    }

    #[test]
    fn test_partial_overlap_admitted() {
        let schema = StatusSchema::default();
        let received = &schema.section(CLIENT_LIST).unwrap().fields[0];
        let mut tracker = DedupTracker::new();

        assert!(tracker.admit(received, &labels(&["s", "alice", "a"])));
        assert!(tracker.admit(received, &labels(&["s", "alice", "b"])));
    }
}
