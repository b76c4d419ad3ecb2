use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Fragment, Marker};

/// Everything one invocation inserts: marker → ordered fragments.
///
/// Markers are independent of each other, so the map itself is unordered
/// (a `BTreeMap` only to keep iteration and error output deterministic).
/// The fragment list of each marker keeps caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertionRequest {
    entries: BTreeMap<Marker, Vec<Fragment>>,
}

impl InsertionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `fragment` to the list for `marker`.
    pub fn push(&mut self, marker: Marker, fragment: Fragment) {
        self.entries.entry(marker).or_default().push(fragment);
    }

    /// Append several fragments to the list for `marker`, in order.
    ///
    /// The marker is requested even when `fragments` is empty, so it must
    /// still exist in the target file.
    pub fn extend(&mut self, marker: Marker, fragments: impl IntoIterator<Item = Fragment>) {
        self.entries.entry(marker).or_default().extend(fragments);
    }

    pub fn with(mut self, marker: Marker, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.extend(marker, fragments);
        self
    }

    /// Fragments requested for the marker whose text is `line`.
    pub fn get(&self, line: &str) -> Option<(&Marker, &[Fragment])> {
        self.entries
            .get_key_value(line)
            .map(|(marker, fragments)| (marker, fragments.as_slice()))
    }

    pub fn fragments(&self, marker: &Marker) -> Option<&[Fragment]> {
        self.entries.get(marker).map(Vec::as_slice)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Marker, &[Fragment])> {
        self.entries.iter().map(|(m, f)| (m, f.as_slice()))
    }

    /// Number of requested markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of lines the request inserts.
    pub fn line_count(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .map(Fragment::line_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(s: &str) -> Marker {
        Marker::new(s).unwrap()
    }

    fn fragment(s: &str) -> Fragment {
        Fragment::new(s).unwrap()
    }

    #[test]
    fn push_keeps_caller_order() {
        let mut req = InsertionRequest::new();
        req.push(marker("// m"), fragment("b"));
        req.push(marker("// m"), fragment("a"));

        let texts: Vec<_> = req
            .fragments(&marker("// m"))
            .unwrap()
            .iter()
            .map(Fragment::as_str)
            .collect();
        assert_eq!(texts, ["b", "a"]);
        assert_eq!(req.len(), 1);
    }

    #[test]
    fn lookup_by_line_text() {
        let req = InsertionRequest::new().with(marker("// m"), [fragment("x")]);
        assert!(req.get("// m").is_some());
        assert!(req.get("// other").is_none());
    }

    #[test]
    fn line_count_spans_multiline_fragments() {
        let req = InsertionRequest::new()
            .with(marker("// a"), [fragment("one\ntwo\n"), fragment("three")])
            .with(marker("// b"), [fragment("four")]);
        assert_eq!(req.line_count(), 4);
    }

    #[test]
    fn deserializes_from_json_object() {
        let req: InsertionRequest =
            serde_json::from_str(r#"{"// a": ["x", "y"], "// b": ["z"]}"#).unwrap();
        assert_eq!(req.len(), 2);
        assert_eq!(req.fragments(&marker("// a")).unwrap().len(), 2);
    }

    #[test]
    fn json_with_empty_fragment_is_rejected() {
        let result: Result<InsertionRequest, _> = serde_json::from_str(r#"{"// a": [""]}"#);
        assert!(result.is_err());
    }
}
