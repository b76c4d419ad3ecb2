//! Single-pass marker splice.
//!
//! The target content is scanned once, top to bottom, into a fresh line
//! buffer. Marker lines are copied through untouched and their fragments are
//! emitted next to them; every other line is copied as-is. Nothing is
//! returned unless every requested marker matched exactly one line, so a
//! caller that only persists the returned content can never write a partial
//! result.
//!
//! Every original line keeps its own terminator (`\n` or `\r\n`), and the
//! presence of a final newline is carried over from the input. Inserted
//! lines use the terminator of their marker line.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    entities::InsertionRequest,
    error::DomainError,
    value_objects::{Fragment, Marker, Placement},
};

/// Where one requested marker was found and how much went in next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerHit {
    pub marker: Marker,
    /// 1-based line of the marker in the original content.
    pub line: usize,
    /// Lines inserted for this marker.
    pub inserted: usize,
}

/// The result of splicing a request into some content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub content: String,
    /// One entry per requested marker, ordered by line.
    pub hits: Vec<MarkerHit>,
}

impl Splice {
    /// Total number of inserted lines.
    pub fn inserted_lines(&self) -> usize {
        self.hits.iter().map(|h| h.inserted).sum()
    }
}

/// Every line a marker occupies in some content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerLocation {
    pub marker: Marker,
    /// 1-based line numbers.
    pub lines: Vec<usize>,
}

impl MarkerLocation {
    pub fn is_missing(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_unique(&self) -> bool {
        self.lines.len() == 1
    }
}

/// Splice `request` into `content`.
///
/// # Errors
///
/// - [`DomainError::MarkerInFragment`] when a fragment line would itself
///   match a requested marker.
/// - [`DomainError::MarkerNotFound`] naming every requested marker with no
///   matching line.
/// - [`DomainError::DuplicateMarker`] when a requested marker matches more
///   than one line.
pub fn splice(
    content: &str,
    request: &InsertionRequest,
    placement: Placement,
) -> Result<Splice, DomainError> {
    reject_marker_fragments(request)?;

    let fallback = first_line_ending(content);
    let mut output = String::with_capacity(content.len() + request.line_count() * 16);
    let mut seen: BTreeMap<&Marker, Vec<usize>> = BTreeMap::new();

    for (index, raw) in content.split_inclusive('\n').enumerate() {
        let (line, ending) = split_ending(raw);
        let Some((marker, fragments)) = request.get(line.trim()) else {
            output.push_str(raw);
            continue;
        };

        seen.entry(marker).or_default().push(index + 1);

        // Inserted lines take the marker line's terminator. A marker on an
        // unterminated last line borrows the file's first terminator.
        let joint = if ending.is_empty() { fallback } else { ending };
        let inserted = fragments.iter().flat_map(Fragment::lines);
        let block: Vec<&str> = match placement {
            Placement::Below => std::iter::once(line).chain(inserted).collect(),
            Placement::Above => inserted.chain(std::iter::once(line)).collect(),
        };
        output.push_str(&block.join(joint));
        output.push_str(ending);
    }

    let missing: Vec<String> = request
        .markers()
        .filter(|m| !seen.contains_key(m))
        .map(|m| m.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MarkerNotFound { markers: missing });
    }

    if let Some((marker, lines)) = seen.iter().find(|(_, lines)| lines.len() > 1) {
        return Err(DomainError::DuplicateMarker {
            marker: marker.to_string(),
            lines: lines.clone(),
        });
    }

    let mut hits: Vec<MarkerHit> = seen
        .into_iter()
        .map(|(marker, lines)| MarkerHit {
            marker: marker.clone(),
            line: lines[0],
            inserted: request
                .fragments(marker)
                .map(|f| f.iter().map(Fragment::line_count).sum::<usize>())
                .unwrap_or(0),
        })
        .collect();
    hits.sort_by_key(|h| h.line);

    Ok(Splice {
        content: output,
        hits,
    })
}

/// Find every line each of `markers` occupies in `content`.
pub fn locate(content: &str, markers: &[Marker]) -> Vec<MarkerLocation> {
    let mut locations: Vec<MarkerLocation> = markers
        .iter()
        .map(|m| MarkerLocation {
            marker: m.clone(),
            lines: Vec::new(),
        })
        .collect();

    for (index, line) in content.lines().enumerate() {
        for location in locations.iter_mut().filter(|l| l.marker.matches(line)) {
            location.lines.push(index + 1);
        }
    }

    locations
}

/// A fragment line equal to a requested marker would leave that marker
/// duplicated after the rewrite.
fn reject_marker_fragments(request: &InsertionRequest) -> Result<(), DomainError> {
    for (_, fragments) in request.iter() {
        for line in fragments.iter().flat_map(Fragment::lines) {
            if let Some((marker, _)) = request.get(line.trim()) {
                return Err(DomainError::MarkerInFragment {
                    marker: marker.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Split a line from `split_inclusive` into its text and terminator.
fn split_ending(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}

fn first_line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(i) if content[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
