//! Property tests for the marker splice.

use markwire_core::domain::{Fragment, InsertionRequest, Marker, Placement, splice};
use proptest::prelude::*;

const MARKER: &str = "// +marker";

/// Lines that never look like the marker.
fn plain_line() -> impl Strategy<Value = String> {
    "[a-z0-9 ={}().]{0,24}"
}

fn fragment_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(|lines| lines.join("\n"))
}

/// Content with exactly one marker line somewhere in it.
fn content_with_marker() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (
        prop::collection::vec(plain_line(), 0..12),
        prop::collection::vec(plain_line(), 0..12),
    )
}

fn render(before: &[String], after: &[String], indent: &str) -> String {
    let mut lines: Vec<String> = before.to_vec();
    lines.push(format!("{indent}{MARKER}"));
    lines.extend(after.iter().cloned());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn request(fragments: &[String]) -> InsertionRequest {
    InsertionRequest::new().with(
        Marker::new(MARKER).unwrap(),
        fragments.iter().map(|f| Fragment::new(f.as_str()).unwrap()),
    )
}

fn ending() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n")]
}

/// Lines paired with their own terminators.
fn terminated_lines() -> impl Strategy<Value = Vec<(String, &'static str)>> {
    prop::collection::vec((plain_line(), ending()), 0..10)
}

fn terminated(lines: &[(String, &str)]) -> String {
    lines.iter().map(|(l, e)| format!("{l}{e}")).collect()
}

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![Just(Placement::Below), Just(Placement::Above)]
}

proptest! {
    #[test]
    fn marker_line_is_preserved(
        (before, after) in content_with_marker(),
        fragments in prop::collection::vec(fragment_text(), 0..4),
        indent in "[ \t]{0,3}",
        placement in placement(),
    ) {
        let content = render(&before, &after, &indent);
        let out = splice(&content, &request(&fragments), placement).unwrap();

        let marker_line = format!("{indent}{MARKER}");
        prop_assert_eq!(
            out.content.lines().filter(|l| *l == marker_line).count(),
            1
        );
    }

    #[test]
    fn other_lines_are_untouched_and_in_order(
        (before, after) in content_with_marker(),
        fragments in prop::collection::vec(fragment_text(), 0..4),
        placement in placement(),
    ) {
        let content = render(&before, &after, "\t");
        let out = splice(&content, &request(&fragments), placement).unwrap();
        let lines: Vec<&str> = out.content.lines().collect();

        let inserted: usize = fragments.iter().map(|f| f.lines().count()).sum();
        prop_assert_eq!(lines.len(), content.lines().count() + inserted);

        let marker_at = before.len() + match placement {
            Placement::Below => 0,
            Placement::Above => inserted,
        };
        let head: Vec<&str> = lines[..before.len()].to_vec();
        let tail_start = marker_at + 1 + match placement {
            Placement::Below => inserted,
            Placement::Above => 0,
        };
        let tail: Vec<&str> = lines[tail_start..].to_vec();

        prop_assert_eq!(head, before.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(tail, after.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn fragments_keep_request_order(
        (before, after) in content_with_marker(),
        fragments in prop::collection::vec(fragment_text(), 1..5),
        placement in placement(),
    ) {
        let content = render(&before, &after, "");
        let out = splice(&content, &request(&fragments), placement).unwrap();

        let expected: Vec<&str> = fragments.iter().flat_map(|f| f.lines()).collect();
        let lines: Vec<&str> = out.content.lines().collect();
        let start = match placement {
            Placement::Below => before.len() + 1,
            Placement::Above => before.len(),
        };
        prop_assert_eq!(&lines[start..start + expected.len()], expected.as_slice());
    }

    #[test]
    fn missing_marker_is_always_an_error(
        lines in prop::collection::vec(plain_line(), 0..20),
        fragments in prop::collection::vec(fragment_text(), 1..3),
    ) {
        let content = lines.join("\n");
        prop_assert!(splice(&content, &request(&fragments), Placement::Below).is_err());
    }

    #[test]
    fn each_line_keeps_its_own_terminator(
        before in terminated_lines(),
        after in terminated_lines(),
        marker_ending in ending(),
        fragments in prop::collection::vec(fragment_text(), 0..4),
    ) {
        let content = format!("{}{MARKER}{marker_ending}{}", terminated(&before), terminated(&after));
        let out = splice(&content, &request(&fragments), Placement::Below).unwrap();

        let inserted: String = fragments
            .iter()
            .flat_map(|f| f.lines())
            .map(|l| format!("{l}{marker_ending}"))
            .collect();
        let expected = format!(
            "{}{MARKER}{marker_ending}{inserted}{}",
            terminated(&before),
            terminated(&after)
        );
        prop_assert_eq!(out.content, expected);
    }
}
