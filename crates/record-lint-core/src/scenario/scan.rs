//! Source text scanning: marker stripping and comparison discovery.
//!
//! The scanner is deliberately shallow. It finds `==` and `!=` between simple
//! identifiers and leaves everything else to the semantic model: an operand
//! it cannot name stays unbound, which the engine treats as a failed type
//! resolution.

use super::ScenarioError;
use crate::syntax::{BinaryOp, Span};

/// Removes `[|` ... `|]` markers from raw source text.
///
/// Returns the clean text and the marked spans, expressed as byte ranges into
/// the clean text.
///
/// # Errors
///
/// Returns [`ScenarioError::UnbalancedMarker`] for a close without an open,
/// a nested open, or an open left unclosed at end of input.
pub fn strip_markers(raw: &str) -> Result<(String, Vec<Span>), ScenarioError> {
    let mut clean = String::with_capacity(raw.len());
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut segment_start = 0;
    let mut i = 0;

    while i < raw.len() {
        match raw.get(i..i + 2) {
            Some("[|") => {
                if open.is_some() {
                    return Err(ScenarioError::UnbalancedMarker { offset: i });
                }
                clean.push_str(&raw[segment_start..i]);
                open = Some(clean.len());
                i += 2;
                segment_start = i;
            }
            Some("|]") => {
                let Some(start) = open.take() else {
                    return Err(ScenarioError::UnbalancedMarker { offset: i });
                };
                clean.push_str(&raw[segment_start..i]);
                spans.push(Span::new(start, clean.len()));
                i += 2;
                segment_start = i;
            }
            _ => i += 1,
        }
    }

    if open.is_some() {
        return Err(ScenarioError::UnbalancedMarker { offset: raw.len() });
    }

    clean.push_str(&raw[segment_start..]);
    Ok((clean, spans))
}

/// An operand candidate found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOperand {
    /// Identifier text.
    pub text: String,
    /// Byte span of the identifier.
    pub span: Span,
}

/// A comparison found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComparison {
    /// The comparison operator.
    pub op: BinaryOp,
    /// Left operand.
    pub left: RawOperand,
    /// Right operand.
    pub right: RawOperand,
}

/// Finds identifier comparisons (`a == b`, `a != b`) in clean source text.
///
/// A comparison is kept only when both sides reduce to a simple identifier;
/// member accesses fold to their terminal identifier. Compound operators
/// (`<=`, `>=`, `===`) never match.
#[must_use]
pub fn find_comparisons(source: &str) -> Vec<RawComparison> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        let op = match (bytes[i], bytes[i + 1]) {
            (b'=', b'=') => BinaryOp::Eq,
            (b'!', b'=') => BinaryOp::Ne,
            _ => {
                i += 1;
                continue;
            }
        };

        // Part of a longer operator: `<=`, `>=`, `!==`, `===`.
        if i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>') {
            i += 1;
            continue;
        }
        if bytes.get(i + 2) == Some(&b'=') {
            i += 2;
            continue;
        }

        let left = identifier_ending_at(bytes, i);
        let right = identifier_starting_at(bytes, i + 2);
        match (left, right) {
            (Some(left), Some(right)) => {
                let next = right.span.end();
                out.push(RawComparison { op, left, right });
                i = next;
            }
            _ => i += 2,
        }
    }

    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn operand(bytes: &[u8], start: usize, end: usize) -> Option<RawOperand> {
    if start == end || bytes[start].is_ascii_digit() {
        return None;
    }
    let text = std::str::from_utf8(&bytes[start..end]).ok()?;
    Some(RawOperand {
        text: text.to_string(),
        span: Span::new(start, end),
    })
}

fn identifier_ending_at(bytes: &[u8], op_start: usize) -> Option<RawOperand> {
    let mut end = op_start;
    while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    operand(bytes, start, end)
}

fn identifier_starting_at(bytes: &[u8], op_end: usize) -> Option<RawOperand> {
    let mut start = op_end;
    while start < bytes.len() && matches!(bytes[start], b' ' | b'\t') {
        start += 1;
    }
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    operand(bytes, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- strip_markers --

    #[test]
    fn strip_passes_unmarked_text_through() {
        let (clean, spans) = strip_markers("if (a == b) { }").unwrap();
        assert_eq!(clean, "if (a == b) { }");
        assert!(spans.is_empty());
    }

    #[test]
    fn strip_records_marked_span() {
        let (clean, spans) = strip_markers("if ([|a == b|]) { }").unwrap();
        assert_eq!(clean, "if (a == b) { }");
        assert_eq!(spans, vec![Span::new(4, 10)]);
        assert_eq!(&clean[4..10], "a == b");
    }

    #[test]
    fn strip_handles_multiple_markers() {
        let (clean, spans) = strip_markers("[|a == b|]; [|c == d|];").unwrap();
        assert_eq!(clean, "a == b; c == d;");
        assert_eq!(spans, vec![Span::new(0, 6), Span::new(8, 14)]);
    }

    #[test]
    fn strip_rejects_unclosed_marker() {
        let err = strip_markers("if ([|a == b) { }").unwrap_err();
        assert!(matches!(err, ScenarioError::UnbalancedMarker { offset: 17 }));
    }

    #[test]
    fn strip_rejects_stray_close() {
        let err = strip_markers("a == b|]").unwrap_err();
        assert!(matches!(err, ScenarioError::UnbalancedMarker { offset: 6 }));
    }

    #[test]
    fn strip_rejects_nested_open() {
        let err = strip_markers("[|a [|== b|]|]").unwrap_err();
        assert!(matches!(err, ScenarioError::UnbalancedMarker { offset: 4 }));
    }

    // -- find_comparisons --

    #[test]
    fn finds_equality_between_identifiers() {
        let cmps = find_comparisons("if (a == b) { }");
        assert_eq!(cmps.len(), 1);
        assert_eq!(cmps[0].op, BinaryOp::Eq);
        assert_eq!(cmps[0].left.text, "a");
        assert_eq!(cmps[0].left.span, Span::new(4, 5));
        assert_eq!(cmps[0].right.text, "b");
        assert_eq!(cmps[0].right.span, Span::new(9, 10));
    }

    #[test]
    fn finds_inequality_as_ne() {
        let cmps = find_comparisons("a != b");
        assert_eq!(cmps.len(), 1);
        assert_eq!(cmps[0].op, BinaryOp::Ne);
    }

    #[test]
    fn skips_compound_operators() {
        assert!(find_comparisons("a <= b").is_empty());
        assert!(find_comparisons("a >= b").is_empty());
        assert!(find_comparisons("a === b").is_empty());
    }

    #[test]
    fn skips_numeric_operands() {
        assert!(find_comparisons("1 == 2").is_empty());
        assert!(find_comparisons("x == 5").is_empty());
    }

    #[test]
    fn member_access_folds_to_terminal_identifier() {
        let cmps = find_comparisons("a.Count == total");
        assert_eq!(cmps.len(), 1);
        assert_eq!(cmps[0].left.text, "Count");
        assert_eq!(cmps[0].right.text, "total");
    }

    #[test]
    fn finds_multiple_comparisons_per_line() {
        let cmps = find_comparisons("a == b && c != d");
        assert_eq!(cmps.len(), 2);
        assert_eq!(cmps[0].op, BinaryOp::Eq);
        assert_eq!(cmps[1].op, BinaryOp::Ne);
        assert_eq!(cmps[1].left.text, "c");
    }

    #[test]
    fn assignment_is_not_a_comparison() {
        assert!(find_comparisons("var a = b;").is_empty());
    }
}
