use crate::parsing::scan::Token;

/// Validates scanner output invariants.
///
/// Asserts that:
/// - All token spans are within source bounds
/// - Tokens appear in strict source order
/// - Non-empty spans tile the source: every byte is covered by exactly one token
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(source: &str, tokens: &[Token]) {
    let n = source.len();
    let mut covered = 0usize;
    for t in tokens {
        assert!(
            t.span.start <= t.span.end && t.span.end <= n,
            "token span out of bounds: {:?} (source len: {})",
            t.span,
            n
        );
        if t.span.is_empty() {
            assert!(
                t.span.start >= covered || t.span.start == n,
                "synthetic token out of order at {:?} (covered up to {covered})",
                t.span
            );
            continue;
        }
        assert_eq!(
            t.span.start, covered,
            "gap or overlap before token {:?} at line {}",
            t.kind, t.line
        );
        covered = t.span.end;
    }
    assert_eq!(covered, n, "source bytes {covered}..{n} not covered by any token");
}
