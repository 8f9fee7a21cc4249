//! Canonical name form.

/// Normalize a raw name into its canonical comparison form.
///
/// The steps run in a fixed order; audit comparability depends on the
/// order never changing:
///
/// 1. Replace every `/` and `-` with a space (splits slashed aliases
///    and hyphenated compounds into tokens).
/// 2. Uppercase, then keep only ASCII uppercase letters, ASCII digits
///    and whitespace.
/// 3. Collapse whitespace runs to a single space and trim.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`. Empty or
/// all-punctuation input normalizes to the empty string; empty
/// canonical names never match anything.
pub fn normalize(input: &str) -> String {
    let spaced = input.replace(['/', '-'], " ");
    let upper = spaced.to_uppercase();
    let filtered: String = upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
