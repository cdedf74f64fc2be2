//! Anchor identifiers and relative link targets.
//!
//! `$` appears in generated .NET names but is not valid in output anchor
//! ids, so it is substituted the same way at registration and resolution.

/// Character not permitted in anchor ids.
pub const SIGIL: char = '$';

/// Literal substituted for [`SIGIL`].
pub const SIGIL_REPLACEMENT: &str = "_S_";

/// Anchor id for a fully qualified construct name.
pub fn anchor_id(full_name: &str) -> String {
    full_name.replace(SIGIL, SIGIL_REPLACEMENT)
}

/// Relative URI from one document to another, both given as `/`-separated
/// document names without suffix.
///
/// "api/io/file" → "api/net/socket" gives "../net/socket".
pub fn relative_uri(from: &str, to: &str) -> String {
    if from == to {
        return String::new();
    }
    let from_parts: Vec<&str> = from.split('/').collect();
    let to_parts: Vec<&str> = to.split('/').collect();

    // Shared leading directories; the final segment of `from` is the document
    // itself and never counts.
    let common = from_parts[..from_parts.len() - 1]
        .iter()
        .zip(&to_parts[..to_parts.len() - 1])
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_parts.len() - 1 - common;
    let mut parts: Vec<&str> = std::iter::repeat("..").take(ups).collect();
    parts.extend(&to_parts[common..]);
    parts.join("/")
}
