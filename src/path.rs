//! Path normalization, compound-label parsing, and value-key derivation.
//!
//! Every address in the tree is a normalized path: it starts with `/`, the
//! root is exactly `/` and is never right-trimmed, and no other path carries
//! a trailing `/`. [`full_key`] is the single source of truth for value-cell
//! keys; declaration and render-time lookup both go through it.

/// The root path.
pub const ROOT: &str = "/";

/// Normalize a path: prepend `/` if missing, strip any trailing `/` unless
/// the result is the root itself.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    let mut out = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    if out != ROOT {
        while out.ends_with('/') {
            out.pop();
        }
        if out.is_empty() {
            out.push('/');
        }
    }
    out
}

/// Split a compound label like `"Person/Name"` into its parent path and leaf
/// name: `("/Person", "Name")`. A bare label parents at the root:
/// `"Name"` becomes `("/", "Name")`.
///
/// Returns `None` when the label has no non-empty segment (empty string,
/// `"/"`, `"//"`, ...).
pub fn parse_label(label: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = label.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => None,
        [leaf] => Some((ROOT.to_owned(), (*leaf).to_owned())),
        [parents @ .., leaf] => {
            let parent = format!("/{}", parents.join("/"));
            Some((parent, (*leaf).to_owned()))
        }
    }
}

/// Derive the fully-qualified value key for a widget at `path` labeled
/// `label`. The root is special-cased so keys directly under it read
/// `"/Label"`, never `"//Label"`.
pub fn full_key(path: &str, label: &str) -> String {
    if path == ROOT {
        format!("/{label}")
    } else {
        format!("{path}/{label}")
    }
}

/// Non-empty segments of a normalized path, root first.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Depth of a normalized path: `/` is 0, `/A` is 1, `/A/B` is 2.
pub fn depth(path: &str) -> usize {
    segments(path).count()
}
