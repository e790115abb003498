//! Filesystem-safe identifiers derived from chapter titles.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Token used when a title sanitizes down to nothing.
const FALLBACK: &str = "chapter";

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s/\\:]+").expect("separator pattern"));
static ILLEGAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("charset pattern"));

/// Maps an arbitrary chapter title to a non-empty token usable in a filename.
///
/// Surrounding whitespace is trimmed, runs of whitespace and path separators
/// (`/`, `\`, `:`) collapse to a single `_`, and every remaining character
/// outside `[A-Za-z0-9._-]` is stripped. A title that ends up empty falls
/// back to `"chapter"`. Total and idempotent.
pub fn sanitize_title(title: &str) -> String {
    let collapsed = SEPARATORS.replace_all(title.trim(), "_");
    let cleaned = ILLEGAL.replace_all(&collapsed, "");
    if cleaned.is_empty() {
        FALLBACK.to_string()
    } else {
        cleaned.into_owned()
    }
}
