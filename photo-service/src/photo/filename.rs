use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid regex"));

/// Reduces a client supplied filename to a safe ASCII basename
///
/// Path separators become word breaks, whitespace runs collapse into `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped and leading or trailing dots
/// and underscores are trimmed. Never fails; the result may be empty.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    UNSAFE_FILENAME_CHARS
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
