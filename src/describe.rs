//! Component description extraction.
//!
//! A component's description is never stored separately. It is recomputed
//! on every read from the leading comment of its source: either a `/* ... */`
//! block or a run of `//` lines at the top of the file.
//!
//! Two variants exist and are intentionally not unified: the JSON listing
//! endpoint uses the cheaper [`description_first_line`], everything else
//! uses [`description_full`].

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Fallback description when a component has no leading comment.
pub const DEFAULT_DESCRIPTION: &str = "Custom component";

/// Extract a description from a component's full leading comment.
///
/// Handles a `/* ... */` block (empty if the closing marker is missing) or
/// consecutive `//` lines joined with single spaces. Returns an empty string
/// when the file does not start with a comment.
pub fn description_full(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("/*") {
        let desc = match rest.find("*/") {
            Some(end) => rest[..end].trim().to_string(),
            None => String::new(),
        };
        truncate(&desc)
    } else if source.starts_with("//") {
        let mut parts = Vec::new();
        for line in source.lines() {
            match line.strip_prefix("//") {
                Some(rest) => parts.push(rest.trim()),
                None => break,
            }
        }
        truncate(&parts.join(" "))
    } else {
        String::new()
    }
}

/// Cheaper variant used by the JSON listing endpoint.
///
/// Block comments behave like [`description_full`], but a `//` description
/// comes from the first line only, never a multi-line run.
pub fn description_first_line(source: &str) -> String {
    if source.starts_with("/*") {
        return description_full(source);
    }
    let first = source.lines().next().unwrap_or("");
    match first.strip_prefix("//") {
        Some(rest) => truncate(rest.trim()),
        None => String::new(),
    }
}

/// Substitute the default description for an empty extraction result.
pub fn or_default(desc: String) -> String {
    if desc.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        desc
    }
}

fn truncate(desc: &str) -> String {
    desc.chars().take(MAX_DESCRIPTION_LEN).collect()
}
