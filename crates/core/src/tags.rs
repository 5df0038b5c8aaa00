//! Comma-joined tag lists.
//!
//! Skills, preferred domains, and eligibility lists travel as ordered
//! `Vec<String>` everywhere in the API; the delimited form exists only at the
//! storage boundary.

/// Parse a comma-joined storage string into an ordered tag list.
///
/// Whitespace around entries is trimmed and empty entries are dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a tag list into the comma-joined storage form.
pub fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
