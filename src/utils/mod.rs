// Input helpers shared by the interactive loops
use regex::Regex;
use std::sync::OnceLock;

fn term_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        // commas, or "and" as a whole word (including at either end)
        Regex::new(r"(?i)\s*,\s*(?:and(?:\s+|$))?|(?:^|\s+)and(?:\s+|$)")
            .expect("separator pattern is valid")
    })
}

/// Split comma-separated input, trimming entries and dropping blanks
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split an ingredient query on commas or the word "and"
pub fn split_terms(input: &str) -> Vec<String> {
    term_separator()
        .split(input.trim())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
