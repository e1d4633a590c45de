use crate::config::{bare_handle, HarvestMode};

const MAX_STEM_CHARS: usize = 80;

/// File name for a run: `{stem}.csv`, where the stem is `explicit` if given,
/// else derived from the mode and `stamp`.
///
/// Spaces and characters that are not allowed in Windows file names become `_`.
/// Only the name part is shortened, so a derived stem always ends with the stamp.
pub fn output_file_name(mode: &HarvestMode, explicit: Option<&str>, stamp: &str) -> String {
    if let Some(name) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return format!("{}.csv", sanitize_stem(name));
    }
    let base = match mode {
        HarvestMode::Profile { handle } => format!("from_{}", bare_handle(handle)),
        HarvestMode::Search(query) => query.keywords.clone(),
    };
    format!("{}_{}.csv", clean_part(&base), clean_part(stamp))
}

fn sanitize_stem(input: &str) -> String {
    let mut name = clean_part(input);
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

/// Replaces forbidden characters, collapses underscores and caps the length.
fn clean_part(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', '.'][..]);
    if cleaned.is_empty() {
        return "harvest".to_string();
    }
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let capped: String = compacted.chars().take(MAX_STEM_CHARS).collect();
    capped.trim_end_matches('_').to_string()
}

fn is_forbidden(c: char) -> bool {
    c.is_whitespace()
        || matches!(c,
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
        )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
