pub mod filename;

pub use filename::resolve_filename;

use crate::domain::config::FALLBACK_FILENAME;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>();
    let cleaned = cleaned.trim().trim_matches('.').trim();

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Longer suffixes after the last dot are treated as part of the stem.
const MAX_EXTENSION_BYTES: usize = 32;

/// `name`, then `name (1)`, `name (2)`, ... with the suffix placed before the extension.
/// Every candidate fits in [`MAX_FILENAME_BYTES`]; the stem is shortened, never the extension.
pub fn candidate_names(filename: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, ext) = match filename.rfind('.') {
        Some(idx) if idx > 0 && filename.len() - idx <= MAX_EXTENSION_BYTES => {
            filename.split_at(idx)
        }
        _ => (filename, ""),
    };

    (0u32..).map(move |n| {
        let suffix = if n == 0 {
            String::new()
        } else {
            format!(" ({})", n)
        };
        let budget = MAX_FILENAME_BYTES.saturating_sub(suffix.len() + ext.len());
        format!("{}{}{}", truncate_to_boundary(stem, budget), suffix, ext)
    })
}

fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].trim_end()
}
