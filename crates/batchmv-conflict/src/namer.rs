//! Safe name generation for conflict repair
//!
//! Helpers the resolver uses to rewrite an offending filename: character
//! sanitization, numeric disambiguation suffixes, and length-aware
//! truncation that always preserves the extension.

use batchmv_core::domain::Platform;

use crate::rules::{
    self, UNIX_MAX_FILENAME_BYTES, WINDOWS_MAX_PATH_UNITS,
};

/// Splits a filename into stem and extension (extension keeps its dot)
///
/// A dot at position zero does not start an extension, so dotfiles like
/// `.bashrc` are treated as all stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}

/// Formats a numeric disambiguation suffix, e.g. `" (2)"`
pub fn suffix(n: u32) -> String {
    format!(" ({n})")
}

/// Removes every platform-illegal and trailing-forbidden character
///
/// Applies, in order: strip illegal characters, trim trailing periods and
/// spaces (Windows), prefix reserved device names with `_` (Windows). If
/// sanitization empties the segment, falls back to the placeholder stem —
/// a stripped-empty name is repairable, unlike a target that was empty to
/// begin with.
pub fn sanitize(platform: Platform, segment: &str, placeholder_stem: &str) -> String {
    let mut name: String = segment
        .chars()
        .filter(|c| !rules::is_illegal_char(platform, *c))
        .collect();

    if platform == Platform::Windows {
        while name.ends_with('.') || name.ends_with(' ') {
            name.pop();
        }
        if rules::reserved_name(platform, &name).is_some() {
            name.insert(0, '_');
        }
    }

    if rules::is_empty_segment(&name) {
        name = placeholder_stem.to_string();
    }
    name
}

/// (Windows) trims trailing periods and spaces from every directory
/// segment of the target's directory part, preserving separators
pub fn sanitize_dir_part(platform: Platform, dir_part: &str) -> String {
    if platform != Platform::Windows {
        return dir_part.to_string();
    }
    let mut out = String::with_capacity(dir_part.len());
    let mut segment = String::new();
    for c in dir_part.chars() {
        if c == '/' || c == '\\' {
            while segment.ends_with('.') || segment.ends_with(' ') {
                segment.pop();
            }
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        } else {
            segment.push(c);
        }
    }
    out.push_str(&segment);
    out
}

/// Truncates to at most `max` bytes without splitting a code point
pub fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncates to at most `max` UTF-16 code units without splitting a code point
pub fn truncate_to_utf16(s: &str, max: usize) -> &str {
    let mut units = 0;
    for (i, c) in s.char_indices() {
        let width = c.len_utf16();
        if units + width > max {
            return &s[..i];
        }
        units += width;
    }
    s
}

/// Assembles `stem + suffix + ext`, truncating the stem to fit the
/// platform length limit
///
/// The suffix and extension are always preserved intact; only the stem
/// shrinks. On Unix the budget is 255 bytes for the filename; on Windows it
/// is 260 UTF-16 units for the whole path, so the resolved parent directory
/// is charged against the budget (plus one unit for the separator).
pub fn fit_filename(
    platform: Platform,
    parent: &str,
    stem: &str,
    suffix: &str,
    ext: &str,
) -> String {
    match platform {
        Platform::Unix => {
            let budget = UNIX_MAX_FILENAME_BYTES.saturating_sub(suffix.len() + ext.len());
            format!("{}{suffix}{ext}", truncate_to_bytes(stem, budget))
        }
        Platform::Windows => {
            let budget = WINDOWS_MAX_PATH_UNITS.saturating_sub(
                rules::utf16_len(parent) + 1 + rules::utf16_len(suffix) + rules::utf16_len(ext),
            );
            format!("{}{suffix}{ext}", truncate_to_utf16(stem, budget))
        }
    }
}
