//! Path legality rules
//!
//! Stateless predicates over a single path segment (the filename without
//! its directory), parameterized by target platform. Each predicate returns
//! pass/fail plus the minimal data needed to build a conflict's cause
//! string. No mutation, no I/O.

use batchmv_core::domain::Platform;

/// Characters Windows forbids anywhere in a filename
pub const WINDOWS_ILLEGAL_CHARS: &[char] =
    &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows reserves regardless of extension
pub const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Maximum filename length on Unix, counted in bytes
pub const UNIX_MAX_FILENAME_BYTES: usize = 255;

/// Maximum full-path length on Windows, counted in UTF-16 code units
pub const WINDOWS_MAX_PATH_UNITS: usize = 260;

/// Extracts the final path segment of a proposed target
///
/// Windows targets may use either separator; Unix targets only `/`.
/// A target ending in a separator yields an empty segment.
pub fn filename_segment(platform: Platform, target: &str) -> &str {
    let idx = match platform {
        Platform::Unix => target.rfind('/'),
        Platform::Windows => target.rfind(['/', '\\']),
    };
    match idx {
        Some(i) => &target[i + 1..],
        None => target,
    }
}

/// True when the segment cannot name a file on any platform
pub fn is_empty_segment(segment: &str) -> bool {
    segment.is_empty() || segment == "." || segment == ".."
}

/// Whether a single character is illegal in a filename on the platform
pub fn is_illegal_char(platform: Platform, c: char) -> bool {
    match platform {
        Platform::Unix => c == '/' || c == '\0',
        Platform::Windows => WINDOWS_ILLEGAL_CHARS.contains(&c) || c.is_ascii_control(),
    }
}

/// Collects the distinct illegal characters in a segment, first-seen order
pub fn illegal_characters(platform: Platform, segment: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in segment.chars() {
        if is_illegal_char(platform, c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Joins offending characters for a conflict cause string, e.g. `"<,>"`
pub fn join_characters(chars: &[char]) -> String {
    let mut cause = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 {
            cause.push(',');
        }
        cause.push(*c);
    }
    cause
}

/// (Windows) true when the segment ends in a period or a space
pub fn has_trailing_forbidden(platform: Platform, segment: &str) -> bool {
    platform == Platform::Windows
        && (segment.ends_with('.') || segment.ends_with(' '))
}

/// (Windows) true when any segment of the target ends in a period or a
/// space; directory segments count, not just the filename
pub fn has_trailing_forbidden_path(platform: Platform, target: &str) -> bool {
    platform == Platform::Windows
        && target
            .split(['/', '\\'])
            .any(|segment| has_trailing_forbidden(platform, segment))
}

/// (Windows) returns the matched reserved device name, if any
///
/// The stem before the first dot is compared case-insensitively, so
/// `con.txt` and `CON` both match.
pub fn reserved_name(platform: Platform, segment: &str) -> Option<&'static str> {
    if platform != Platform::Windows {
        return None;
    }
    let stem = segment.split('.').next().unwrap_or(segment);
    WINDOWS_RESERVED_NAMES
        .iter()
        .find(|name| stem.eq_ignore_ascii_case(name))
        .copied()
}

/// Length of a string in UTF-16 code units
///
/// Code points outside the Basic Multilingual Plane count as 2 units.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Checks the platform length limit against the proposed target
///
/// Unix limits the filename segment to 255 bytes; Windows limits the entire
/// path to 260 UTF-16 code units. Returns the cause string on violation.
pub fn length_violation(
    platform: Platform,
    segment: &str,
    full_path: &str,
) -> Option<String> {
    match platform {
        Platform::Unix => {
            (segment.len() > UNIX_MAX_FILENAME_BYTES)
                .then(|| format!("{UNIX_MAX_FILENAME_BYTES} bytes"))
        }
        Platform::Windows => {
            (utf16_len(full_path) > WINDOWS_MAX_PATH_UNITS)
                .then(|| format!("{WINDOWS_MAX_PATH_UNITS} characters"))
        }
    }
}
