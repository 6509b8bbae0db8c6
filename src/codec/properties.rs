//! `key=value` properties text
//!
//! One entry per line, keys sorted. Backslash, newline, carriage return and
//! tab are escaped everywhere. Keys also escape `=`, `:`, `#`, `!`, space and
//! form feed; values escape a leading space or form feed. Blank lines and
//! lines starting with `#` or `!` are ignored when reading. Only ASCII space,
//! tab and form feed count as separator padding, so other whitespace is kept.

use super::FlatProperties;
use crate::error::{Result, VersionerError};
use std::fs;
use std::path::Path;

/// Namespace for persisted configuration fields
pub const CONFIG_PREFIX: &str = "versioner.config";

/// Namespace for resolved state fields
pub const STATE_PREFIX: &str = "versioner.state";

/// Padding allowed around keys and separators
const PADDING: [char; 3] = [' ', '\t', '\x0c'];

/// Key holding the rendered version
pub const VERSION_KEY: &str = "versioner.version";

/// Re-key every entry below `prefix`
pub fn prefixed(flat: &FlatProperties, prefix: &str) -> FlatProperties {
    flat.iter()
        .map(|(key, value)| (format!("{}.{}", prefix, key), value.clone()))
        .collect()
}

/// Entries below `prefix`, with the prefix removed
pub fn strip_prefix(flat: &FlatProperties, prefix: &str) -> FlatProperties {
    let lead = format!("{}.", prefix);
    flat.iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(&lead)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest.to_string(), value.clone()))
        })
        .collect()
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' | ':' | '#' | '!' | ' ' | '\x0c' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' | '\x0c' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Split a line at its first unescaped `=` or `:`
///
/// The raw key loses trailing unescaped padding and the raw value loses
/// leading padding; escapes are left for [`unescape`].
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    let mut key_end = 0;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            key_end = i + c.len_utf8();
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = line[i + 1..].trim_start_matches(PADDING);
                return Some((&line[..key_end], value));
            }
            c if PADDING.contains(&c) => {}
            _ => key_end = i + c.len_utf8(),
        }
    }
    None
}

/// Render as properties text, one sorted entry per line
pub fn to_properties_string(flat: &FlatProperties) -> String {
    flat.iter()
        .map(|(key, value)| format!("{}={}\n", escape(key, true), escape(value, false)))
        .collect()
}

/// Parse properties text
///
/// # Returns
/// * `Ok(FlatProperties)` - Parsed entries; later duplicates win
/// * `Err(Codec)` - A line has no `=` or `:` separator
pub fn parse_properties(text: &str) -> Result<FlatProperties> {
    let mut flat = FlatProperties::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches(PADDING);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = split_entry(line).ok_or_else(|| {
            VersionerError::codec(format!(
                "line {}: expected 'key=value', found '{}'",
                number + 1,
                line
            ))
        })?;

        flat.insert(unescape(key), unescape(value));
    }

    Ok(flat)
}

pub fn read_properties_file<P: AsRef<Path>>(path: P) -> Result<FlatProperties> {
    parse_properties(&fs::read_to_string(path)?)
}

pub fn write_properties_file<P: AsRef<Path>>(path: P, flat: &FlatProperties) -> Result<()> {
    fs::write(path, to_properties_string(flat))?;
    Ok(())
}
