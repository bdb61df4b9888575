//! Format-preserving access to `gradle.properties`-style files
//!
//! Only the value portion of a patched entry ever changes. Comments, blank
//! lines, key ordering, separator style, surrounding whitespace, and line
//! terminators all survive a parse/patch/render round trip byte-for-byte.

use crate::error::PropertiesError;

/// A key-value properties file, kept as its original lines.
#[derive(Debug, Clone)]
pub struct Properties {
    /// Lines including their original terminators
    lines: Vec<String>,
}

/// Byte span of one entry's value within its line.
struct Entry<'a> {
    key: &'a str,
    value_start: usize,
    value_end: usize,
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(String::from).collect(),
        }
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let entry = parse_entry(line)?;
            (entry.key == key).then(|| line[entry.value_start..entry.value_end].trim_end())
        })
    }

    /// Replaces the value of an existing `key`, leaving every other byte of
    /// the file untouched.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PropertiesError> {
        for line in &mut self.lines {
            let Some(entry) = parse_entry(line) else {
                continue;
            };
            if entry.key != key {
                continue;
            }
            let mut patched = String::with_capacity(line.len() + value.len());
            patched.push_str(&line[..entry.value_start]);
            patched.push_str(value);
            patched.push_str(&line[entry.value_end..]);
            *line = patched;
            return Ok(());
        }
        Err(PropertiesError::MissingKey(key.to_string()))
    }

    /// Renders the file back to text.
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

/// Parses one raw line into its key and value span. Returns `None` for
/// blank lines, comments, and lines without a separator.
fn parse_entry(line: &str) -> Option<Entry<'_>> {
    let content = line
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line);

    let indent = content.len() - content.trim_start().len();
    let body = &content[indent..];
    if body.is_empty() || body.starts_with('#') || body.starts_with('!') {
        return None;
    }

    let sep = body.find(['=', ':'])?;
    let key = body[..sep].trim_end();
    if key.is_empty() {
        return None;
    }

    let after = &body[sep + 1..];
    let pad = after.len() - after.trim_start().len();

    Some(Entry {
        key,
        value_start: indent + sep + 1 + pad,
        value_end: content.len(),
    })
}
