use std::path::{Path, PathBuf};

use regex::Regex;

use super::error::{Error, Result};

/// Optional output renaming attached to a directive.
#[derive(Debug, Clone)]
pub struct RenameRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl RenameRule {
    /// Replaces the first match of the pattern in `source`.
    pub fn apply(&self, source: &Path) -> PathBuf {
        let source = source.to_string_lossy();
        PathBuf::from(self.pattern.replace(&source, self.replacement.as_str()).into_owned())
    }
}

/// One `source[:regex:replacement]` argument from the command line.
#[derive(Debug, Clone)]
pub struct Directive {
    pub source: String,
    pub rename: Option<RenameRule>,
}

impl Directive {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut fields = split_fields(raw).into_iter();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(source), None, None, None) => Ok(Directive { source, rename: None }),
            (Some(source), Some(pattern), Some(replacement), None) => {
                let compiled = Regex::new(&pattern)
                    .map_err(|source| Error::InvalidRegex { pattern, source })?;
                Ok(Directive {
                    source,
                    rename: Some(RenameRule { pattern: compiled, replacement }),
                })
            }
            _ => Err(Error::InvalidDirective(raw.to_string())),
        }
    }

    /// Where the rendered contents of `source` end up.
    pub fn output_for(&self, source: &Path) -> PathBuf {
        match &self.rename {
            Some(rule) => rule.apply(source),
            None => source.to_path_buf(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Normal,
    Escaped,
}

/// Splits on unescaped colons. Only `\:` is unescaped, every other backslash
/// is kept as written.
fn split_fields(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = Scan::Normal;

    for c in raw.chars() {
        state = match (state, c) {
            (Scan::Escaped, ':') => {
                current.push(':');
                Scan::Normal
            }
            (Scan::Escaped, other) => {
                current.push('\\');
                current.push(other);
                Scan::Normal
            }
            (Scan::Normal, '\\') => Scan::Escaped,
            (Scan::Normal, ':') => {
                fields.push(std::mem::take(&mut current));
                Scan::Normal
            }
            (Scan::Normal, other) => {
                current.push(other);
                Scan::Normal
            }
        };
    }
    if state == Scan::Escaped {
        current.push('\\');
    }
    fields.push(current);
    fields
}
