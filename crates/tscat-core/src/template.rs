//! Segment address templates: one `[i]` placeholder, replaced by a zero-padded index.

use std::fmt;

/// Placeholder token substituted with the segment index.
pub const PLACEHOLDER: &str = "[i]";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template {0:?} has no [i] placeholder")]
    MissingPlaceholder(String),
    #[error("template {template:?} has {count} [i] placeholders, expected one")]
    MultiplePlaceholders { template: String, count: usize },
}

/// A URL or path with exactly one index placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTemplate {
    raw: String,
}

impl SegmentTemplate {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        match raw.matches(PLACEHOLDER).count() {
            0 => Err(TemplateError::MissingPlaceholder(raw.to_string())),
            1 => Ok(Self {
                raw: raw.to_string(),
            }),
            count => Err(TemplateError::MultiplePlaceholders {
                template: raw.to_string(),
                count,
            }),
        }
    }

    /// Concrete address for `index`, zero-padded to at least `digits` characters.
    /// Wider indices are never truncated.
    pub fn resolve(&self, index: u64, digits: usize) -> String {
        self.raw.replace(PLACEHOLDER, &format_index(index, digits))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SegmentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

pub fn format_index(index: u64, digits: usize) -> String {
    format!("{:0width$}", index, width = digits)
}
