//! Per-tag pattern compilation

use crate::error::{ResolverError, Result};
use regex::Regex;

/// Compiled matcher for one handler's placeholder occurrences.
///
/// Recognizes `<start><tag>(<args>)<end>` with the argument body captured
/// non-greedily as group 1. Built once at registration time from the
/// resolver's delimiters and the handler's tag, immutable thereafter.
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    /// Compile the pattern for `tag` bracketed by the given delimiters.
    ///
    /// The tag is inserted as a fixed literal; any character outside
    /// `[A-Za-z0-9_]` is rejected so the derived pattern cannot be
    /// ill-formed. Delimiter validation happens once at resolver
    /// construction, not here.
    pub fn compile(tag: &str, start_delimiter: char, end_delimiter: char) -> Result<Self> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ResolverError::invalid_tag(tag));
        }

        let source = format!(
            "{}{}\\((.*?)\\){}",
            regex::escape(&start_delimiter.to_string()),
            tag,
            regex::escape(&end_delimiter.to_string()),
        );
        let regex = Regex::new(&source).map_err(|_| ResolverError::invalid_tag(tag))?;
        Ok(Self { regex })
    }

    /// The underlying compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}
