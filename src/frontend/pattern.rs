//! Anchored pattern matching over the `regex` crate.
//!
//! Every pattern is matched against the start of the remaining input
//! only, and reports how many bytes of that prefix it consumes.

use crate::utils::errors::PatternError;
use regex::Regex;
use std::fmt;

/// A compiled pattern anchored at the start of the text it is applied to.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`, anchoring it to the start of the input.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let anchored = format!("^(?:{})", source);
        let regex = Regex::new(&anchored).map_err(|e| PatternError {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Length in bytes of the matched prefix, or `None` if the pattern
    /// does not match at the start of `text`.
    pub fn find_prefix(&self, text: &str) -> Option<usize> {
        self.regex.find(text).map(|m| m.end())
    }

    /// Length in bytes of the matched prefix; zero when nothing matches.
    pub fn match_len(&self, text: &str) -> usize {
        self.find_prefix(text).unwrap_or(0)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}
