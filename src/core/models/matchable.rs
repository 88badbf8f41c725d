//! Capability shared by every record kind that filters can test

use std::sync::Arc;

use regex::Regex;

/// A record whose designated text field can be tested against a pattern
pub trait Matchable {
    /// The field filters look at
    fn matched_text(&self) -> &str;

    /// Whether `pattern` is found anywhere in [`Self::matched_text`]
    fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.matched_text())
    }
}

impl<T: Matchable + ?Sized> Matchable for Arc<T> {
    fn matched_text(&self) -> &str {
        (**self).matched_text()
    }
}
