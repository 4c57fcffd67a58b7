//! Lazily compiled URL patterns.

use std::sync::OnceLock;

use regex::Regex;

/// A named regex compiled on first use
pub struct NamedPattern {
    /// Name used in logs and tests
    pub name: &'static str,
    source: &'static str,
    compiled: OnceLock<Option<Regex>>,
}

impl NamedPattern {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            compiled: OnceLock::new(),
        }
    }

    /// The compiled regex; `None` only if the source is malformed
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| match Regex::new(self.source) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::error!(pattern = self.name, "Invalid URL pattern: {}", e);
                    None
                }
            })
            .as_ref()
    }

    /// First capture group of the first match
    pub fn capture<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.regex()?
            .captures(input)?
            .get(1)
            .map(|m| m.as_str())
    }

    /// Whether the pattern matches anywhere in `input`
    pub fn is_match(&self, input: &str) -> bool {
        self.regex().is_some_and(|re| re.is_match(input))
    }
}
