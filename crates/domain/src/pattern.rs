//! SQL `LIKE`-style name patterns.
//!
//! `%` matches any run of characters (including none) and `_` matches
//! exactly one character. Everything else matches itself, case-sensitively.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A case-sensitive `LIKE` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `candidate` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let pattern: Vec<char> = self.0.chars().collect();
        let text: Vec<char> = candidate.chars().collect();

        // Greedy match with single-point backtracking to the last `%`.
        let (mut p, mut t) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;
        while t < text.len() {
            match pattern.get(p) {
                Some('%') => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some('_') => {
                    p += 1;
                    t += 1;
                }
                Some(&c) if c == text[t] => {
                    p += 1;
                    t += 1;
                }
                _ => match backtrack {
                    Some((star, consumed)) => {
                        p = star + 1;
                        t = consumed + 1;
                        backtrack = Some((star, consumed + 1));
                    }
                    None => return false,
                },
            }
        }
        pattern[p..].iter().all(|&c| c == '%')
    }

    /// Translate into an `SQLite` `GLOB` expression.
    ///
    /// `GLOB` is case-sensitive, unlike `SQLite`'s default `LIKE`.
    #[must_use]
    pub fn to_glob(&self) -> String {
        let mut glob = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                '%' => glob.push('*'),
                '_' => glob.push('?'),
                '*' | '?' | '[' => {
                    glob.push('[');
                    glob.push(c);
                    glob.push(']');
                }
                other => glob.push(other),
            }
        }
        glob
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LikePattern {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
