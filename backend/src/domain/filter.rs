//! Regular-expression filters.
//!
//! Patterns follow the RE2 dialect implemented by the `regex` crate: no
//! backreferences and no lookaround, so matching stays linear in the input.
//! A [`FilterPattern`] can only be obtained by compiling the source, which
//! keeps uncompilable patterns out of storage.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Source text that failed to compile as an RE2-compatible pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("pattern {pattern:?} is not accepted by RE2: {reason}")]
pub struct FilterPatternError {
    pub pattern: String,
    pub reason: String,
}

/// Compiled filter pattern that remembers its source text.
///
/// # Examples
/// ```
/// use search_admin::domain::FilterPattern;
///
/// let pattern = FilterPattern::parse("^[a-zA-Z]+$").expect("valid pattern");
/// assert_eq!(pattern.as_str(), "^[a-zA-Z]+$");
/// assert!(FilterPattern::parse("+++").is_err());
/// assert!(FilterPattern::parse(r"(a)\1").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterPattern(Regex);

impl FilterPattern {
    /// Compile `source` under the RE2-compatible dialect.
    pub fn parse(source: impl AsRef<str>) -> Result<Self, FilterPatternError> {
        let source = source.as_ref();
        Regex::new(source)
            .map(Self)
            .map_err(|err| FilterPatternError {
                pattern: source.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Source text the pattern was compiled from.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for FilterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FilterPattern {}

impl fmt::Debug for FilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterPattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for FilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FilterPattern {
    type Error = FilterPatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FilterPattern> for String {
    fn from(value: FilterPattern) -> Self {
        value.as_str().to_owned()
    }
}

/// Filter awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    pub regex: FilterPattern,
}

impl FilterDraft {
    /// Attach the identifier assigned by storage.
    pub fn with_id(self, id: RecordId) -> Filter {
        Filter {
            id,
            regex: self.regex,
        }
    }
}

/// Persisted filter, serialized as `{"id","regex"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: RecordId,
    pub regex: FilterPattern,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("^[a-zA-Z]+$")]
    #[case("^[a-zA-Z0-9]+$")]
    #[case(r"^[\p{L}]+$")]
    fn accepts_re2_patterns(#[case] source: &str) {
        let pattern = FilterPattern::parse(source).expect("pattern compiles");
        assert_eq!(pattern.as_str(), source);
    }

    #[rstest]
    #[case("+++")]
    #[case(r"(a)\1")]
    #[case("(?=a)b")]
    #[case("(?<!a)b")]
    #[case("[")]
    fn rejects_patterns_outside_re2(#[case] source: &str) {
        let err = FilterPattern::parse(source).expect_err("pattern rejected");
        assert_eq!(err.pattern, source);
    }

    #[rstest]
    fn filter_serializes_wire_shape() {
        let filter = FilterDraft {
            regex: FilterPattern::parse("^a$").expect("valid"),
        }
        .with_id(RecordId::new("1"));
        assert_eq!(
            serde_json::to_value(&filter).expect("serialize"),
            json!({"id": "1", "regex": "^a$"})
        );
    }

    #[rstest]
    fn deserializing_invalid_pattern_fails() {
        let result = serde_json::from_value::<Filter>(json!({"id": "1", "regex": "+++"}));
        assert!(result.is_err());
    }
}
