//! The user profile captured by intake before chat begins.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Youngest supported age.
pub const MIN_AGE: u8 = 4;

/// Oldest supported age.
pub const MAX_AGE: u8 = 12;

/// Age assumed when none is given.
pub const DEFAULT_AGE: u8 = 7;

/// The closed set of favorite topics offered at intake.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Art and drawing.
    Art,

    /// Math and numbers.
    Math,

    /// Science and experiments.
    Science,

    /// Reading and stories.
    Reading,

    /// Anything else.
    Other,
}

impl Topic {
    /// All topics, in menu order.
    pub const ALL: [Topic; 5] = [
        Topic::Art,
        Topic::Math,
        Topic::Science,
        Topic::Reading,
        Topic::Other,
    ];
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Art => write!(f, "art"),
            Topic::Math => write!(f, "math"),
            Topic::Science => write!(f, "science"),
            Topic::Reading => write!(f, "reading"),
            Topic::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "art" => Ok(Topic::Art),
            "math" => Ok(Topic::Math),
            "science" => Ok(Topic::Science),
            "reading" => Ok(Topic::Reading),
            "other" => Ok(Topic::Other),
            _ => Err(Error::validation(
                format!("unknown topic: {s}"),
                Some("topic".to_string()),
            )),
        }
    }
}

/// The profile collected once per session.
///
/// The name is trimmed and guaranteed non-empty; the age is clamped to
/// [`MIN_AGE`]..=[`MAX_AGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    age: u8,
    topic: Topic,
}

impl Profile {
    /// Create a new `Profile`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the trimmed name is empty.
    pub fn new(name: impl Into<String>, age: u8, topic: Topic) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::validation(
                "name must not be empty",
                Some("name".to_string()),
            ));
        }
        Ok(Self {
            name,
            age: age.clamp(MIN_AGE, MAX_AGE),
            topic,
        })
    }

    /// The child's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The child's age, within [`MIN_AGE`]..=[`MAX_AGE`].
    pub fn age(&self) -> u8 {
        self.age
    }

    /// The child's favorite topic.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_profile() {
        let profile = Profile::new("Sofia", 9, Topic::Science).unwrap();
        assert_eq!(profile.name(), "Sofia");
        assert_eq!(profile.age(), 9);
        assert_eq!(profile.topic(), Topic::Science);
    }

    #[test]
    fn name_is_trimmed() {
        let profile = Profile::new("  Sofia  ", 9, Topic::Art).unwrap();
        assert_eq!(profile.name(), "Sofia");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(Profile::new("", DEFAULT_AGE, Topic::Art).is_err());
        assert!(Profile::new("   ", DEFAULT_AGE, Topic::Art).is_err());
    }

    #[test]
    fn age_is_clamped() {
        assert_eq!(Profile::new("Leo", 2, Topic::Math).unwrap().age(), MIN_AGE);
        assert_eq!(Profile::new("Leo", 30, Topic::Math).unwrap().age(), MAX_AGE);
        assert_eq!(Profile::new("Leo", 8, Topic::Math).unwrap().age(), 8);
    }

    #[test]
    fn topic_round_trip() {
        for topic in Topic::ALL {
            let parsed: Topic = topic.to_string().parse().unwrap();
            assert_eq!(parsed, topic);
        }
    }

    #[test]
    fn topic_parse_is_case_insensitive() {
        assert_eq!("Science".parse::<Topic>().unwrap(), Topic::Science);
        assert_eq!("  READING ".parse::<Topic>().unwrap(), Topic::Reading);
        assert!("history".parse::<Topic>().is_err());
    }
}
