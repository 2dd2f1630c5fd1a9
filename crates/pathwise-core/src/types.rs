//! Shared types used across all Pathwise crates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Canonical form of a topic name: surrounding whitespace trimmed, lowercased.
///
/// Every boundary that compares topic names (graph lookup, catalog
/// indexing, request parsing) goes through this function.
pub fn normalize_topic(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized topic key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(raw: &str) -> Self {
        Self(normalize_topic(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of the topic graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: TopicId,
    /// Display label as curated (original casing).
    pub label: String,
}

impl Topic {
    pub fn new(label: &str) -> Self {
        Self {
            id: TopicId::new(label),
            label: label.trim().to_string(),
        }
    }
}

/// A closed set of categorical values that can be parsed from free text.
pub trait Categorical: Copy + Eq + fmt::Debug + 'static {
    /// Parse a value. Input is normalized by the caller.
    fn parse(normalized: &str) -> Option<Self>;

    /// Canonical lowercase name.
    fn as_str(&self) -> &'static str;

    /// Numeric encoding used as a ranker feature. Unmapped values encode to 0.
    fn encoded(&self) -> u8;
}

/// Kind of learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Article,
}

impl Categorical for ContentType {
    fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "video" => Some(ContentType::Video),
            "article" => Some(ContentType::Article),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Article => "article",
        }
    }

    fn encoded(&self) -> u8 {
        match self {
            ContentType::Video => 1,
            ContentType::Article => 2,
        }
    }
}

/// Ordinal difficulty of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Categorical for Difficulty {
    fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    fn encoded(&self) -> u8 {
        *self as u8
    }
}

/// Parse a categorical column value, `None` when unmapped.
pub fn parse_categorical<T: Categorical>(raw: &str) -> Option<T> {
    T::parse(&raw.trim().to_lowercase())
}

/// A user's constraint over one categorical field.
///
/// `Unrecognized` keeps the raw value the user sent; it matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T: Categorical> {
    Any,
    Only(T),
    Unrecognized(String),
}

impl<T: Categorical> Choice<T> {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized == "any" {
            return Choice::Any;
        }
        match T::parse(&normalized) {
            Some(value) => Choice::Only(value),
            None => Choice::Unrecognized(raw.to_string()),
        }
    }

    /// Whether a resource field value satisfies this choice. A resource whose
    /// field is unmapped (`None`) only satisfies `Any`.
    pub fn matches(&self, value: Option<T>) -> bool {
        match self {
            Choice::Any => true,
            Choice::Only(wanted) => value == Some(*wanted),
            Choice::Unrecognized(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::Any => "any",
            Choice::Only(value) => value.as_str(),
            Choice::Unrecognized(raw) => raw,
        }
    }
}

impl<T: Categorical> Default for Choice<T> {
    fn default() -> Self {
        Choice::Any
    }
}

impl<T: Categorical> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: Categorical> Deserialize<'de> for Choice<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Choice::Any,
            Value::String(raw) => Choice::parse(&raw),
            other => Choice::Unrecognized(other.to_string()),
        })
    }
}

/// `null` is unset. Anything other than a whole number becomes 0 so that it
/// matches nothing.
fn deserialize_max_length<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(whole_minutes(&n).unwrap_or(0)),
        _ => Some(0),
    })
}

fn whole_minutes(n: &serde_json::Number) -> Option<i64> {
    if let Some(minutes) = n.as_i64() {
        return Some(minutes);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Per-request learner preferences. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub preferred_type: Choice<ContentType>,
    #[serde(default)]
    pub difficulty: Choice<Difficulty>,
    /// Maximum length in minutes. Values <= 0 match nothing.
    #[serde(default, deserialize_with = "deserialize_max_length")]
    pub max_length: Option<i64>,
}

impl Preferences {
    pub fn with_type(mut self, choice: Choice<ContentType>) -> Self {
        self.preferred_type = choice;
        self
    }

    pub fn with_difficulty(mut self, choice: Choice<Difficulty>) -> Self {
        self.difficulty = choice;
        self
    }

    pub fn with_max_length(mut self, minutes: Option<i64>) -> Self {
        self.max_length = minutes;
        self
    }
}

/// One learning resource as held by the catalog.
///
/// Embeddings are unit length once the resource is inside a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub topic: TopicId,
    pub content_type: Option<ContentType>,
    pub difficulty: Option<Difficulty>,
    /// Length in minutes, always positive.
    pub length: u32,
    pub popularity: f64,
    pub rating: f64,
    pub title_embedding: Vec<f32>,
    pub description_embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_topic("  Introduction to ML \n"), "introduction to ml");
        assert_eq!(TopicId::new("OOP Concepts"), TopicId::new("oop concepts "));
    }

    #[test]
    fn topic_keeps_display_label() {
        let topic = Topic::new(" Decision Trees ");
        assert_eq!(topic.label, "Decision Trees");
        assert_eq!(topic.id.as_str(), "decision trees");
    }

    #[test]
    fn choice_parsing() {
        assert_eq!(Choice::<ContentType>::parse("ANY"), Choice::Any);
        assert_eq!(Choice::<ContentType>::parse(" Video "), Choice::Only(ContentType::Video));
        assert_eq!(
            Choice::<Difficulty>::parse("expert"),
            Choice::Unrecognized("expert".to_string())
        );
        assert_eq!(
            Choice::<ContentType>::parse("  "),
            Choice::Unrecognized("  ".to_string())
        );
    }

    #[test]
    fn unrecognized_choice_matches_nothing() {
        let choice = Choice::<Difficulty>::parse("expert");
        assert!(!choice.matches(Some(Difficulty::Easy)));
        assert!(!choice.matches(None));
    }

    #[test]
    fn unmapped_field_only_matches_any() {
        assert!(Choice::<ContentType>::Any.matches(None));
        assert!(!Choice::Only(ContentType::Video).matches(None));
    }

    #[test]
    fn difficulty_ordinals() {
        assert_eq!(Difficulty::Easy.encoded(), 1);
        assert_eq!(Difficulty::Hard.encoded(), 3);
        assert_eq!(parse_categorical::<Difficulty>("2"), Some(Difficulty::Medium));
        assert_eq!(parse_categorical::<ContentType>("podcast"), None);
    }

    #[test]
    fn preferences_deserialize_with_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"preferred_type": "video"}"#).unwrap();
        assert_eq!(prefs.preferred_type, Choice::Only(ContentType::Video));
        assert_eq!(prefs.difficulty, Choice::Any);
        assert_eq!(prefs.max_length, None);

        let prefs: Preferences =
            serde_json::from_str(r#"{"difficulty": null, "max_length": 45}"#).unwrap();
        assert_eq!(prefs.difficulty, Choice::Any);
        assert_eq!(prefs.max_length, Some(45));
    }

    #[test]
    fn mistyped_preferences_become_impossible_filters() {
        let prefs: Preferences = serde_json::from_str(
            r#"{"preferred_type": 1, "difficulty": true, "max_length": 45.5}"#,
        )
        .unwrap();
        assert_eq!(prefs.preferred_type, Choice::Unrecognized("1".to_string()));
        assert_eq!(prefs.difficulty, Choice::Unrecognized("true".to_string()));
        assert_eq!(prefs.max_length, Some(0));

        let prefs: Preferences =
            serde_json::from_str(r#"{"difficulty": "", "max_length": "ten"}"#).unwrap();
        assert!(!prefs.difficulty.matches(Some(Difficulty::Easy)));
        assert_eq!(prefs.max_length, Some(0));
    }

    #[test]
    fn whole_number_lengths_are_kept() {
        let prefs: Preferences = serde_json::from_str(r#"{"max_length": 30.0}"#).unwrap();
        assert_eq!(prefs.max_length, Some(30));

        let prefs: Preferences =
            serde_json::from_str(r#"{"max_length": 18446744073709551615}"#).unwrap();
        assert_eq!(prefs.max_length, Some(i64::MAX));
    }
}
