pub mod config;
pub mod persona;
pub mod sentiment;

pub use config::NovoConfig;
pub use sentiment::{analyze, detect_emotion, detect_topic, tokenize, Analysis, EmotionReading};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Affect detected in a single user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Neutral,
    Excited,
    Anxious,
    Curious,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Neutral,
        Emotion::Excited,
        Emotion::Anxious,
        Emotion::Curious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Excited => "excited",
            Emotion::Anxious => "anxious",
            Emotion::Curious => "curious",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject of a message: one of the interest topics, or `General` when
/// nothing (or more than one topic equally) stood out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Science,
    Technology,
    Nature,
    Art,
    Music,
    Philosophy,
    Space,
    Innovation,
    General,
}

impl Topic {
    /// The interest topics the classifier scores. `General` is the fallback
    /// and never competes.
    pub const INTERESTS: [Topic; 8] = [
        Topic::Science,
        Topic::Technology,
        Topic::Nature,
        Topic::Art,
        Topic::Music,
        Topic::Philosophy,
        Topic::Space,
        Topic::Innovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Science => "science",
            Topic::Technology => "technology",
            Topic::Nature => "nature",
            Topic::Art => "art",
            Topic::Music => "music",
            Topic::Philosophy => "philosophy",
            Topic::Space => "space",
            Topic::Innovation => "innovation",
            Topic::General => "general",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thumbs up / thumbs down on a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Negative,
}

impl From<bool> for Feedback {
    fn from(positive: bool) -> Self {
        if positive {
            Feedback::Positive
        } else {
            Feedback::Negative
        }
    }
}

/// One exchange: what the user said, what we answered, and how it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub input: String,
    pub response: String,
    pub emotion: Emotion,
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    /// New, unrated exchange stamped with the current time.
    pub fn new(input: impl Into<String>, response: impl Into<String>, emotion: Emotion, topic: Topic) -> Self {
        Self {
            input: input.into(),
            response: response.into(),
            emotion,
            topic,
            feedback: None,
            timestamp: Utc::now(),
        }
    }

    /// True only for an explicit thumbs up. Unrated counts as not positive.
    pub fn is_positive(&self) -> bool {
        self.feedback == Some(Feedback::Positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_unrated() {
        let c = Conversation::new("hi", "hello", Emotion::Neutral, Topic::General);
        assert!(c.feedback.is_none());
        assert!(!c.is_positive());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Emotion::Curious).unwrap(), "\"curious\"");
        assert_eq!(serde_json::to_string(&Topic::General).unwrap(), "\"general\"");
        assert_eq!(serde_json::to_string(&Feedback::Negative).unwrap(), "\"negative\"");
        for topic in Topic::INTERESTS {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.as_str()));
        }
    }

    #[test]
    fn test_conversation_reads_browser_blob() {
        // Layout written by the browser build: feedback optional, ISO timestamps with millis.
        let raw = r#"{"input":"I love music","response":"Music has such a unique way of touching our souls! What genres do you enjoy?","emotion":"neutral","topic":"music","timestamp":"2024-05-01T10:00:00.000Z"}"#;
        let c: Conversation = serde_json::from_str(raw).unwrap();
        assert_eq!(c.topic, Topic::Music);
        assert!(c.feedback.is_none());
        assert_eq!(c.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_unset_feedback_is_omitted() {
        let c = Conversation::new("hi", "hello", Emotion::Neutral, Topic::General);
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("feedback"));
    }

    #[test]
    fn test_feedback_from_bool() {
        assert_eq!(Feedback::from(true), Feedback::Positive);
        assert_eq!(Feedback::from(false), Feedback::Negative);
    }
}
