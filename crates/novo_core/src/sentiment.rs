//! Keyword-based emotion and topic classification.
//!
//! Both classifiers work on the same normalized token stream and only test
//! keyword membership. Results are deterministic for a given string.

use crate::{Emotion, Topic};
use serde::Serialize;

const HAPPY: &[&str] = &["happy", "joy", "great", "excellent", "amazing"];
const SAD: &[&str] = &["sad", "unhappy", "disappointed", "sorry"];
const CURIOUS: &[&str] = &["curious", "interested", "wonder", "how", "why"];
const EXCITED: &[&str] = &["excited", "wow", "awesome", "fantastic"];
const ANXIOUS: &[&str] = &["worried", "anxious", "nervous", "concerned"];

/// Cue lists in priority order. A token counts toward the first list it
/// appears in and no other.
const EMOTION_CUES: [(Emotion, &[&str]); 5] = [
    (Emotion::Happy, HAPPY),
    (Emotion::Sad, SAD),
    (Emotion::Curious, CURIOUS),
    (Emotion::Excited, EXCITED),
    (Emotion::Anxious, ANXIOUS),
];

/// Confidence reported when no cue matched at all.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Lower-case, drop everything that is not an ASCII word character or
/// whitespace, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionReading {
    pub emotion: Emotion,
    /// Winning cue count over token count; 0.5 when nothing matched.
    pub confidence: f64,
}

/// Classify the emotional tone of `text`.
pub fn detect_emotion(text: &str) -> EmotionReading {
    emotion_from_tokens(&tokenize(text))
}

fn emotion_from_tokens(tokens: &[String]) -> EmotionReading {
    let mut scores = [0u32; EMOTION_CUES.len()];
    for token in tokens {
        if let Some(idx) = EMOTION_CUES
            .iter()
            .position(|(_, cues)| cues.contains(&token.as_str()))
        {
            scores[idx] += 1;
        }
    }

    let max = scores.iter().copied().max().unwrap_or(0);
    let leaders = scores.iter().filter(|&&s| s == max).count();
    let emotion = if max > 0 && leaders == 1 {
        scores
            .iter()
            .position(|&s| s == max)
            .map(|idx| EMOTION_CUES[idx].0)
            .unwrap_or(Emotion::Neutral)
    } else {
        Emotion::Neutral
    };

    let confidence = if max > 0 {
        max as f64 / tokens.len() as f64
    } else {
        DEFAULT_CONFIDENCE
    };

    EmotionReading { emotion, confidence }
}

/// Classify the subject of `text` against the interest topics.
pub fn detect_topic(text: &str) -> Topic {
    detect_topic_in(&tokenize(text), &Topic::INTERESTS)
}

/// Score `candidates` against already-normalized tokens. A token counts for a
/// topic when either string contains the other. The single best-scoring
/// candidate wins; ties or no hits give `Topic::General`.
pub fn detect_topic_in(tokens: &[String], candidates: &[Topic]) -> Topic {
    let mut best = Topic::General;
    let mut best_score = 0usize;
    let mut tied = false;

    for &topic in candidates {
        let name = topic.as_str();
        let score = tokens
            .iter()
            .filter(|t| t.contains(name) || name.contains(t.as_str()))
            .count();
        if score > best_score {
            best = topic;
            best_score = score;
            tied = false;
        } else if score == best_score && score > 0 {
            tied = true;
        }
    }

    if tied {
        Topic::General
    } else {
        best
    }
}

/// Full classification of one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub tokens: Vec<String>,
    pub emotion: Emotion,
    pub confidence: f64,
    pub topic: Topic,
}

pub fn analyze(text: &str) -> Analysis {
    let tokens = tokenize(text);
    let reading = emotion_from_tokens(&tokens);
    let topic = detect_topic_in(&tokens, &Topic::INTERESTS);
    tracing::debug!(
        emotion = %reading.emotion,
        confidence = reading.confidence,
        topic = %topic,
        tokens = tokens.len(),
        "classified input"
    );
    Analysis {
        tokens,
        emotion: reading.emotion,
        confidence: reading.confidence,
        topic,
    }
}
