//! Feedback learning: LearningEngine
//!
//! Folds each finished exchange into three pieces of adaptive state:
//! per-topic understanding, per-pattern response scores, and the four
//! personality traits. Only an explicit thumbs up grows the traits; the other
//! two treat "no feedback yet" the same as a thumbs down.

use novo_core::{tokenize, Conversation, Emotion, Topic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Trait step before per-trait multipliers.
pub const BASE_GROWTH: f64 = 0.01;

const TOPIC_REWARD: f64 = 0.1;
const TOPIC_PENALTY: f64 = -0.05;
const PATTERN_REWARD: f64 = 1.0;
const PATTERN_PENALTY: f64 = -0.5;

/// Tokens of an input that make up its response pattern key.
const PATTERN_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitName {
    Curiosity,
    Empathy,
    Enthusiasm,
    Knowledge,
}

impl TraitName {
    pub const ALL: [TraitName; 4] = [
        TraitName::Curiosity,
        TraitName::Empathy,
        TraitName::Enthusiasm,
        TraitName::Knowledge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitName::Curiosity => "curiosity",
            TraitName::Empathy => "empathy",
            TraitName::Enthusiasm => "enthusiasm",
            TraitName::Knowledge => "knowledge",
        }
    }

    /// Starting value for a fresh engine.
    pub fn initial_value(&self) -> f64 {
        match self {
            TraitName::Curiosity => 0.8,
            TraitName::Empathy => 0.7,
            TraitName::Enthusiasm => 0.6,
            TraitName::Knowledge => 0.9,
        }
    }
}

impl fmt::Display for TraitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTrait {
    /// Always within [0, 1].
    pub value: f64,
    /// Sum of every growth step applied, clamping ignored.
    pub growth: f64,
}

/// Owned copy of the adaptive state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningSnapshot {
    pub personality_traits: BTreeMap<TraitName, PersonalityTrait>,
    pub topic_understanding: BTreeMap<Topic, f64>,
    pub response_patterns: BTreeMap<String, f64>,
}

/// Normalized pattern key: the first three tokens joined by single spaces.
pub fn pattern_key(input: &str) -> String {
    tokenize(input)
        .into_iter()
        .take(PATTERN_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct LearningEngine {
    personality_traits: BTreeMap<TraitName, PersonalityTrait>,
    topic_understanding: BTreeMap<Topic, f64>,
    response_patterns: BTreeMap<String, f64>,
}

impl LearningEngine {
    pub fn new() -> Self {
        let personality_traits = TraitName::ALL
            .iter()
            .map(|name| {
                (
                    *name,
                    PersonalityTrait {
                        value: name.initial_value(),
                        growth: 0.0,
                    },
                )
            })
            .collect();
        Self {
            personality_traits,
            topic_understanding: BTreeMap::new(),
            response_patterns: BTreeMap::new(),
        }
    }

    /// Apply the update rule to each conversation in order.
    pub fn learn(&mut self, conversations: &[Conversation]) {
        for conversation in conversations {
            self.learn_one(conversation);
        }
    }

    /// Apply the update rule once. Calling it again for the same exchange
    /// stacks a second update.
    pub fn learn_one(&mut self, conversation: &Conversation) {
        // Topic first: knowledge growth reads the updated score.
        self.update_topic_understanding(conversation);
        self.update_response_patterns(conversation);
        self.update_personality_traits(conversation);
    }

    fn update_topic_understanding(&mut self, conversation: &Conversation) {
        let current = self.topic_score(conversation.topic);
        let delta = if conversation.is_positive() {
            TOPIC_REWARD
        } else {
            TOPIC_PENALTY
        };
        let next = (current + delta).clamp(0.0, 1.0);
        self.topic_understanding.insert(conversation.topic, next);
        tracing::debug!(topic = %conversation.topic, from = current, to = next, "topic understanding");
    }

    fn update_response_patterns(&mut self, conversation: &Conversation) {
        let key = pattern_key(&conversation.input);
        let delta = if conversation.is_positive() {
            PATTERN_REWARD
        } else {
            PATTERN_PENALTY
        };
        *self.response_patterns.entry(key).or_insert(0.0) += delta;
    }

    fn update_personality_traits(&mut self, conversation: &Conversation) {
        if !conversation.is_positive() {
            return;
        }
        for name in TraitName::ALL {
            let growth = self.trait_growth(name, conversation);
            if let Some(t) = self.personality_traits.get_mut(&name) {
                t.value = (t.value + growth).clamp(0.0, 1.0);
                t.growth += growth;
            }
        }
    }

    fn trait_growth(&self, name: TraitName, conversation: &Conversation) -> f64 {
        match name {
            TraitName::Curiosity if conversation.input.contains('?') => BASE_GROWTH * 2.0,
            TraitName::Empathy if conversation.emotion != Emotion::Neutral => BASE_GROWTH * 1.5,
            TraitName::Enthusiasm if conversation.emotion == Emotion::Excited => BASE_GROWTH * 2.0,
            TraitName::Knowledge => self
                .topic_understanding
                .get(&conversation.topic)
                .copied()
                .filter(|score| *score > 0.0)
                .unwrap_or(BASE_GROWTH),
            _ => BASE_GROWTH,
        }
    }

    pub fn personality_trait(&self, name: TraitName) -> PersonalityTrait {
        self.personality_traits
            .get(&name)
            .copied()
            .unwrap_or(PersonalityTrait {
                value: name.initial_value(),
                growth: 0.0,
            })
    }

    /// Confidence for a topic; 0 if never seen.
    pub fn topic_score(&self, topic: Topic) -> f64 {
        self.topic_understanding.get(&topic).copied().unwrap_or(0.0)
    }

    /// Preference score for a pattern key; 0 if never seen.
    pub fn pattern_score(&self, key: &str) -> f64 {
        self.response_patterns.get(key).copied().unwrap_or(0.0)
    }

    pub fn personality_traits(&self) -> BTreeMap<TraitName, PersonalityTrait> {
        self.personality_traits.clone()
    }

    pub fn topic_understanding(&self) -> BTreeMap<Topic, f64> {
        self.topic_understanding.clone()
    }

    pub fn response_patterns(&self) -> BTreeMap<String, f64> {
        self.response_patterns.clone()
    }

    pub fn snapshot(&self) -> LearningSnapshot {
        LearningSnapshot {
            personality_traits: self.personality_traits(),
            topic_understanding: self.topic_understanding(),
            response_patterns: self.response_patterns(),
        }
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}
