//! Novo's voice: the fixed reply templates and emotional acknowledgements.
//!
//! These tables are static configuration. Reply selection lives in
//! `novo_reasoning`; this module only owns the words.

use crate::config::BotConfig;
use crate::{Emotion, Topic};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Novo";
pub const DEFAULT_GREETING: &str = "Hello! I'm Novo, your AI assistant. How can I help you today?";

const SCIENCE: [&str; 3] = [
    "That's fascinating! What aspect of science interests you the most?",
    "Science is amazing! Have you read about any recent discoveries?",
    "I love discussing scientific topics! What's your take on this?",
];

const TECHNOLOGY: [&str; 3] = [
    "Technology is evolving so fast! What's your thoughts on recent innovations?",
    "That's interesting! How do you think this technology will impact the future?",
    "I'm always excited to learn about new tech! Tell me more about your experience with it.",
];

const NATURE: [&str; 3] = [
    "Nature is incredible! What aspects of the natural world fascinate you?",
    "I find nature so inspiring! Have you had any interesting encounters with wildlife?",
    "The natural world is full of wonders! What's your favorite natural phenomenon?",
];

const ART: [&str; 3] = [
    "Art is such a powerful form of expression! What draws you to this piece?",
    "I'm fascinated by different art forms! What's your favorite style?",
    "Art has such a profound impact on culture! How does this piece make you feel?",
];

const MUSIC: [&str; 3] = [
    "Music has such a unique way of touching our souls! What genres do you enjoy?",
    "I'm always excited to learn about different musical styles! What draws you to this type?",
    "The world of music is so diverse! Have you discovered any new artists lately?",
];

const PHILOSOPHY: [&str; 3] = [
    "That's a thought-provoking perspective! How did you come to this conclusion?",
    "Philosophy helps us understand life's big questions! What other philosophical ideas interest you?",
    "I find philosophical discussions fascinating! How do you think this relates to modern life?",
];

const SPACE: [&str; 3] = [
    "Space is truly the final frontier! What aspects of space exploration excite you?",
    "The cosmos is full of mysteries! What's your take on recent space discoveries?",
    "Space never fails to amaze me! What do you think about the possibility of life elsewhere?",
];

const INNOVATION: [&str; 3] = [
    "Innovation drives progress! What recent innovations have caught your attention?",
    "It's exciting to see new ideas come to life! How do you think this will change things?",
    "I'm always eager to learn about innovative solutions! What potential do you see in this?",
];

const GENERAL: [&str; 3] = [
    "That's interesting! Tell me more about your thoughts on this.",
    "I'd love to hear more about your perspective on this topic.",
    "What aspects of this interest you the most?",
];

const ACK_HAPPY: [&str; 3] = [
    "I'm glad you're excited about this!",
    "Your enthusiasm is contagious!",
    "It's wonderful to see your positive energy!",
];

const ACK_SAD: [&str; 3] = [
    "I understand this might be difficult.",
    "I appreciate you sharing your feelings.",
    "Let's explore this together.",
];

const ACK_EXCITED: [&str; 3] = [
    "I can feel your excitement!",
    "Your enthusiasm is inspiring!",
    "It's great to see you so passionate!",
];

const ACK_ANXIOUS: [&str; 3] = [
    "I understand your concerns.",
    "Let's take our time with this.",
    "I'm here to help you process this.",
];

const ACK_CURIOUS: [&str; 3] = [
    "I share your curiosity!",
    "It's great to explore this together!",
    "Let's discover more about this!",
];

/// The three candidate replies for a topic bucket.
pub fn topic_templates(topic: Topic) -> &'static [&'static str; 3] {
    match topic {
        Topic::Science => &SCIENCE,
        Topic::Technology => &TECHNOLOGY,
        Topic::Nature => &NATURE,
        Topic::Art => &ART,
        Topic::Music => &MUSIC,
        Topic::Philosophy => &PHILOSOPHY,
        Topic::Space => &SPACE,
        Topic::Innovation => &INNOVATION,
        Topic::General => &GENERAL,
    }
}

/// Opening fragments acknowledging the user's mood. Empty for neutral.
pub fn acknowledgements(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Happy => &ACK_HAPPY,
        Emotion::Sad => &ACK_SAD,
        Emotion::Excited => &ACK_EXCITED,
        Emotion::Anxious => &ACK_ANXIOUS,
        Emotion::Curious => &ACK_CURIOUS,
        Emotion::Neutral => &[],
    }
}

/// Who the bot presents itself as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub greeting: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl Persona {
    pub fn from_config(bot: &BotConfig) -> Self {
        Self {
            name: bot.name.clone(),
            greeting: bot.greeting.clone(),
        }
    }
}
