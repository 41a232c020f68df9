//! Property-based tests for the novo_core classifiers.
//!
//! Uses proptest to check invariants over arbitrary input text rather than
//! hand-picked sentences.

use novo_core::sentiment::detect_topic_in;
use novo_core::{analyze, detect_emotion, tokenize, Emotion, Topic};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Plain text: letters, digits, punctuation and whitespace.
fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,;:!?'\"()\\-\t\n]{0,80}"
}

/// Tokens drawn from a vocabulary that hits topic names, their fragments and
/// unrelated words, so ties and near-ties show up often.
fn arb_topic_tokens() -> impl Strategy<Value = Vec<String>> {
    let vocab = prop::sample::select(vec![
        "science", "sci", "tech", "technology", "nature", "art", "artist", "music", "musical",
        "philosophy", "space", "spaceship", "innovation", "nova", "i", "a", "on", "hello", "dog",
    ]);
    prop::collection::vec(vocab.prop_map(str::to_string), 0..8)
}

// ============================================================================
// Tokenizer
// ============================================================================

proptest! {
    /// Tokenizing the rejoined tokens gives back the same tokens.
    #[test]
    fn tokenize_is_idempotent(text in arb_text()) {
        let once = tokenize(&text);
        let twice = tokenize(&once.join(" "));
        prop_assert_eq!(once, twice);
    }

    /// Tokens are never empty and hold only lowercase word characters.
    #[test]
    fn tokens_are_normalized(text in ".{0,80}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "unexpected char in token {:?}", token);
        }
    }
}

// ============================================================================
// Classifiers
// ============================================================================

proptest! {
    /// The chosen topic depends on scores only, never on the order topics
    /// are tried in.
    #[test]
    fn topic_detection_ignores_candidate_order(
        tokens in arb_topic_tokens(),
        order in Just(Topic::INTERESTS.to_vec()).prop_shuffle(),
    ) {
        let canonical = detect_topic_in(&tokens, &Topic::INTERESTS);
        let shuffled = detect_topic_in(&tokens, &order);
        prop_assert_eq!(canonical, shuffled);
    }

    /// Confidence is the default 0.5 for neutral-without-cues, otherwise a
    /// fraction of the token count.
    #[test]
    fn emotion_confidence_in_range(text in arb_text()) {
        let reading = detect_emotion(&text);
        prop_assert!(Emotion::ALL.contains(&reading.emotion));
        prop_assert!(reading.confidence > 0.0 && reading.confidence <= 1.0,
            "confidence out of range: {}", reading.confidence);
    }

    /// `analyze` agrees with the standalone classifiers.
    #[test]
    fn analyze_matches_individual_classifiers(text in arb_text()) {
        let a = analyze(&text);
        let e = detect_emotion(&text);
        prop_assert_eq!(a.emotion, e.emotion);
        prop_assert_eq!(a.confidence, e.confidence);
        prop_assert_eq!(a.topic, novo_core::detect_topic(&text));
        prop_assert_eq!(a.tokens, tokenize(&text));
    }
}

#[test]
fn happy_joy_is_fully_confident() {
    let reading = detect_emotion("happy joy");
    assert_eq!(reading.emotion, Emotion::Happy);
    assert_eq!(reading.confidence, 1.0);
}

#[test]
fn first_matching_list_claims_the_token() {
    // "how" is only a curious cue; "great" only happy. One each → tie → neutral.
    assert_eq!(detect_emotion("how great").emotion, Emotion::Neutral);
    assert_eq!(detect_emotion("how great great").emotion, Emotion::Happy);
}
