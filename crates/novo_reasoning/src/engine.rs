//! ResponseEngine: one user turn end to end.
//!
//! Classify → reply → record → persist → learn, strictly in that order. The
//! engine owns the rolling history and the learning state; the store only
//! gets copies of the history to write out.

use crate::reply::compose_reply;
use novo_core::config::{NovoConfig, DEFAULT_HISTORY_LIMIT};
use novo_core::{analyze, Analysis, Conversation, Feedback, Topic};
use novo_memory::{ConversationStore, LearningEngine, PersonalityTrait, TraitName};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of what the bot has learned so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotStats {
    pub personality_traits: BTreeMap<TraitName, PersonalityTrait>,
    pub topic_understanding: BTreeMap<Topic, f64>,
    pub conversation_count: usize,
    pub response_patterns: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Maximum conversations kept; the oldest is evicted past this.
    pub history_limit: usize,
    /// Fixed seed for reply selection. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed: None,
        }
    }
}

impl EngineOptions {
    pub fn from_config(config: &NovoConfig) -> Self {
        Self {
            history_limit: config.memory.history_limit,
            seed: None,
        }
    }
}

pub struct ResponseEngine {
    store: ConversationStore,
    learning: LearningEngine,
    history: Vec<Conversation>,
    history_limit: usize,
    rng: Box<dyn RngCore + Send>,
}

impl ResponseEngine {
    /// Open with default options: 50-entry history, entropy-seeded replies.
    pub async fn new(store: ConversationStore) -> Self {
        Self::open(store, EngineOptions::default()).await
    }

    /// Load the stored history and rebuild learning state from it, replaying
    /// each stored conversation once, oldest first.
    pub async fn open(store: ConversationStore, options: EngineOptions) -> Self {
        let history_limit = options.history_limit.max(1);
        let rng: Box<dyn RngCore + Send> = match options.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };

        let mut history = store.load().await;
        if history.len() > history_limit {
            let excess = history.len() - history_limit;
            history.drain(..excess);
        }

        let mut learning = LearningEngine::new();
        learning.learn(&history);
        tracing::info!(conversations = history.len(), history_limit, "Response engine ready");

        Self {
            store,
            learning,
            history,
            history_limit,
            rng,
        }
    }

    /// Replace the random source used for template selection.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// Classification only, without recording anything.
    pub fn analyze(&self, text: &str) -> Analysis {
        analyze(text)
    }

    /// Answer one user message and fold it into history and learning state.
    /// Persistence problems are logged and never stop the reply.
    pub async fn generate_response(&mut self, user_input: &str) -> String {
        let analysis = analyze(user_input);
        let response = compose_reply(analysis.topic, analysis.emotion, &mut self.rng);

        let conversation = Conversation::new(user_input, response.clone(), analysis.emotion, analysis.topic);
        self.history.push(conversation.clone());
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
            tracing::debug!(evicted = excess, "History rolled over");
        }

        self.store.save(&self.history).await;
        self.learning.learn_one(&conversation);

        tracing::info!(
            emotion = %analysis.emotion,
            topic = %analysis.topic,
            history = self.history.len(),
            "Generated response"
        );
        response
    }

    /// Rate the most recent reply. Ignored when there is no history.
    ///
    /// The rated conversation goes through the learning rule again on top of
    /// the unrated pass it already got when it was created.
    pub async fn provide_feedback(&mut self, positive: bool) {
        let Some(last) = self.history.last_mut() else {
            tracing::debug!("Feedback with empty history ignored");
            return;
        };
        last.feedback = Some(Feedback::from(positive));
        let rated = last.clone();

        self.store.save(&self.history).await;
        self.learning.learn_one(&rated);
        tracing::info!(positive, topic = %rated.topic, "Feedback applied");
    }

    pub fn stats(&self) -> BotStats {
        let snapshot = self.learning.snapshot();
        BotStats {
            personality_traits: snapshot.personality_traits,
            topic_understanding: snapshot.topic_understanding,
            conversation_count: self.history.len(),
            response_patterns: snapshot.response_patterns,
        }
    }

    /// Conversations oldest first.
    pub fn history(&self) -> &[Conversation] {
        &self.history
    }

    pub fn last(&self) -> Option<&Conversation> {
        self.history.last()
    }

    pub fn learning(&self) -> &LearningEngine {
        &self.learning
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Forget everything: empty history (persisted) and fresh learning state.
    pub async fn reset(&mut self) {
        self.history.clear();
        self.learning = LearningEngine::new();
        self.store.save(&self.history).await;
        tracing::info!("Conversation history and learning state reset");
    }
}
