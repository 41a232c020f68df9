use novo_core::persona::{acknowledgements, topic_templates};
use novo_core::{Emotion, Topic};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a template for `topic` and, unless the mood is neutral, open it with
/// a matching acknowledgement.
pub fn compose_reply<R: Rng + ?Sized>(topic: Topic, emotion: Emotion, rng: &mut R) -> String {
    let templates = topic_templates(topic);
    let template = templates.choose(rng).copied().unwrap_or(templates[0]);
    let opener = acknowledgements(emotion).choose(rng).copied().unwrap_or("");
    format!("{} {}", opener, template).trim().to_string()
}
