//! Terminal commands and their plain-text rendering.

use chrono::Local;
use novo_core::{Analysis, Conversation, Feedback};
use novo_reasoning::BotStats;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub const HELP: &str = "\
Commands:
  /good, /up        rate the last reply as helpful
  /bad, /down       rate the last reply as unhelpful
  /stats [json]     show what has been learned
  /history          list remembered conversations
  /why <text>       show how a message would be classified
  /reset            forget all conversations and learning
  /help             this text
  /quit             leave
Anything else is sent as a message.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Say(String),
    Feedback(bool),
    Stats { json: bool },
    History,
    Why(String),
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Command::Quit;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Say(trimmed.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "good" | "up" | "+" => Command::Feedback(true),
        "bad" | "down" | "-" => Command::Feedback(false),
        "stats" => Command::Stats { json: arg.eq_ignore_ascii_case("json") },
        "history" => Command::History,
        "why" => Command::Why(arg.to_string()),
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_stats(stats: &BotStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Learning Stats");

    let _ = writeln!(out, "Personality Traits");
    for (name, t) in &stats.personality_traits {
        let _ = writeln!(
            out,
            "  {:<11} {} {:.2} (growth {:+.3})",
            name.as_str(),
            bar(t.value),
            t.value,
            t.growth
        );
    }

    let _ = writeln!(out, "Topic Understanding");
    if stats.topic_understanding.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for (topic, score) in &stats.topic_understanding {
        let _ = writeln!(out, "  {:<11} {} {:.2}", topic.as_str(), bar(*score), score);
    }

    let _ = writeln!(out, "Response Patterns");
    if stats.response_patterns.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for (pattern, score) in &stats.response_patterns {
        let _ = writeln!(out, "  {:<24} {:+.2}", format!("\"{}\"", pattern), score);
    }

    let _ = writeln!(out, "Total Conversations: {}", stats.conversation_count);
    out
}

pub fn render_history(history: &[Conversation], bot_name: &str) -> String {
    if history.is_empty() {
        return "No conversations yet.\n".to_string();
    }
    let mut out = String::new();
    for c in history {
        let rating = match c.feedback {
            Some(Feedback::Positive) => " [+]",
            Some(Feedback::Negative) => " [-]",
            None => "",
        };
        let _ = writeln!(
            out,
            "[{}] you: {}",
            c.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            c.input
        );
        let _ = writeln!(out, "  {}: {} ({}, {}){}", bot_name, c.response, c.emotion, c.topic, rating);
    }
    out
}

pub fn render_analysis(analysis: &Analysis) -> String {
    format!(
        "tokens: [{}]\nemotion: {} (confidence {:.2})\ntopic: {}\n",
        analysis.tokens.join(", "),
        analysis.emotion,
        analysis.confidence,
        analysis.topic
    )
}
