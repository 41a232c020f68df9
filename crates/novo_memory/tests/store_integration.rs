//! Integration tests for ConversationStore over the durable backends.
//!
//! Uses tempfile::TempDir for isolated data directories.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use novo_core::{Conversation, Emotion, Feedback, Topic};
use novo_memory::{ConversationStore, FileBackend, KeyValueBackend, LearningEngine, SqliteBackend};

fn history(n: usize) -> Vec<Conversation> {
    let start = Utc::now() - Duration::minutes(n as i64);
    (0..n)
        .map(|i| {
            let mut c = Conversation::new(
                format!("message {}", i),
                format!("reply {}", i),
                if i % 2 == 0 { Emotion::Curious } else { Emotion::Neutral },
                if i % 3 == 0 { Topic::Space } else { Topic::General },
            );
            c.timestamp = start + Duration::minutes(i as i64);
            if i % 4 == 0 {
                c.feedback = Some(Feedback::from(i % 8 == 0));
            }
            c
        })
        .collect()
}

/// Test 1: file backend round-trip across store instances
#[tokio::test]
async fn test_file_round_trip_across_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let original = history(12);
    {
        let store = ConversationStore::new(Arc::new(FileBackend::new(dir.path()).await.unwrap()));
        store.save(&original).await;
    }
    let store = ConversationStore::new(Arc::new(FileBackend::new(dir.path()).await.unwrap()));
    let loaded = store.load().await;
    assert_eq!(loaded.len(), original.len());
    for (a, b) in loaded.iter().zip(&original) {
        assert_eq!(a.input, b.input);
        assert_eq!(a.feedback, b.feedback);
        assert_eq!(a.timestamp.timestamp(), b.timestamp.timestamp());
    }
    assert_eq!(loaded, original);
}

/// Test 2: SQLite backend round-trip across pool reopen
#[tokio::test]
async fn test_sqlite_round_trip_across_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("novo.db");
    let original = history(5);
    {
        let store = ConversationStore::new(Arc::new(SqliteBackend::new(&path).await.unwrap()));
        store.save(&original).await;
    }
    let store = ConversationStore::new(Arc::new(SqliteBackend::new(&path).await.unwrap()));
    assert_eq!(store.load().await, original);
}

/// Test 3: a blob written by the browser build loads and replays
#[tokio::test]
async fn test_legacy_blob_loads_and_replays() {
    let dir = tempfile::TempDir::new().unwrap();
    let backend = Arc::new(FileBackend::new(dir.path()).await.unwrap());
    backend
        .set(
            "novo_chatbot_data",
            r#"[
                {"input":"Tell me about space?","response":"Space is truly the final frontier!","emotion":"neutral","topic":"space","feedback":"positive","timestamp":"2024-03-02T08:15:30.250Z"},
                {"input":"hmm","response":"What aspects of this interest you the most?","emotion":"neutral","topic":"general","timestamp":"2024-03-02T08:16:00.000Z"}
            ]"#,
        )
        .await
        .unwrap();

    let store = ConversationStore::new(backend);
    let loaded = store.load().await;
    assert_eq!(loaded.len(), 2);
    let expected: DateTime<Utc> = "2024-03-02T08:15:30.250Z".parse().unwrap();
    assert_eq!(loaded[0].timestamp, expected);
    assert_eq!(loaded[0].feedback, Some(Feedback::Positive));

    let mut engine = LearningEngine::new();
    engine.learn(&loaded);
    assert!((engine.topic_score(Topic::Space) - 0.1).abs() < 1e-9);
    assert!((engine.pattern_score("hmm") + 0.5).abs() < 1e-9);
}

/// Test 4: a corrupt file is discarded, and the next save repairs it
#[tokio::test]
async fn test_corrupt_file_recovers_on_next_save() {
    let dir = tempfile::TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("novo_chatbot_data.json"), b"[{\"input\": tru")
        .await
        .unwrap();
    let store = ConversationStore::new(Arc::new(FileBackend::new(dir.path()).await.unwrap()));
    assert!(store.load().await.is_empty());

    let fresh = history(2);
    store.save(&fresh).await;
    assert_eq!(store.load().await, fresh);
}
