// ─── Integration Tests ────────────────────────────────────────────────────────
// End-to-end runs through the public API: a JSON dataset on disk,
// a CSV conversation log on disk, and the model store directory.

use std::{fs, path::Path, sync::Arc, thread};

use edusphere_bot::application::build_use_case::BuildUseCase;
use edusphere_bot::application::config::BotConfig;
use edusphere_bot::infra::conversation_log::CsvConversationLog;
use edusphere_bot::{BotError, InferenceService};
use tempfile::TempDir;

const DATASET: &str = r#"[
    {"input": "What is photosynthesis?", "output": "Plants make food from light."},
    {"input": "What is gravity?",        "output": "A force that attracts masses."},
    {"input": "Who wrote Hamlet?",       "output": "William Shakespeare."},
    {"input": "How many legs does a spider have?", "output": "Eight."}
]"#;

fn write_dataset(dir: &Path, body: &str) -> String {
    let path = dir.join("dataset.json");
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

fn config(dir: &Path) -> BotConfig {
    BotConfig {
        dataset_path: write_dataset(dir, DATASET),
        log_path:     None,
        ..BotConfig::default()
    }
}

fn service(dir: &Path, log: &Path) -> InferenceService {
    let bot = BuildUseCase::new(config(dir)).execute().unwrap();
    InferenceService::new(Arc::new(bot), Arc::new(CsvConversationLog::new(log)))
}

fn log_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

#[test]
fn test_answers_from_file_and_logs_each_exchange() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("chat_log.csv");
    let service = service(dir.path(), &log);

    assert_eq!(
        service.respond("what is photosynthesis"),
        "Plants make food from light."
    );
    assert_eq!(
        service.get_bot_response("Tell me about GRAVITY!"),
        "A force that attracts masses."
    );

    let rows = log_rows(&log);
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "what is photosynthesis");
    assert_eq!(&rows[1][2], "A force that attracts masses.");
}

#[test]
fn test_every_training_question_reproduces_its_answer() {
    let dir = TempDir::new().unwrap();
    let bot = BuildUseCase::new(config(dir.path())).execute().unwrap();

    for (question, answer) in bot.corpus().iter() {
        assert_eq!(bot.answer(question), answer, "question {question:?}");
    }
}

#[test]
fn test_missing_dataset_is_reported() {
    let dir = TempDir::new().unwrap();
    let cfg = BotConfig {
        dataset_path: dir.path().join("absent.json").display().to_string(),
        ..BotConfig::default()
    };

    let err = BuildUseCase::new(cfg).execute().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BotError>(),
        Some(BotError::DatasetNotFound(_))
    ));
}

#[test]
fn test_record_without_output_is_rejected() {
    let dir = TempDir::new().unwrap();
    let cfg = BotConfig {
        dataset_path: write_dataset(
            dir.path(),
            r#"[{"input": "hi", "output": "hello"}, {"input": "bye"}]"#,
        ),
        ..BotConfig::default()
    };

    let err = BuildUseCase::new(cfg).execute().unwrap_err();
    match err.downcast_ref::<BotError>() {
        Some(BotError::DatasetFormat { reason, .. }) => assert!(reason.contains("record 1")),
        other => panic!("expected DatasetFormat, got {other:?}"),
    }
}

#[test]
fn test_odd_inputs_still_get_an_answer() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("chat_log.csv");
    let service = service(dir.path(), &log);

    let long = "why ".repeat(20_000);
    for input in ["", "   ", "?!?...,,,", "the and of", "пример 例子", long.as_str()] {
        let answer = service.respond(input);
        assert!(!answer.is_empty());
    }
    assert_eq!(log_rows(&log).len(), 6);
}

#[test]
fn test_concurrent_responses_log_one_row_each() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("chat_log.csv");
    let service = service(dir.path(), &log);

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let service = service.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    service.respond(&format!("thread {t}, question {i}: who wrote \"Hamlet\"?"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let rows = log_rows(&log);
    assert_eq!(rows.len(), 100);
    assert!(rows.iter().all(|r| &r[2] == "William Shakespeare."));
}

#[test]
fn test_model_store_is_reused_until_dataset_changes() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("model");
    let cfg = BotConfig {
        model_dir: Some(store.display().to_string()),
        ..config(dir.path())
    };

    let first = BuildUseCase::new(cfg.clone()).execute().unwrap();
    let saved = fs::read_to_string(store.join("model.json")).unwrap();

    let second = BuildUseCase::new(cfg.clone()).execute().unwrap();
    assert_eq!(second.model().labels(), first.model().labels());
    for (question, answer) in first.corpus().iter() {
        assert_eq!(second.answer(question), answer);
    }

    // A new record changes the hash, so the stored fit is replaced.
    write_dataset(
        dir.path(),
        r#"[{"input": "What is gravity?", "output": "A force."},
            {"input": "What is light?",   "output": "Radiation."}]"#,
    );
    let third = BuildUseCase::new(cfg).execute().unwrap();
    assert_eq!(third.answer("light"), "Radiation.");
    assert_ne!(fs::read_to_string(store.join("model.json")).unwrap(), saved);
}
