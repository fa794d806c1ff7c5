use std::path::Path;

use anyhow::Context;
use tokio::fs;

use crate::dao::{models::QuestionEntity, record_store::RecordStore};

/// Load a JSON question set from `path` into the store, returning how many
/// questions were installed.
///
/// Question authoring is an admin concern outside this service; the seed file
/// is the hand-off point. The file holds a JSON array of question objects;
/// `id`, `points`, and `max_attempts` may be omitted per entry.
pub async fn seed_questions(store: &dyn RecordStore, path: &Path) -> anyhow::Result<usize> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading question set from `{}`", path.display()))?;

    let questions: Vec<QuestionEntity> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing question set `{}`", path.display()))?;

    let count = questions.len();
    for question in questions {
        store
            .upsert_question(question)
            .await
            .context("installing seeded question")?;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::record_store::memory::MemoryRecordStore;

    #[tokio::test]
    async fn seeds_questions_with_defaults_filled_in() {
        let dir = std::env::temp_dir().join(format!("seed-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("questions.json");
        std::fs::write(
            &path,
            r#"[
                {"title": "Tag soup", "prompt": "Name the tag", "category": "HTML", "answer": "div"},
                {"title": "Selectors", "prompt": "Pick one", "category": "CSS", "answer": "class", "points": 250, "max_attempts": 1}
            ]"#,
        )
        .unwrap();

        let store = MemoryRecordStore::new();
        let count = seed_questions(&store, &path).await.unwrap();
        assert_eq!(count, 2);

        let questions = store.list_questions(None).await.unwrap();
        assert_eq!(questions[0].points, 100);
        assert_eq!(questions[0].max_attempts, 3);
        assert_eq!(questions[1].points, 250);
        assert_eq!(questions[1].max_attempts, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_file_reports_the_path() {
        let store = MemoryRecordStore::new();
        let err = seed_questions(&store, Path::new("/nonexistent/questions.json"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/questions.json"));
    }
}
