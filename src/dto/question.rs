use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::QuestionEntity;

/// Question fields shown to participants. The correct answer never leaves
/// the record store.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSummary {
    /// Identifier to submit answers against.
    pub id: Uuid,
    /// Short display title.
    pub title: String,
    /// Full challenge text.
    pub prompt: String,
    /// Category the question is filed under.
    pub category: String,
    /// Points awarded for the first correct answer.
    pub points: u32,
    /// Attempts allowed per user.
    pub max_attempts: u32,
}

impl From<QuestionEntity> for QuestionSummary {
    fn from(entity: QuestionEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            prompt: entity.prompt,
            category: entity.category,
            points: entity.points,
            max_attempts: entity.max_attempts,
        }
    }
}

/// One category row on the category index page.
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Number of questions filed under it.
    pub questions: usize,
}

/// Query parameters accepted by the question list route.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionListQuery {
    /// Restrict the listing to one category.
    pub category: Option<String>,
}
