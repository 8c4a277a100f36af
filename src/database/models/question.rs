use crate::core::models::question::Question;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(QuestionRow { id, question_text, pub_date }: QuestionRow) -> Self {
        Question { id, question_text, pub_date }
    }
}
