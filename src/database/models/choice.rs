use crate::core::models::choice::Choice;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ChoiceRow {
    pub id: i32,
    pub question_id: i32,
    pub choice_text: String,
    #[sqlx(rename = "votes")]
    pub vote_count: i32,
}

impl From<ChoiceRow> for Choice {
    fn from(row: ChoiceRow) -> Self {
        Choice {
            id: row.id,
            question_id: row.question_id,
            choice_text: row.choice_text,
            vote_count: row.vote_count,
        }
    }
}
