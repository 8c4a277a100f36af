use crate::core::models::choice::Choice;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const QUESTION_TEXT_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// A question is visible once its publish time has passed.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// Inclusive on both ends: `now - 1h <= pub_date <= now`.
    pub fn was_published_last_hour(&self, now: DateTime<Utc>) -> bool {
        now - Duration::hours(1) <= self.pub_date && self.pub_date <= now
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Create {
    pub question_text: String,
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Orders questions the way the index shows them: newest first, ties kept in insertion order.
pub fn newest_first(questions: &mut [Question]) {
    questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}
