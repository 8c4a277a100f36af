use serde::{Deserialize, Serialize};

pub const CHOICE_TEXT_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Choice {
    pub id: i32,
    pub question_id: i32,
    pub choice_text: String,
    pub vote_count: i32,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: i32,
    pub choice_text: String,
}

#[derive(Debug, Deserialize)]
pub struct Create {
    pub choice_text: String,
}

#[derive(Debug, Default)]
pub struct Query {
    pub question_id_eq: Option<i32>,
}
