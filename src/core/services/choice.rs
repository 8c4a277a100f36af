use crate::core::models::choice::{Create as ChoiceCreate, Insert as ChoiceInsert, CHOICE_TEXT_MAX_LEN};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, Store};
use crate::core::services::question::validate_text;
use crate::error::Error;
use chrono::{DateTime, Utc};
use log::{debug, info};

/// Casts one vote for `choice_id`. The question has to be visible at `now`.
pub async fn vote<S>(storer: &mut S, question_id: i32, choice_id: i32, now: DateTime<Utc>) -> Result<(), Error>
where
    S: Store,
{
    match QuestionCommon::get(storer, question_id).await? {
        Some(q) if q.is_published(now) => {}
        _ => return Err(Error::NotFound),
    }
    if !ChoiceCommon::increment_votes(storer, question_id, choice_id).await? {
        debug!("choice {} is not part of question {}", choice_id, question_id);
        return Err(Error::InvalidChoice);
    }
    debug!("vote recorded for choice {} of question {}", choice_id, question_id);
    Ok(())
}

pub async fn add_choice<S>(storer: &mut S, question_id: i32, choice: ChoiceCreate) -> Result<i32, Error>
where
    S: Store,
{
    let choice_text = validate_text("choice_text", &choice.choice_text, CHOICE_TEXT_MAX_LEN)?;
    if QuestionCommon::get(storer, question_id).await?.is_none() {
        return Err(Error::NotFound);
    }
    let id = ChoiceCommon::insert(storer, ChoiceInsert { question_id, choice_text }).await?;
    info!("added choice {} to question {}", id, question_id);
    Ok(id)
}
