use crate::{
    core::{
        models::{
            choice::{Insert as ChoiceInsert, Query as ChoiceQuery, CHOICE_TEXT_MAX_LEN},
            question::{Create as QuestionCreate, Insert as QuestionInsert, Question, QuestionDetail, QUESTION_TEXT_MAX_LEN},
        },
        ports::repository::{ChoiceCommon, QuestionCommon, Store, TxStore},
    },
    error::Error,
};
use chrono::{DateTime, Utc};
use log::{debug, info};

/// Returns the trimmed text, which is what gets stored.
pub(crate) fn validate_text(field: &str, text: &str, max_len: usize) -> Result<String, Error> {
    let text = text.trim();
    let len = text.chars().count();
    if len == 0 || len > max_len {
        return Err(Error::BusinessError(format!("{} must be between 1 and {} characters, got {}", field, max_len, len)));
    }
    Ok(text.to_owned())
}

pub async fn published_questions<S>(storer: &mut S, now: DateTime<Utc>) -> Result<Vec<Question>, Error>
where
    S: Store,
{
    let questions = QuestionCommon::list_published(storer, now).await?;
    debug!("{} published questions at {}", questions.len(), now);
    Ok(questions)
}

/// Fetches a question with its choices. Questions not yet published are reported as missing.
pub async fn question_detail<S>(storer: &mut S, id: i32, now: DateTime<Utc>) -> Result<QuestionDetail, Error>
where
    S: Store,
{
    let question = match QuestionCommon::get(storer, id).await? {
        Some(q) if q.is_published(now) => q,
        Some(_) => {
            debug!("question {} is not published yet", id);
            return Err(Error::NotFound);
        }
        None => return Err(Error::NotFound),
    };
    let choices = ChoiceCommon::query(storer, ChoiceQuery { question_id_eq: Some(id) }).await?;
    Ok(QuestionDetail { question, choices })
}

pub async fn create_question<T>(mut storer: T, question: QuestionCreate, now: DateTime<Utc>) -> Result<i32, Error>
where
    T: TxStore,
{
    let question = QuestionCreate {
        question_text: validate_text("question_text", &question.question_text, QUESTION_TEXT_MAX_LEN)?,
        choices: question
            .choices
            .iter()
            .map(|c| validate_text("choice_text", c, CHOICE_TEXT_MAX_LEN))
            .collect::<Result<Vec<_>, _>>()?,
        ..question
    };
    let num_of_choices = question.choices.len();
    match insert_question_with_choices(&mut storer, question, now).await {
        Ok(qid) => {
            storer.commit().await?;
            info!("created question {} with {} choices", qid, num_of_choices);
            Ok(qid)
        }
        Err(e) => {
            storer.rollback().await?;
            Err(e)
        }
    }
}

async fn insert_question_with_choices<T>(storer: &mut T, question: QuestionCreate, now: DateTime<Utc>) -> Result<i32, Error>
where
    T: TxStore,
{
    let qid = QuestionCommon::insert(
        storer,
        QuestionInsert {
            question_text: question.question_text,
            pub_date: question.pub_date.unwrap_or(now),
        },
    )
    .await?;
    for choice_text in question.choices {
        ChoiceCommon::insert(storer, ChoiceInsert { question_id: qid, choice_text }).await?;
    }
    Ok(qid)
}

pub async fn delete_question<S>(storer: &mut S, id: i32) -> Result<(), Error>
where
    S: Store,
{
    if !QuestionCommon::delete(storer, id).await? {
        return Err(Error::NotFound);
    }
    info!("deleted question {}", id);
    Ok(())
}
