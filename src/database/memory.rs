use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Query as ChoiceQuery},
    question::{newest_first, Insert as QuestionInsert, Question},
};
use crate::core::ports::repository::{ChoiceCommon, Common, Manager, QuestionCommon, Store, TxStore};
use crate::error::Error;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct State {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    last_question_id: i32,
    last_choice_id: i32,
    version: u64,
}

impl State {
    fn insert_question(&mut self, question: QuestionInsert) -> i32 {
        self.version += 1;
        self.last_question_id += 1;
        self.questions.push(Question {
            id: self.last_question_id,
            question_text: question.question_text,
            pub_date: question.pub_date,
        });
        self.last_question_id
    }

    fn list_published(&self, now: DateTime<Utc>) -> Vec<Question> {
        let mut questions: Vec<Question> = self.questions.iter().filter(|q| q.is_published(now)).cloned().collect();
        newest_first(&mut questions);
        questions
    }

    fn get(&self, id: i32) -> Option<Question> {
        self.questions.iter().find(|q| q.id == id).cloned()
    }

    fn delete(&mut self, id: i32) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);
        if self.questions.len() == before {
            return false;
        }
        self.version += 1;
        self.choices.retain(|c| c.question_id != id);
        true
    }

    fn insert_choice(&mut self, choice: ChoiceInsert) -> Result<i32, Error> {
        if !self.questions.iter().any(|q| q.id == choice.question_id) {
            return Err(Error::BusinessError(format!("question {} does not exist", choice.question_id)));
        }
        self.version += 1;
        self.last_choice_id += 1;
        self.choices.push(Choice {
            id: self.last_choice_id,
            question_id: choice.question_id,
            choice_text: choice.choice_text,
            vote_count: 0,
        });
        Ok(self.last_choice_id)
    }

    fn query_choices(&self, query: &ChoiceQuery) -> Vec<Choice> {
        self.choices
            .iter()
            .filter(|c| query.question_id_eq.map_or(true, |qid| c.question_id == qid))
            .cloned()
            .collect()
    }

    fn increment_votes(&mut self, question_id: i32, id: i32) -> Result<bool, Error> {
        let Some(choice) = self.choices.iter_mut().find(|c| c.id == id && c.question_id == question_id) else {
            return Ok(false);
        };
        choice.vote_count = choice
            .vote_count
            .checked_add(1)
            .ok_or_else(|| Error::ServerError(format!("vote count of choice {} overflowed", id)))?;
        self.version += 1;
        Ok(true)
    }
}

fn lock(shared: &Mutex<State>) -> Result<MutexGuard<'_, State>, Error> {
    shared.lock().map_err(|_| Error::ServerError("memory store lock poisoned".into()))
}

struct Working {
    state: State,
    base_version: u64,
}

/// Keeps polls in process memory. Used when no database is configured, and by tests.
///
/// Outside a transaction every call takes the lock once, so a vote is a single step.
/// A transaction works on a private copy and publishes it on commit, failing if anything
/// else was written in the meantime.
pub struct MemoryStore {
    shared: Arc<Mutex<State>>,
    tx: Option<Working>,
}

impl MemoryStore {
    fn with_state<R>(&mut self, f: impl FnOnce(&mut State) -> R) -> Result<R, Error> {
        match &mut self.tx {
            Some(working) => Ok(f(&mut working.state)),
            None => {
                let mut state = lock(&self.shared)?;
                Ok(f(&mut state))
            }
        }
    }
}

impl QuestionCommon for MemoryStore {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        self.with_state(|s| s.insert_question(question))
    }

    async fn list_published(&mut self, now: DateTime<Utc>) -> Result<Vec<Question>, Error> {
        self.with_state(|s| s.list_published(now))
    }

    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error> {
        self.with_state(|s| s.get(id))
    }

    async fn delete(&mut self, id: i32) -> Result<bool, Error> {
        self.with_state(|s| s.delete(id))
    }
}

impl ChoiceCommon for MemoryStore {
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error> {
        self.with_state(|s| s.insert_choice(choice))?
    }

    async fn query(&mut self, query: ChoiceQuery) -> Result<Vec<Choice>, Error> {
        self.with_state(|s| s.query_choices(&query))
    }

    async fn increment_votes(&mut self, question_id: i32, id: i32) -> Result<bool, Error> {
        self.with_state(|s| s.increment_votes(question_id, id))?
    }
}

impl Common for MemoryStore {}
impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(self) -> Result<(), Error> {
        let Some(working) = self.tx else {
            return Ok(());
        };
        let mut shared = lock(&self.shared)?;
        if shared.version != working.base_version {
            return Err(Error::ServerError("memory store was modified during the transaction".into()));
        }
        *shared = working.state;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryManager {
    shared: Arc<Mutex<State>>,
}

impl Manager for MemoryManager {
    type Store = MemoryStore;
    type Tx = MemoryStore;

    async fn db(&self) -> Result<Self::Store, Error> {
        Ok(MemoryStore {
            shared: self.shared.clone(),
            tx: None,
        })
    }

    async fn tx(&self) -> Result<Self::Tx, Error> {
        let state = lock(&self.shared)?.clone();
        Ok(MemoryStore {
            shared: self.shared.clone(),
            tx: Some(Working {
                base_version: state.version,
                state,
            }),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    fn insert(text: &str, pub_date: DateTime<Utc>) -> QuestionInsert {
        QuestionInsert {
            question_text: text.into(),
            pub_date,
        }
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let manager = MemoryManager::default();
        let mut tx = manager.tx().await.unwrap();
        let id = QuestionCommon::insert(&mut tx, insert("Gone", Utc::now())).await.unwrap();
        tx.rollback().await.unwrap();
        let mut db = manager.db().await.unwrap();
        assert!(QuestionCommon::get(&mut db, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let manager = MemoryManager::default();
        let mut tx = manager.tx().await.unwrap();
        let id = QuestionCommon::insert(&mut tx, insert("Kept", Utc::now())).await.unwrap();
        let mut db = manager.db().await.unwrap();
        assert!(QuestionCommon::get(&mut db, id).await.unwrap().is_none());
        tx.commit().await.unwrap();
        assert!(QuestionCommon::get(&mut db, id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_commit_fails_after_concurrent_write() {
        let manager = MemoryManager::default();
        let mut tx = manager.tx().await.unwrap();
        QuestionCommon::insert(&mut tx, insert("Late", Utc::now())).await.unwrap();
        let mut db = manager.db().await.unwrap();
        QuestionCommon::insert(&mut db, insert("Early", Utc::now())).await.unwrap();
        assert!(matches!(tx.commit().await, Err(Error::ServerError(_))));
    }

    #[tokio::test]
    async fn test_choice_needs_existing_question() {
        let manager = MemoryManager::default();
        let mut db = manager.db().await.unwrap();
        let res = ChoiceCommon::insert(&mut db, ChoiceInsert { question_id: 1, choice_text: "Orphan".into() }).await;
        assert!(matches!(res, Err(Error::BusinessError(_))));
    }

    #[tokio::test]
    async fn test_increment_votes_reports_overflow() {
        let manager = MemoryManager::default();
        let mut db = manager.db().await.unwrap();
        let qid = QuestionCommon::insert(&mut db, insert("Popular", Utc::now())).await.unwrap();
        let cid = ChoiceCommon::insert(&mut db, ChoiceInsert { question_id: qid, choice_text: "Yes".into() }).await.unwrap();
        lock(&manager.shared).unwrap().choices[0].vote_count = i32::MAX;
        assert!(matches!(ChoiceCommon::increment_votes(&mut db, qid, cid).await, Err(Error::ServerError(_))));
        let choices = ChoiceCommon::query(&mut db, ChoiceQuery::default()).await.unwrap();
        assert_eq!(choices[0].vote_count, i32::MAX);
    }

    #[tokio::test]
    async fn test_list_published_filters_and_orders() {
        let manager = MemoryManager::default();
        let now = Utc::now();
        let mut db = manager.db().await.unwrap();
        QuestionCommon::insert(&mut db, insert("old", now - Duration::hours(2))).await.unwrap();
        QuestionCommon::insert(&mut db, insert("future", now + Duration::seconds(1))).await.unwrap();
        QuestionCommon::insert(&mut db, insert("recent", now - Duration::hours(1))).await.unwrap();
        QuestionCommon::insert(&mut db, insert("exactly now", now)).await.unwrap();
        let texts: Vec<String> = QuestionCommon::list_published(&mut db, now).await.unwrap().into_iter().map(|q| q.question_text).collect();
        assert_eq!(texts, vec!["exactly now", "recent", "old"]);
    }
}
