use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Query as ChoiceQuery},
    question::{Insert as QuestionInsert, Question},
};
use crate::error::Error;
use chrono::{DateTime, Utc};

pub trait QuestionCommon {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error>;
    /// Questions with `pub_date <= now`, newest first, ties in insertion order.
    async fn list_published(&mut self, now: DateTime<Utc>) -> Result<Vec<Question>, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error>;
    /// Returns whether a question was removed. Its choices go with it.
    async fn delete(&mut self, id: i32) -> Result<bool, Error>;
}

pub trait ChoiceCommon {
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error>;
    async fn query(&mut self, query: ChoiceQuery) -> Result<Vec<Choice>, Error>;
    /// Adds one vote in a single storage-level step. Returns false when the choice
    /// does not exist or belongs to another question.
    async fn increment_votes(&mut self, question_id: i32, id: i32) -> Result<bool, Error>;
}

pub trait Common: QuestionCommon + ChoiceCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type Tx: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::Tx, Error>;
}
