use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Query as ChoiceQuery},
    question::{Insert as QuestionInsert, Question},
};
use crate::core::ports::repository::{ChoiceCommon, Common, Manager, QuestionCommon, Store, TxStore};
use crate::database::models::{choice::ChoiceRow, question::QuestionRow};
use crate::error::Error;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO polls_question (question_text, pub_date) VALUES ($1, $2) RETURNING id")
            .bind(question.question_text)
            .bind(question.pub_date)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn list_published(&mut self, now: DateTime<Utc>) -> Result<Vec<Question>, Error> {
        let rows: Vec<QuestionRow> = query_as(
            "
        SELECT id, question_text, pub_date
        FROM polls_question
        WHERE pub_date <= $1
        ORDER BY pub_date DESC, id ASC",
        )
        .bind(now)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn get(&mut self, id: i32) -> Result<Option<Question>, Error> {
        let row: Option<QuestionRow> = query_as("SELECT id, question_text, pub_date FROM polls_question WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(row.map(Question::from))
    }

    async fn delete(&mut self, id: i32) -> Result<bool, Error> {
        let res = query("DELETE FROM polls_question WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl<E> ChoiceCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO polls_choice (question_id, choice_text) VALUES ($1, $2) RETURNING id")
            .bind(choice.question_id)
            .bind(choice.choice_text)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query(&mut self, query: ChoiceQuery) -> Result<Vec<Choice>, Error> {
        let mut stmt = QueryBuilder::<Postgres>::new("SELECT id, question_id, choice_text, votes FROM polls_choice WHERE 1 = 1");
        if let Some(question_id) = query.question_id_eq {
            stmt.push(" AND question_id = ").push_bind(question_id);
        }
        stmt.push(" ORDER BY id");
        let rows: Vec<ChoiceRow> = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(rows.into_iter().map(Choice::from).collect())
    }

    async fn increment_votes(&mut self, question_id: i32, id: i32) -> Result<bool, Error> {
        let res = query("UPDATE polls_choice SET votes = votes + 1 WHERE id = $1 AND question_id = $2")
            .bind(id)
            .bind(question_id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}

impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Common for PgSqlx<Transaction<'a, Postgres>> {}
impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Store for PgSqlx<Transaction<'a, Postgres>> {}

impl<'a> TxStore for PgSqlx<Transaction<'a, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type Tx = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::Tx, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
