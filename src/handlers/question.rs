use crate::clock::Clock;
use crate::core::models::question::{Question, QuestionDetail};
use crate::core::ports::repository::Manager;
use crate::core::services::question;
use crate::error::Error;
use crate::templates::{self, render};
use actix_web::http::StatusCode;
use actix_web::web::{Data, Path};
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug, Serialize)]
struct IndexItem {
    #[serde(flatten)]
    question: Question,
    was_published_last_hour: bool,
}

impl IndexItem {
    fn new(question: Question, now: DateTime<Utc>) -> Self {
        let was_published_last_hour = question.was_published_last_hour(now);
        IndexItem {
            question,
            was_published_last_hour,
        }
    }
}

pub(crate) fn detail_context(detail: &QuestionDetail, error_message: Option<&str>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("question", &detail.question);
    ctx.insert("choices", &detail.choices);
    ctx.insert("error_message", &error_message);
    ctx
}

pub async fn index<M>(manager: Data<M>, clock: Data<dyn Clock>, tera: Data<Tera>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let now = clock.now();
    let mut db = manager.db().await?;
    let latest_question_list: Vec<IndexItem> = question::published_questions(&mut db, now)
        .await?
        .into_iter()
        .map(|q| IndexItem::new(q, now))
        .collect();
    let mut ctx = Context::new();
    ctx.insert("latest_question_list", &latest_question_list);
    render(&tera, templates::INDEX, &ctx, StatusCode::OK)
}

pub async fn detail<M>(manager: Data<M>, clock: Data<dyn Clock>, tera: Data<Tera>, question_id: Path<i32>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let detail = question::question_detail(&mut db, question_id.into_inner(), clock.now()).await?;
    render(&tera, templates::DETAIL, &detail_context(&detail, None), StatusCode::OK)
}

pub async fn results<M>(manager: Data<M>, clock: Data<dyn Clock>, tera: Data<Tera>, question_id: Path<i32>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let detail = question::question_detail(&mut db, question_id.into_inner(), clock.now()).await?;
    render(&tera, templates::RESULTS, &detail_context(&detail, None), StatusCode::OK)
}
