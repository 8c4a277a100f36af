use crate::clock::Clock;
use crate::core::models::{choice::Create as ChoiceCreate, question::Create as QuestionCreate};
use crate::core::ports::repository::Manager;
use crate::core::services::{choice, question};
use crate::error::Error;
use crate::response::{CreateResponse, DeleteResponse};
use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;

pub async fn create_question<M>(manager: Data<M>, clock: Data<dyn Clock>, Json(body): Json<QuestionCreate>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let id = question::create_question(tx, body, clock.now()).await?;
    Ok(HttpResponse::Created().json(CreateResponse { id }))
}

pub async fn add_choice<M>(manager: Data<M>, question_id: Path<i32>, Json(body): Json<ChoiceCreate>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let id = choice::add_choice(&mut db, question_id.into_inner(), body).await?;
    Ok(HttpResponse::Created().json(CreateResponse { id }))
}

pub async fn delete_question<M>(manager: Data<M>, question_id: Path<i32>) -> Result<Json<DeleteResponse>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    question::delete_question(&mut db, question_id.into_inner()).await?;
    Ok(Json(DeleteResponse::new(1)))
}
