use crate::clock::Clock;
use crate::core::ports::repository::Manager;
use crate::core::services::{choice, question};
use crate::error::Error;
use crate::handlers::question::detail_context;
use crate::routes;
use crate::templates::{self, render};
use actix_web::http::header;
use actix_web::web::{Data, Form, Path};
use actix_web::{HttpResponse, ResponseError};
use serde::Deserialize;
use tera::Tera;

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// Blank or non-numeric values count as no selection.
    fn choice_id(&self) -> Option<i32> {
        self.choice.as_deref().and_then(|v| v.trim().parse::<i32>().ok())
    }
}

pub async fn vote<M>(manager: Data<M>, clock: Data<dyn Clock>, tera: Data<Tera>, question_id: Path<i32>, Form(form): Form<VoteForm>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let question_id = question_id.into_inner();
    let now = clock.now();
    let mut db = manager.db().await?;
    let outcome = match form.choice_id() {
        Some(choice_id) => choice::vote(&mut db, question_id, choice_id, now).await,
        None => Err(Error::InvalidChoice),
    };
    match outcome {
        Ok(()) => {
            let location = routes::RESULTS.resolve(&[("question_id", question_id.to_string())])?;
            Ok(HttpResponse::SeeOther().insert_header((header::LOCATION, location)).finish())
        }
        Err(e @ Error::InvalidChoice) => {
            let detail = question::question_detail(&mut db, question_id, now).await?;
            let message = e.to_string();
            render(&tera, templates::DETAIL, &detail_context(&detail, Some(&message)), e.status_code())
        }
        Err(e) => Err(e),
    }
}
