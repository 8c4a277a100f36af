pub mod admin;
pub mod question;
pub mod vote;

use crate::core::ports::repository::Manager;
use crate::routes;
use actix_web::web::{delete, get, post, ServiceConfig};

/// Registers every entry of the route table against its handler.
pub fn configure<M>(cfg: &mut ServiceConfig)
where
    M: Manager + 'static,
{
    cfg.route(routes::INDEX.path, get().to(question::index::<M>))
        .route(routes::DETAIL.path, get().to(question::detail::<M>))
        .route(routes::RESULTS.path, get().to(question::results::<M>))
        .route(routes::VOTE.path, post().to(vote::vote::<M>))
        .route(routes::ADMIN_QUESTIONS.path, post().to(admin::create_question::<M>))
        .route(routes::ADMIN_QUESTION.path, delete().to(admin::delete_question::<M>))
        .route(routes::ADMIN_CHOICES.path, post().to(admin::add_choice::<M>));
}
