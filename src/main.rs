mod clock;
mod config;
mod core;
mod database;
mod error;
mod handlers;
mod response;
mod routes;
mod templates;

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_LOG_FILTER};
use crate::core::ports::repository::Manager;
use crate::database::memory::MemoryManager;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use actix_web::web::Data;
use actix_web::{middleware::Logger, App, HttpServer};
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tera::Tera;

async fn serve<M>(config: Config, manager: M, clock: Data<dyn Clock>, tera: Data<Tera>) -> Result<(), Error>
where
    M: Manager + Send + Sync + 'static,
{
    let manager = Data::new(manager);
    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(manager.clone())
            .app_data(clock.clone())
            .app_data(tera.clone())
            .configure(handlers::configure::<M>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();
    let config = Config::from_env()?;
    let tera = Data::new(templates::build()?);
    let clock: Data<dyn Clock> = Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);
    match config.database_url.clone() {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(config.max_connections).connect(&url).await?;
            if config.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("migrations applied");
            }
            serve(config, PgSqlxManager::new(pool), clock, tera).await
        }
        None => {
            warn!("DATABASE_URL is not set, polls are kept in memory and lost on exit");
            serve(config, MemoryManager::default(), clock, tera).await
        }
    }
}
