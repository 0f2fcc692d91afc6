use sqlx::{Pool, Postgres};

pub mod checkout;
pub mod config;
pub mod database;
pub mod errors;
pub mod guards;
pub mod models;
pub mod orders;
pub mod provider;
pub mod routes;
pub mod settings;
pub mod settlement;
pub mod utils;

#[cfg(test)]
pub mod testing;

#[derive(Debug)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}
