use diesel::{Connection, ConnectionError, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::config::DbConfig;
use crate::error::SeedError;

pub mod catalog;
pub mod config;
pub mod error;
pub mod fake;
pub mod models;
pub mod pipeline;
pub mod recipe;
pub mod schema;
pub mod validation;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub fn establish_connection(config: &DbConfig) -> Result<PgConnection, ConnectionError> {
    PgConnection::establish(&config.connection_string())
}

/// Creates the pizzeria tables when they do not exist yet.
pub fn run_migrations(conn: &mut PgConnection) -> Result<(), SeedError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| SeedError::Migration(err.to_string()))
}
