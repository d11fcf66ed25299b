use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("Failed to run migrations: {0}")]
    Migration(String),
    #[error(transparent)]
    Linkage(#[from] LinkageError),
    #[error("Cannot generate orders without {0}")]
    MissingReference(&'static str),
    #[error("Inserted order {0} matches no planned order")]
    UnmatchedOrder(i32),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum LinkageError {
    #[error("Menu item {menu_item:?} requires unknown ingredient {ingredient:?}")]
    UnknownIngredient {
        menu_item: String,
        ingredient: &'static str,
    },
}
