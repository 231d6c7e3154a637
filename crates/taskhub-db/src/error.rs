use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid status value in stored row: {0}")]
    InvalidStatus(String),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
